//! CombatResult - Outcome of one ability resolution

use crate::ability::ActionId;
use crate::dice::{sum, AttackRoll, DiceSource, DiceSpec, RollMode, D20};
use crate::types::{Attribute, DamageType, SaveEffect};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Damage dice as rolled, plus flat bonus and mitigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRoll {
    /// Formula actually rolled, e.g. "4d8" or "5d4+5"
    pub dice: String,
    /// Raw faces in roll order
    pub rolls: Vec<u32>,
    /// Flat bonus added once to the pool
    pub bonus: i32,
    /// sum(rolls) + bonus
    pub pre_mitigation: i32,
    /// Final damage after saving throws
    pub total: i32,
    pub damage_type: DamageType,
}

impl DamageRoll {
    /// No damage rolled, e.g. after a missed attack
    pub fn none(damage_type: DamageType, dice: impl Into<String>) -> Self {
        DamageRoll {
            dice: dice.into(),
            rolls: Vec::new(),
            bonus: 0,
            pre_mitigation: 0,
            total: 0,
            damage_type,
        }
    }

    pub fn rolled(damage_type: DamageType, dice: impl Into<String>, rolls: Vec<u32>, bonus: i32) -> Self {
        let pre_mitigation = sum(&rolls) + bonus;
        DamageRoll {
            dice: dice.into(),
            rolls,
            bonus,
            pre_mitigation,
            total: pre_mitigation,
            damage_type,
        }
    }

    /// Reduce the total according to a save
    pub fn mitigate(mut self, effect: SaveEffect, saved: bool) -> Self {
        self.total = effect.apply(self.pre_mitigation, saved);
        self
    }

    /// Damage removed by the save
    pub fn mitigated(&self) -> i32 {
        self.pre_mitigation - self.total
    }

    /// "1d8+3d6+5" style formula for one or more pools and a flat bonus
    pub fn formula(pools: &[DiceSpec], bonus: i32) -> String {
        let dice = pools
            .iter()
            .map(DiceSpec::to_string)
            .collect::<Vec<_>>()
            .join("+");
        match bonus {
            0 => dice,
            b if b > 0 => format!("{dice}+{b}"),
            b => format!("{dice}{b}"),
        }
    }
}

/// One target saving throw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub dc: i32,
    pub attribute: Attribute,
    /// Raw d20 face
    pub roll: u32,
    pub modifier: i32,
    pub total: i32,
    pub saved: bool,
    /// Effect of a success on damage; None when the save guards a condition
    pub effect: Option<SaveEffect>,
}

impl SaveOutcome {
    /// Roll d20 + modifier against the DC; meeting the DC saves
    pub fn roll(
        dc: i32,
        attribute: Attribute,
        modifier: i32,
        effect: Option<SaveEffect>,
        dice: &mut impl DiceSource,
    ) -> Self {
        let roll = dice.roll_die(D20);
        let total = roll as i32 + modifier;
        SaveOutcome {
            dc,
            attribute,
            roll,
            modifier,
            total,
            saved: total >= dc,
            effect,
        }
    }
}

/// Per-target result of a multi-target save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOutcome {
    /// Zero-based target index
    pub index: u32,
    pub save: SaveOutcome,
    /// Damage dice rolled for this target (empty when a save negated it)
    pub rolls: Vec<u32>,
    pub damage: i32,
}

/// Result of resolving an ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub id: Uuid,
    pub action: ActionId,
    pub timestamp: DateTime<Utc>,
    /// Slot/spell/character level used, if the family takes one
    pub level: Option<u32>,
    pub roll_mode: RollMode,

    // === Attacks ===
    /// Single attack roll
    pub attack: Option<AttackRoll>,
    /// Attack rolls of multi-attack abilities, in order
    pub attacks: Vec<AttackRoll>,
    pub is_critical: bool,
    pub is_miss: bool,

    // === Damage ===
    pub damage: DamageRoll,

    // === Saves ===
    pub save: Option<SaveOutcome>,
    pub targets: Vec<TargetOutcome>,

    /// Attribute a curse was laid on
    pub hexed_attribute: Option<Attribute>,
    /// The target dies outright; damage is not meaningful
    pub lethal: bool,
    /// Human-readable description
    pub label: String,
}

impl CombatResult {
    /// Empty result for an action; resolvers fill it in
    pub fn new(action: ActionId, damage: DamageRoll) -> Self {
        CombatResult {
            id: Uuid::new_v4(),
            action,
            timestamp: Utc::now(),
            level: None,
            roll_mode: RollMode::Normal,
            attack: None,
            attacks: Vec::new(),
            is_critical: false,
            is_miss: false,
            damage,
            save: None,
            targets: Vec::new(),
            hexed_attribute: None,
            lethal: false,
            label: String::new(),
        }
    }

    pub fn total_damage(&self) -> i32 {
        self.damage.total
    }

    pub fn damage_type_label(&self) -> &'static str {
        self.damage.damage_type.label()
    }

    /// Hex color a renderer uses for the damage type
    pub fn damage_type_color(&self) -> &'static str {
        self.damage.damage_type.color()
    }

    /// Save DC, from the single save or the first target
    pub fn save_dc(&self) -> Option<i32> {
        self.save
            .as_ref()
            .or_else(|| self.targets.first().map(|t| &t.save))
            .map(|s| s.dc)
    }

    pub fn hits(&self) -> usize {
        self.attacks.iter().filter(|a| a.is_hit()).count()
    }

    /// Targets that failed their save
    pub fn failed_saves(&self) -> usize {
        self.targets.iter().filter(|t| !t.save.saved).count()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![self.label.clone()];

        if self.lethal {
            parts.push("LETHAL".to_string());
        } else if self.is_miss && self.targets.is_empty() {
            parts.push("miss".to_string());
        } else {
            parts.push(format!(
                "{} {} damage ({})",
                self.damage.total,
                self.damage.damage_type.label(),
                self.damage.dice
            ));
        }

        if self.is_critical {
            parts.push("CRITICAL".to_string());
        }

        if let Some(save) = &self.save {
            let outcome = if save.saved { "saved" } else { "failed" };
            parts.push(format!("DC {} {} save {}", save.dc, save.attribute.abbreviation(), outcome));
        }

        if !self.targets.is_empty() {
            parts.push(format!("{}/{} failed", self.failed_saves(), self.targets.len()));
        }

        parts.join(", ")
    }
}
