//! Rules table entries: one AbilityConfig per ability, with a typed payload per family

use super::ActionId;
use crate::dice::{DiceSpec, HitRule};
use crate::error::CombatError;
use crate::types::{Attribute, DamageType, SaveEffect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a dice (or attack, or bonus) count grows with level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaling {
    #[default]
    Fixed,
    /// base + per_level * (level - base_level)
    PerLevel { base_level: u32, per_level: u32 },
    /// base + floor((level - 1) / every), i.e. one more every `every` levels
    Stepped { every: u32 },
}

impl Scaling {
    pub fn count(&self, base: u32, level: u32) -> u32 {
        match *self {
            Scaling::Fixed => base,
            Scaling::PerLevel { base_level, per_level } => {
                base + per_level * level.saturating_sub(base_level)
            }
            Scaling::Stepped { every } => base + level.saturating_sub(1) / every.max(1),
        }
    }
}

/// Hit rule as written in the table; the armor class arrives with each call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitRuleKind {
    /// Only a natural 1 misses, the target's armor class is not consulted
    Natural,
    #[default]
    ArmorClass,
}

impl HitRuleKind {
    pub fn against(&self, armor_class: i32) -> HitRule {
        match self {
            HitRuleKind::Natural => HitRule::NaturalOnly,
            HitRuleKind::ArmorClass => HitRule::ArmorClass(armor_class),
        }
    }
}

/// Trade attack accuracy for flat damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerAttack {
    pub penalty: i32,
    pub bonus: i32,
}

/// Save forced on the target after a hit; it carries a condition, not damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StunSave {
    pub attribute: Attribute,
    /// DC = 8 + proficiency + attack modifier
    pub proficiency: i32,
}

/// Single attack roll, then weapon dice and/or feature dice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeRules {
    #[serde(default)]
    pub weapon_dice: Option<DiceSpec>,
    #[serde(default)]
    pub feature_dice: Option<DiceSpec>,
    /// Scales the feature dice count
    #[serde(default)]
    pub scaling: Scaling,
    #[serde(default)]
    pub hit_rule: HitRuleKind,
    /// Extra feature dice against undead/fiends
    #[serde(default)]
    pub undead_bonus_dice: u32,
    #[serde(default)]
    pub add_modifier_to_damage: bool,
    #[serde(default)]
    pub power_attack: Option<PowerAttack>,
    #[serde(default)]
    pub stun_save: Option<StunSave>,
}

/// Several independent attack rolls, each hit rolling its own dice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiAttackRules {
    pub hit_dice: DiceSpec,
    /// Base maximum number of attacks
    pub attacks: u32,
    #[serde(default)]
    pub attack_scaling: Scaling,
    /// Flat damage per hit
    #[serde(default)]
    pub per_hit_bonus: u32,
    #[serde(default)]
    pub bonus_scaling: Scaling,
    /// The last attack of the sequence does not get `per_hit_bonus`
    #[serde(default)]
    pub bonus_skips_last: bool,
    #[serde(default)]
    pub add_modifier_to_damage: bool,
    #[serde(default)]
    pub hit_rule: HitRuleKind,
}

/// Missiles that always hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoHitRules {
    pub missile_die: DiceSpec,
    #[serde(default)]
    pub per_missile_bonus: i32,
    pub missiles: u32,
    #[serde(default)]
    pub scaling: Scaling,
}

/// One damage pool, one target save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSaveRules {
    pub dice: DiceSpec,
    #[serde(default)]
    pub scaling: Scaling,
    #[serde(default)]
    pub flat_bonus: i32,
    pub default_dc: i32,
    pub save_attribute: Attribute,
    pub save_effect: SaveEffect,
}

/// Dragon age for breath presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragonAge {
    Young,
    Adult,
    Ancient,
}

impl DragonAge {
    pub fn label(&self) -> &'static str {
        match self {
            DragonAge::Young => "Young",
            DragonAge::Adult => "Adult",
            DragonAge::Ancient => "Ancient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathPreset {
    pub age: DragonAge,
    pub dice: DiceSpec,
    pub dc: i32,
}

/// Area save with age presets and a caller-chosen element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathRules {
    pub presets: Vec<BreathPreset>,
    pub save_attribute: Attribute,
    pub save_effect: SaveEffect,
}

impl BreathRules {
    pub fn preset(&self, age: DragonAge) -> Option<&BreathPreset> {
        self.presets.iter().find(|p| p.age == age)
    }
}

/// Every target saves and takes damage independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTargetSaveRules {
    pub dice: DiceSpec,
    #[serde(default)]
    pub scaling: Scaling,
    pub default_dc: i32,
    pub save_attribute: Attribute,
    pub save_effect: SaveEffect,
    #[serde(default = "default_max_targets")]
    pub max_targets: u32,
}

fn default_max_targets() -> u32 {
    10
}

/// Attack against an explicit armor class that deals the curse die on a hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurseRules {
    pub curse_die: DiceSpec,
}

/// Strike now, detonate later
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoPhaseRules {
    pub strike_dice: DiceSpec,
    #[serde(default)]
    pub strike_bonus: i32,
    pub strike_damage_type: DamageType,
    #[serde(default)]
    pub strike_hit_rule: HitRuleKind,
    pub activation_dice: DiceSpec,
    pub default_dc: i32,
    pub save_attribute: Attribute,
}

/// Family payload of an ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum AbilityRules {
    Strike(StrikeRules),
    MultiAttack(MultiAttackRules),
    AutoHit(AutoHitRules),
    AreaSave(AreaSaveRules),
    Breath(BreathRules),
    MultiTargetSave(MultiTargetSaveRules),
    Curse(CurseRules),
    TwoPhase(TwoPhaseRules),
}

/// Ability family tag, for messages and grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityFamily {
    Strike,
    MultiAttack,
    AutoHit,
    AreaSave,
    Breath,
    MultiTargetSave,
    Curse,
    TwoPhase,
}

impl fmt::Display for AbilityFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbilityFamily::Strike => "strike",
            AbilityFamily::MultiAttack => "multi-attack",
            AbilityFamily::AutoHit => "auto-hit",
            AbilityFamily::AreaSave => "area-save",
            AbilityFamily::Breath => "breath",
            AbilityFamily::MultiTargetSave => "multi-target-save",
            AbilityFamily::Curse => "curse",
            AbilityFamily::TwoPhase => "two-phase",
        };
        f.write_str(name)
    }
}

impl AbilityRules {
    pub fn family(&self) -> AbilityFamily {
        match self {
            AbilityRules::Strike(_) => AbilityFamily::Strike,
            AbilityRules::MultiAttack(_) => AbilityFamily::MultiAttack,
            AbilityRules::AutoHit(_) => AbilityFamily::AutoHit,
            AbilityRules::AreaSave(_) => AbilityFamily::AreaSave,
            AbilityRules::Breath(_) => AbilityFamily::Breath,
            AbilityRules::MultiTargetSave(_) => AbilityFamily::MultiTargetSave,
            AbilityRules::Curse(_) => AbilityFamily::Curse,
            AbilityRules::TwoPhase(_) => AbilityFamily::TwoPhase,
        }
    }
}

/// Static configuration of one ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityConfig {
    pub action: ActionId,
    /// Display name
    pub name: String,
    pub damage_type: DamageType,
    /// Slot, spell or character level range accepted by the resolver
    #[serde(default = "default_level")]
    pub min_level: u32,
    #[serde(default = "default_level")]
    pub max_level: u32,
    pub rules: AbilityRules,
}

fn default_level() -> u32 {
    1
}

impl AbilityConfig {
    pub fn family(&self) -> AbilityFamily {
        self.rules.family()
    }

    /// Base damage dice before level scaling
    pub fn base_dice(&self) -> Option<DiceSpec> {
        match &self.rules {
            AbilityRules::Strike(r) => r.feature_dice.or(r.weapon_dice),
            AbilityRules::MultiAttack(r) => Some(r.hit_dice),
            AbilityRules::AutoHit(r) => Some(r.missile_die.with_count(r.missiles)),
            AbilityRules::AreaSave(r) => Some(r.dice),
            AbilityRules::Breath(r) => r.presets.first().map(|p| p.dice),
            AbilityRules::MultiTargetSave(r) => Some(r.dice),
            AbilityRules::Curse(r) => Some(r.curse_die),
            AbilityRules::TwoPhase(r) => Some(r.activation_dice),
        }
    }

    pub fn requires_attack_roll(&self) -> bool {
        matches!(
            self.rules,
            AbilityRules::Strike(_)
                | AbilityRules::MultiAttack(_)
                | AbilityRules::Curse(_)
                | AbilityRules::TwoPhase(_)
        )
    }

    pub fn default_dc(&self) -> Option<i32> {
        match &self.rules {
            AbilityRules::AreaSave(r) => Some(r.default_dc),
            AbilityRules::Breath(r) => r.presets.first().map(|p| p.dc),
            AbilityRules::MultiTargetSave(r) => Some(r.default_dc),
            AbilityRules::TwoPhase(r) => Some(r.default_dc),
            _ => None,
        }
    }

    pub fn save_attribute(&self) -> Option<Attribute> {
        match &self.rules {
            AbilityRules::Strike(r) => r.stun_save.map(|s| s.attribute),
            AbilityRules::AreaSave(r) => Some(r.save_attribute),
            AbilityRules::Breath(r) => Some(r.save_attribute),
            AbilityRules::MultiTargetSave(r) => Some(r.save_attribute),
            AbilityRules::TwoPhase(r) => Some(r.save_attribute),
            _ => None,
        }
    }

    pub fn save_effect(&self) -> Option<SaveEffect> {
        match &self.rules {
            AbilityRules::AreaSave(r) => Some(r.save_effect),
            AbilityRules::Breath(r) => Some(r.save_effect),
            AbilityRules::MultiTargetSave(r) => Some(r.save_effect),
            _ => None,
        }
    }

    /// Reject levels outside the configured range
    pub fn check_level(&self, level: u32) -> Result<(), CombatError> {
        if level < self.min_level || level > self.max_level {
            return Err(CombatError::invalid(format!(
                "{} accepts levels {}..={}, got {}",
                self.action, self.min_level, self.max_level, level
            )));
        }
        Ok(())
    }

    /// The scaled primary dice pool at a level
    pub fn dice_for_level(&self, level: u32) -> Result<DiceSpec, CombatError> {
        self.check_level(level)?;
        let scaled = match &self.rules {
            AbilityRules::Strike(r) => r
                .feature_dice
                .map(|d| d.with_count(r.scaling.count(d.count, level)))
                .or(r.weapon_dice),
            AbilityRules::MultiAttack(r) => Some(r.hit_dice),
            AbilityRules::AutoHit(r) => Some(r.missile_die.with_count(r.scaling.count(r.missiles, level))),
            AbilityRules::AreaSave(r) => Some(r.dice.with_count(r.scaling.count(r.dice.count, level))),
            AbilityRules::MultiTargetSave(r) => Some(r.dice.with_count(r.scaling.count(r.dice.count, level))),
            AbilityRules::Breath(r) => r.presets.first().map(|p| p.dice),
            AbilityRules::Curse(r) => Some(r.curse_die),
            AbilityRules::TwoPhase(r) => Some(r.activation_dice),
        };
        scaled.ok_or_else(|| CombatError::invalid(format!("{} has no damage dice", self.action)))
    }

    /// Check internal consistency of a table entry
    pub fn validate(&self) -> Result<(), CombatError> {
        if self.min_level == 0 || self.min_level > self.max_level {
            return Err(CombatError::invalid(format!(
                "{}: bad level range {}..={}",
                self.action, self.min_level, self.max_level
            )));
        }
        let mut pools = Vec::new();
        match &self.rules {
            AbilityRules::Strike(r) => {
                if r.weapon_dice.is_none() && r.feature_dice.is_none() {
                    return Err(CombatError::invalid(format!("{}: strike without dice", self.action)));
                }
                pools.extend(r.weapon_dice);
                pools.extend(r.feature_dice);
            }
            AbilityRules::MultiAttack(r) => {
                if r.attacks == 0 {
                    return Err(CombatError::invalid(format!("{}: zero attacks", self.action)));
                }
                pools.push(r.hit_dice);
            }
            AbilityRules::AutoHit(r) => pools.push(r.missile_die),
            AbilityRules::AreaSave(r) => pools.push(r.dice),
            AbilityRules::Breath(r) => {
                if r.presets.is_empty() {
                    return Err(CombatError::invalid(format!("{}: no breath presets", self.action)));
                }
                pools.extend(r.presets.iter().map(|p| p.dice));
            }
            AbilityRules::MultiTargetSave(r) => pools.push(r.dice),
            AbilityRules::Curse(r) => pools.push(r.curse_die),
            AbilityRules::TwoPhase(r) => {
                pools.push(r.strike_dice);
                pools.push(r.activation_dice);
            }
        }
        for pool in pools {
            pool.validate()?;
        }
        Ok(())
    }
}
