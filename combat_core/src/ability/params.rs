//! Per-family call parameters

use super::rules::{AbilityFamily, DragonAge};
use crate::dice::{DiceSpec, RollMode};
use crate::types::{Attribute, DamageType};
use serde::{Deserialize, Serialize};

/// Single-strike parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeParams {
    pub level: u32,
    pub attack_modifier: i32,
    pub roll_mode: RollMode,
    /// Armor class to beat; ignored by natural-only abilities
    pub target_ac: i32,
    #[serde(default)]
    pub target_is_undead: bool,
    #[serde(default)]
    pub power_attack: bool,
    /// Target bonus on saves the strike forces
    #[serde(default)]
    pub target_save_modifier: i32,
}

impl StrikeParams {
    pub fn new(level: u32, attack_modifier: i32, target_ac: i32) -> Self {
        StrikeParams {
            level,
            attack_modifier,
            roll_mode: RollMode::Normal,
            target_ac,
            target_is_undead: false,
            power_attack: false,
            target_save_modifier: 0,
        }
    }

    pub fn with_roll_mode(mut self, mode: RollMode) -> Self {
        self.roll_mode = mode;
        self
    }

    pub fn against_undead(mut self) -> Self {
        self.target_is_undead = true;
        self
    }

    pub fn with_power_attack(mut self) -> Self {
        self.power_attack = true;
        self
    }

    pub fn with_target_save_modifier(mut self, modifier: i32) -> Self {
        self.target_save_modifier = modifier;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiAttackParams {
    pub level: u32,
    /// Attacks to make; None uses the maximum for the level
    #[serde(default)]
    pub attacks: Option<u32>,
    pub attack_modifier: i32,
    pub roll_mode: RollMode,
    pub target_ac: i32,
}

impl MultiAttackParams {
    pub fn new(level: u32, attack_modifier: i32, target_ac: i32) -> Self {
        MultiAttackParams {
            level,
            attacks: None,
            attack_modifier,
            roll_mode: RollMode::Normal,
            target_ac,
        }
    }

    pub fn with_attacks(mut self, attacks: u32) -> Self {
        self.attacks = Some(attacks);
        self
    }

    pub fn with_roll_mode(mut self, mode: RollMode) -> Self {
        self.roll_mode = mode;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoHitParams {
    pub level: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSaveParams {
    /// Spell level; None casts at the lowest level
    #[serde(default)]
    pub level: Option<u32>,
    /// Overrides the scaled dice count
    #[serde(default)]
    pub dice_count: Option<u32>,
    #[serde(default)]
    pub save_dc: Option<i32>,
    #[serde(default)]
    pub target_save_modifier: i32,
}

impl AreaSaveParams {
    pub fn at_level(level: u32) -> Self {
        AreaSaveParams {
            level: Some(level),
            ..Default::default()
        }
    }

    pub fn with_dice_count(mut self, count: u32) -> Self {
        self.dice_count = Some(count);
        self
    }

    pub fn with_save_dc(mut self, dc: i32) -> Self {
        self.save_dc = Some(dc);
        self
    }

    pub fn with_target_save_modifier(mut self, modifier: i32) -> Self {
        self.target_save_modifier = modifier;
        self
    }
}

/// Breath strength: an age preset or explicit dice and DC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathSize {
    Preset(DragonAge),
    Custom { dice: DiceSpec, dc: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathParams {
    pub size: BreathSize,
    /// One of the breath elements
    pub element: DamageType,
    #[serde(default)]
    pub target_save_modifier: i32,
}

impl BreathParams {
    pub fn new(size: BreathSize, element: DamageType, target_save_modifier: i32) -> Self {
        BreathParams {
            size,
            element,
            target_save_modifier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiTargetSaveParams {
    pub level: u32,
    pub targets: u32,
    #[serde(default)]
    pub save_dc: Option<i32>,
    #[serde(default)]
    pub target_save_modifier: i32,
}

impl MultiTargetSaveParams {
    pub fn new(level: u32, targets: u32) -> Self {
        MultiTargetSaveParams {
            level,
            targets,
            save_dc: None,
            target_save_modifier: 0,
        }
    }

    pub fn with_save_dc(mut self, dc: i32) -> Self {
        self.save_dc = Some(dc);
        self
    }

    pub fn with_target_save_modifier(mut self, modifier: i32) -> Self {
        self.target_save_modifier = modifier;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurseParams {
    /// Attribute the target is hexed on
    pub attribute: Attribute,
    pub attack_modifier: i32,
    pub roll_mode: RollMode,
    pub target_ac: i32,
}

impl CurseParams {
    pub fn new(attribute: Attribute, attack_modifier: i32, target_ac: i32) -> Self {
        CurseParams {
            attribute,
            attack_modifier,
            roll_mode: RollMode::Normal,
            target_ac,
        }
    }
}

/// Phase of a two-phase ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PalmPhase {
    Strike {
        attack_modifier: i32,
        roll_mode: RollMode,
        target_ac: i32,
    },
    Activate {
        save_dc: Option<i32>,
        target_save_modifier: i32,
    },
}

/// Parameters for one resolution, one variant per family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum AbilityParams {
    Strike(StrikeParams),
    MultiAttack(MultiAttackParams),
    AutoHit(AutoHitParams),
    AreaSave(AreaSaveParams),
    Breath(BreathParams),
    MultiTargetSave(MultiTargetSaveParams),
    Curse(CurseParams),
    TwoPhase(PalmPhase),
}

impl AbilityParams {
    pub fn family(&self) -> AbilityFamily {
        match self {
            AbilityParams::Strike(_) => AbilityFamily::Strike,
            AbilityParams::MultiAttack(_) => AbilityFamily::MultiAttack,
            AbilityParams::AutoHit(_) => AbilityFamily::AutoHit,
            AbilityParams::AreaSave(_) => AbilityFamily::AreaSave,
            AbilityParams::Breath(_) => AbilityFamily::Breath,
            AbilityParams::MultiTargetSave(_) => AbilityFamily::MultiTargetSave,
            AbilityParams::Curse(_) => AbilityFamily::Curse,
            AbilityParams::TwoPhase(_) => AbilityFamily::TwoPhase,
        }
    }
}
