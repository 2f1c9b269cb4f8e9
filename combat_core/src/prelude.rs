//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Dice
pub use crate::dice::{thread_dice, DiceSource, DiceSpec, HitRule, RngDice, RollMode, RollRequest, ScriptedDice};

// Abilities
pub use crate::ability::{
    resolve_ability, resolve_ability_with_dice, AbilityParams, ActionId, AreaSaveParams, AutoHitParams,
    BreathParams, BreathSize, CurseParams, DragonAge, MultiAttackParams, MultiTargetSaveParams, PalmPhase,
    StrikeParams,
};

// Results
pub use crate::combat::{CombatResult, DamageRoll};
pub use crate::history::{History, SharedHistory};

// Config
pub use crate::config::{default_abilities, AbilityTable, EngineSettings};

// Core types
pub use crate::error::CombatError;
pub use crate::types::{Attribute, DamageType, SaveEffect};
