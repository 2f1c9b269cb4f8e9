//! combat_core - Dice rolling and tabletop combat resolution
//!
//! This library provides:
//! - Dice: entropy sources, the general roller and attack rolls
//! - AbilityTable: per-ability rules loaded from TOML
//! - Resolvers: one per ability family, producing a CombatResult
//! - History and statistics over rolls and results
//! - Characters and initiative tracking for the session layer

pub mod ability;
pub mod character;
pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod export;
pub mod history;
pub mod initiative;
pub mod prelude;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use ability::{resolve_ability, resolve_ability_named, resolve_ability_with_dice, AbilityConfig, AbilityParams, ActionId};
pub use combat::{CombatResult, DamageRoll, SaveOutcome, TargetOutcome};
pub use config::{default_abilities, AbilityTable, ConfigError, EngineSettings};
pub use dice::{roll_dice, roll_die, roll_multiple, DiceSource, DiceSpec, RollMode, RollRecord, RollRequest};
pub use error::CombatError;
pub use history::{History, SharedHistory};
pub use types::{Attribute, DamageType, SaveEffect};
