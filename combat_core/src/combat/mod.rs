//! Combat - resolved ability outcomes

mod result;

pub use result::{CombatResult, DamageRoll, SaveOutcome, TargetOutcome};
