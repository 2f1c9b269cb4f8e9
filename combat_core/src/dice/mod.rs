//! Dice - entropy source, die rolls, attack rolls and the general roller

mod attack;
mod roll;
mod source;

pub use attack::{resolve_attack_roll, AttackRoll, HitRule, RollMode, D20, NATURAL_CRITICAL, NATURAL_FUMBLE};
pub use roll::{roll_dice, ModifierMode, NaturalResult, RollRecord, RollRequest};
pub use source::{thread_dice, DiceSource, RngDice, ScriptedDice};

use crate::error::CombatError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pool of identical dice, e.g. `3d8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceSpec {
    pub count: u32,
    pub sides: u32,
}

impl DiceSpec {
    /// Die sizes offered for quick rolls
    pub const QUICK_SIDES: [u32; 6] = [20, 4, 6, 8, 10, 12];

    pub fn new(count: u32, sides: u32) -> Self {
        DiceSpec { count, sides }
    }

    /// Same dice, twice as many (critical hits)
    pub fn doubled(&self) -> Self {
        DiceSpec::new(self.count * 2, self.sides)
    }

    pub fn with_count(&self, count: u32) -> Self {
        DiceSpec::new(count, self.sides)
    }

    pub fn validate(&self) -> Result<(), CombatError> {
        if self.sides < 1 {
            return Err(CombatError::invalid(format!("{self} has no sides")));
        }
        Ok(())
    }

    /// Roll the pool in order; callers validate first
    pub fn roll(&self, dice: &mut impl DiceSource) -> Vec<u32> {
        (0..self.count).map(|_| dice.roll_die(self.sides)).collect()
    }

    /// Mean of the pool
    pub fn average(&self) -> f64 {
        self.count as f64 * (self.sides as f64 + 1.0) / 2.0
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Roll one die with `sides` faces
pub fn roll_die(dice: &mut impl DiceSource, sides: u32) -> Result<u32, CombatError> {
    if sides < 1 {
        return Err(CombatError::invalid("die must have at least 1 side"));
    }
    Ok(dice.roll_die(sides))
}

/// Roll `count` independent dice, preserving roll order
pub fn roll_multiple(dice: &mut impl DiceSource, count: u32, sides: u32) -> Result<Vec<u32>, CombatError> {
    let spec = DiceSpec::new(count, sides);
    spec.validate()?;
    Ok(spec.roll(dice))
}

/// Sum of faces as a signed damage value
pub fn sum(rolls: &[u32]) -> i32 {
    rolls.iter().map(|r| *r as i32).sum()
}
