//! DiceSource - the single entropy seam of the engine

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Anything that can roll a single die
///
/// Resolvers validate `sides` before calling, so implementations may assume
/// `sides >= 1`.
pub trait DiceSource {
    /// Roll one die, returning a face in `[1, sides]`
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// Uniform dice backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        RngDice { rng }
    }

    /// Get the wrapped generator back
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngDice<StdRng> {
    /// Deterministic dice for replays and tests
    pub fn seeded(seed: u64) -> Self {
        RngDice::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DiceSource for RngDice<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }
}

/// Dice backed by the thread-local generator
///
/// Each thread owns its generator, so concurrent callers never contend.
pub fn thread_dice() -> RngDice<ThreadRng> {
    RngDice::new(rand::thread_rng())
}

/// Replays a fixed sequence of faces
///
/// Each value is clamped into `[1, sides]` of the die being rolled. Once the
/// script is exhausted the last value repeats (1 for an empty script).
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: Vec<u32>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(script: impl Into<Vec<u32>>) -> Self {
        ScriptedDice {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Number of dice rolled so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Scripted values not yet rolled
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let value = self
            .script
            .get(self.cursor)
            .or_else(|| self.script.last())
            .copied()
            .unwrap_or(1);
        self.cursor += 1;
        value.clamp(1, sides.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replays_in_order() {
        let mut dice = ScriptedDice::new(vec![3, 17, 20]);
        assert_eq!(dice.roll_die(20), 3);
        assert_eq!(dice.roll_die(20), 17);
        assert_eq!(dice.roll_die(20), 20);
        assert_eq!(dice.consumed(), 3);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_scripted_clamps_and_repeats() {
        let mut dice = ScriptedDice::new(vec![12]);
        assert_eq!(dice.roll_die(6), 6);
        assert_eq!(dice.roll_die(20), 12);
        assert_eq!(ScriptedDice::default().roll_die(8), 1);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RngDice::seeded(7);
        let mut b = RngDice::seeded(7);
        let left: Vec<u32> = (0..32).map(|_| a.roll_die(20)).collect();
        let right: Vec<u32> = (0..32).map(|_| b.roll_die(20)).collect();
        assert_eq!(left, right);
    }
}
