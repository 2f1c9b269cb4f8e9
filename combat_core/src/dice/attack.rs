//! Attack-roll resolution shared by every ability that must hit a target

use super::DiceSource;
use serde::{Deserialize, Serialize};

/// Faces that matter on an attack die
pub const D20: u32 = 20;
pub const NATURAL_CRITICAL: u32 = 20;
pub const NATURAL_FUMBLE: u32 = 1;

/// How a pair of d20 rolls collapses to one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl RollMode {
    /// Pick the kept value from two raw rolls
    pub fn choose(&self, first: u32, second: u32) -> u32 {
        match self {
            RollMode::Normal => first,
            RollMode::Advantage => first.max(second),
            RollMode::Disadvantage => first.min(second),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RollMode::Normal => "normal",
            RollMode::Advantage => "advantage",
            RollMode::Disadvantage => "disadvantage",
        }
    }
}

/// When a non-critical attack misses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "armor_class", rename_all = "snake_case")]
pub enum HitRule {
    /// Only a natural 1 misses
    NaturalOnly,
    /// A natural 1, or a total below the given armor class, misses
    ArmorClass(i32),
}

impl HitRule {
    pub fn threshold(&self) -> Option<i32> {
        match self {
            HitRule::NaturalOnly => None,
            HitRule::ArmorClass(ac) => Some(*ac),
        }
    }
}

/// One resolved attack roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub mode: RollMode,
    /// Raw d20 faces in roll order (two under advantage/disadvantage)
    pub rolls: Vec<u32>,
    /// The kept raw face
    pub natural: u32,
    pub modifier: i32,
    pub total: i32,
    /// Armor class the total was compared against, if any
    pub threshold: Option<i32>,
    pub is_critical: bool,
    pub is_miss: bool,
}

impl AttackRoll {
    /// Build an attack roll from raw faces already rolled
    pub fn from_rolls(mode: RollMode, rolls: Vec<u32>, modifier: i32, rule: HitRule) -> Self {
        let first = rolls.first().copied().unwrap_or(NATURAL_FUMBLE);
        let second = rolls.get(1).copied().unwrap_or(first);
        let natural = mode.choose(first, second);
        let total = natural as i32 + modifier;
        let is_critical = natural == NATURAL_CRITICAL;
        let below_threshold = match rule {
            HitRule::NaturalOnly => false,
            HitRule::ArmorClass(ac) => total < ac,
        };
        let is_miss = natural == NATURAL_FUMBLE || (!is_critical && below_threshold);

        AttackRoll {
            mode,
            rolls,
            natural,
            modifier,
            total,
            threshold: rule.threshold(),
            is_critical,
            is_miss,
        }
    }

    pub fn is_hit(&self) -> bool {
        !self.is_miss
    }

    /// The raw face dropped by advantage/disadvantage
    pub fn discarded(&self) -> Option<u32> {
        match self.rolls.as_slice() {
            [first, second] if *first == self.natural => Some(*second),
            [first, _] => Some(*first),
            _ => None,
        }
    }
}

/// Roll a d20 attack (two under advantage/disadvantage) and classify it
pub fn resolve_attack_roll(
    mode: RollMode,
    modifier: i32,
    rule: HitRule,
    dice: &mut impl DiceSource,
) -> AttackRoll {
    let rolls = match mode {
        RollMode::Normal => vec![dice.roll_die(D20)],
        RollMode::Advantage | RollMode::Disadvantage => {
            vec![dice.roll_die(D20), dice.roll_die(D20)]
        }
    };
    AttackRoll::from_rolls(mode, rolls, modifier, rule)
}
