//! General-purpose roller: NdS with a modifier and optional advantage

use super::attack::{RollMode, D20, NATURAL_CRITICAL, NATURAL_FUMBLE};
use super::{DiceSource, DiceSpec};
use crate::error::CombatError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the modifier is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierMode {
    /// Added to every die
    Each,
    /// Added once to the sum
    #[default]
    Total,
}

/// A roll the caller wants performed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRequest {
    pub count: u32,
    pub sides: u32,
    #[serde(default)]
    pub modifier: i32,
    #[serde(default)]
    pub modifier_mode: ModifierMode,
    #[serde(default)]
    pub roll_mode: RollMode,
}

impl RollRequest {
    pub fn new(count: u32, sides: u32) -> Self {
        RollRequest {
            count,
            sides,
            modifier: 0,
            modifier_mode: ModifierMode::Total,
            roll_mode: RollMode::Normal,
        }
    }

    pub fn with_modifier(mut self, modifier: i32, mode: ModifierMode) -> Self {
        self.modifier = modifier;
        self.modifier_mode = mode;
        self
    }

    pub fn with_roll_mode(mut self, mode: RollMode) -> Self {
        self.roll_mode = mode;
        self
    }

    fn validate(&self) -> Result<(), CombatError> {
        if self.count == 0 {
            return Err(CombatError::invalid("roll count must be at least 1"));
        }
        if self.sides < 2 {
            return Err(CombatError::invalid(format!(
                "die must have at least 2 sides, got {}",
                self.sides
            )));
        }
        Ok(())
    }

    /// Advantage/disadvantage only changes anything for d20 rolls
    fn uses_two_sets(&self) -> bool {
        self.sides == D20 && self.roll_mode != RollMode::Normal
    }

    fn apply_modifier(&self, rolls: &[u32]) -> i32 {
        let sum: i32 = rolls.iter().map(|r| *r as i32).sum();
        match self.modifier_mode {
            ModifierMode::Total => sum + self.modifier,
            ModifierMode::Each => sum + self.modifier * rolls.len() as i32,
        }
    }
}

/// How a single d20 landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NaturalResult {
    Critical,
    Fumble,
    Normal,
}

/// A completed roll as stored in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
    pub modifier_mode: ModifierMode,
    pub roll_mode: RollMode,
    /// The kept dice
    pub rolls: Vec<u32>,
    pub total: i32,
    /// Both sets when advantage/disadvantage applied
    pub advantage_sets: Option<[Vec<u32>; 2]>,
    pub chosen_index: Option<usize>,
}

impl RollRecord {
    pub fn is_d20(&self) -> bool {
        self.sides == D20
    }

    /// The set that counted (same as `rolls`)
    pub fn chosen_rolls(&self) -> &[u32] {
        match (&self.advantage_sets, self.chosen_index) {
            (Some(sets), Some(index)) => sets.get(index).map(Vec::as_slice).unwrap_or(self.rolls.as_slice()),
            _ => &self.rolls,
        }
    }

    /// Whether the kept dice show a given face
    pub fn contains_face(&self, face: u32) -> bool {
        self.chosen_rolls().contains(&face)
    }

    /// Classify a single-die d20 roll; anything else is `Normal`
    pub fn natural_result(&self) -> NaturalResult {
        if !self.is_d20() || self.count != 1 {
            return NaturalResult::Normal;
        }
        match self.chosen_rolls().first() {
            Some(&NATURAL_CRITICAL) => NaturalResult::Critical,
            Some(&NATURAL_FUMBLE) => NaturalResult::Fumble,
            _ => NaturalResult::Normal,
        }
    }

    /// Formula label, e.g. `2d6+3`
    pub fn formula(&self) -> String {
        let base = DiceSpec::new(self.count, self.sides).to_string();
        match (self.modifier, self.modifier_mode) {
            (0, _) => base,
            (m, ModifierMode::Total) => format!("{base}{m:+}"),
            (m, ModifierMode::Each) => format!("{base} ({m:+} each)"),
        }
    }

    /// Kept dice as `[a,b,c]`
    pub fn detail(&self) -> String {
        let faces: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        format!("[{}]", faces.join(","))
    }
}

/// Perform a general roll
pub fn roll_dice(request: &RollRequest, dice: &mut impl DiceSource) -> Result<RollRecord, CombatError> {
    request.validate()?;
    let spec = DiceSpec::new(request.count, request.sides);

    let (rolls, advantage_sets, chosen_index) = if request.uses_two_sets() {
        let first = spec.roll(dice);
        let second = spec.roll(dice);
        let first_sum: u32 = first.iter().sum();
        let second_sum: u32 = second.iter().sum();
        let index = match request.roll_mode {
            RollMode::Advantage if second_sum > first_sum => 1,
            RollMode::Disadvantage if second_sum < first_sum => 1,
            _ => 0,
        };
        let sets = [first, second];
        (sets[index].clone(), Some(sets), Some(index))
    } else {
        (spec.roll(dice), None, None)
    };

    let total = request.apply_modifier(&rolls);
    tracing::debug!(
        formula = %spec,
        mode = request.roll_mode.label(),
        total,
        "general roll"
    );

    Ok(RollRecord {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        count: request.count,
        sides: request.sides,
        modifier: request.modifier,
        modifier_mode: request.modifier_mode,
        roll_mode: request.roll_mode,
        rolls,
        total,
        advantage_sets,
        chosen_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn test_total_modifier() {
        let mut dice = ScriptedDice::new(vec![2, 5]);
        let request = RollRequest::new(2, 6).with_modifier(3, ModifierMode::Total);
        let record = roll_dice(&request, &mut dice).unwrap();
        assert_eq!(record.rolls, vec![2, 5]);
        assert_eq!(record.total, 10);
        assert_eq!(record.formula(), "2d6+3");
    }

    #[test]
    fn test_each_modifier() {
        let mut dice = ScriptedDice::new(vec![2, 5]);
        let request = RollRequest::new(2, 6).with_modifier(-1, ModifierMode::Each);
        let record = roll_dice(&request, &mut dice).unwrap();
        assert_eq!(record.total, 5);
    }

    #[test]
    fn test_advantage_on_d20_keeps_larger_set() {
        let mut dice = ScriptedDice::new(vec![7, 18]);
        let request = RollRequest::new(1, 20).with_roll_mode(RollMode::Advantage);
        let record = roll_dice(&request, &mut dice).unwrap();
        assert_eq!(record.rolls, vec![18]);
        assert_eq!(record.chosen_index, Some(1));
        assert_eq!(record.advantage_sets, Some([vec![7], vec![18]]));
    }

    #[test]
    fn test_disadvantage_tie_keeps_first_set() {
        let mut dice = ScriptedDice::new(vec![9, 9]);
        let request = RollRequest::new(1, 20).with_roll_mode(RollMode::Disadvantage);
        let record = roll_dice(&request, &mut dice).unwrap();
        assert_eq!(record.chosen_index, Some(0));
    }

    #[test]
    fn test_advantage_ignored_off_d20() {
        let mut dice = ScriptedDice::new(vec![3, 6]);
        let request = RollRequest::new(1, 8).with_roll_mode(RollMode::Advantage);
        let record = roll_dice(&request, &mut dice).unwrap();
        assert!(record.advantage_sets.is_none());
        assert_eq!(dice.consumed(), 1);
    }

    #[test]
    fn test_natural_result() {
        let mut dice = ScriptedDice::new(vec![20, 1]);
        let crit = roll_dice(&RollRequest::new(1, 20), &mut dice).unwrap();
        let fumble = roll_dice(&RollRequest::new(1, 20), &mut dice).unwrap();
        assert_eq!(crit.natural_result(), NaturalResult::Critical);
        assert_eq!(fumble.natural_result(), NaturalResult::Fumble);
    }

    #[test]
    fn test_rejects_bad_requests() {
        let mut dice = ScriptedDice::default();
        assert!(roll_dice(&RollRequest::new(0, 6), &mut dice).is_err());
        assert!(roll_dice(&RollRequest::new(1, 1), &mut dice).is_err());
        assert_eq!(dice.consumed(), 0);
    }
}
