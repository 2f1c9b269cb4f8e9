//! Derived statistics over roll and combat history
//!
//! Everything here recomputes from scratch and never mutates its input.

use crate::combat::CombatResult;
use crate::dice::{RollRecord, D20, NATURAL_CRITICAL, NATURAL_FUMBLE};
use serde::{Deserialize, Serialize};

/// `100 * matching / total`, or 0 for an empty population
pub fn percent(matching: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * matching as f64 / total as f64
}

/// Expected percentage of one face on a fair die
pub fn theoretical_percent(sides: u32) -> f64 {
    if sides == 0 {
        return 0.0;
    }
    100.0 / sides as f64
}

/// How often a predicate held, compared to a fair die face
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RollStatistics {
    pub total: usize,
    pub matching: usize,
    pub percent: f64,
    pub theoretical: f64,
    /// percent - theoretical
    pub deviation: f64,
}

pub fn compute_statistics<T>(records: &[T], predicate: impl Fn(&T) -> bool, sides: u32) -> RollStatistics {
    let matching = records.iter().filter(|r| predicate(r)).count();
    let percent = percent(matching, records.len());
    let theoretical = theoretical_percent(sides);
    RollStatistics {
        total: records.len(),
        matching,
        percent,
        theoretical,
        deviation: percent - theoretical,
    }
}

/// Critical/fumble counts over the d20 rolls of a history
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct D20Summary {
    pub total_rolls: usize,
    pub d20_rolls: usize,
    pub criticals: usize,
    pub fumbles: usize,
    pub critical_percent: f64,
    pub fumble_percent: f64,
}

/// A d20 roll counts as critical (fumble) when its kept set shows a 20 (1)
pub fn d20_summary(records: &[RollRecord]) -> D20Summary {
    let d20: Vec<&RollRecord> = records.iter().filter(|r| r.sides == D20).collect();
    let criticals = d20.iter().filter(|r| r.contains_face(NATURAL_CRITICAL)).count();
    let fumbles = d20.iter().filter(|r| r.contains_face(NATURAL_FUMBLE)).count();
    D20Summary {
        total_rolls: records.len(),
        d20_rolls: d20.len(),
        criticals,
        fumbles,
        critical_percent: percent(criticals, d20.len()),
        fumble_percent: percent(fumbles, d20.len()),
    }
}

/// One face of a frequency table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceFrequency {
    pub face: u32,
    pub count: usize,
    pub percent: f64,
    pub theoretical: f64,
    pub deviation: f64,
}

/// Count of every face 1..=sides over a batch of raw values
pub fn frequency_table(values: &[u32], sides: u32) -> Vec<FaceFrequency> {
    let theoretical = theoretical_percent(sides);
    (1..=sides)
        .map(|face| {
            let count = values.iter().filter(|v| **v == face).count();
            let percent = percent(count, values.len());
            FaceFrequency {
                face,
                count,
                percent,
                theoretical,
                deviation: percent - theoretical,
            }
        })
        .collect()
}

/// Aggregate over resolved abilities
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CombatSummary {
    pub count: usize,
    pub criticals: usize,
    pub misses: usize,
    pub lethal: usize,
    pub total_damage: i64,
    pub average_damage: f64,
}

pub fn combat_summary(results: &[CombatResult]) -> CombatSummary {
    let total_damage: i64 = results.iter().map(|r| r.damage.total as i64).sum();
    let average_damage = if results.is_empty() {
        0.0
    } else {
        total_damage as f64 / results.len() as f64
    };
    CombatSummary {
        count: results.len(),
        criticals: results.iter().filter(|r| r.is_critical).count(),
        misses: results.iter().filter(|r| r.is_miss).count(),
        lethal: results.iter().filter(|r| r.lethal).count(),
        total_damage,
        average_damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{roll_dice, RollMode, RollRequest, ScriptedDice};
    use proptest::prelude::*;

    fn d20(face: u32) -> RollRecord {
        let mut dice = ScriptedDice::new(vec![face]);
        roll_dice(&RollRequest::new(1, 20), &mut dice).unwrap()
    }

    #[test]
    fn test_empty_history_is_zero() {
        let records: Vec<RollRecord> = Vec::new();
        let stats = compute_statistics(&records, |r| r.is_d20(), 20);
        assert_eq!(stats.total, 0);
        assert!(stats.percent.abs() < f64::EPSILON);
        assert!((stats.deviation + 5.0).abs() < f64::EPSILON);

        let summary = d20_summary(&records);
        assert_eq!(summary.d20_rolls, 0);
        assert!(summary.critical_percent.abs() < f64::EPSILON);
        assert!(combat_summary(&[]).average_damage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_d20_summary_counts() {
        let records = vec![d20(20), d20(1), d20(10), d20(20)];
        let summary = d20_summary(&records);
        assert_eq!(summary.criticals, 2);
        assert_eq!(summary.fumbles, 1);
        assert!((summary.critical_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_d20_summary_uses_kept_set() {
        let mut dice = ScriptedDice::new(vec![1, 15]);
        let request = RollRequest::new(1, 20).with_roll_mode(RollMode::Advantage);
        let record = roll_dice(&request, &mut dice).unwrap();
        let summary = d20_summary(&[record]);
        assert_eq!(summary.fumbles, 0);
    }

    #[test]
    fn test_frequency_table() {
        let table = frequency_table(&[1, 1, 2, 4], 4);
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].count, 2);
        assert!((table[0].percent - 50.0).abs() < f64::EPSILON);
        assert!((table[0].deviation - 25.0).abs() < f64::EPSILON);
        assert_eq!(table[2].count, 0);
    }

    proptest! {
        #[test]
        fn prop_percent_in_range(total in 0usize..1000, matching in 0usize..1000) {
            let matching = matching.min(total);
            let p = percent(matching, total);
            prop_assert!((0.0..=100.0).contains(&p));
        }

        #[test]
        fn prop_deviation_is_difference(faces in prop::collection::vec(1u32..=20, 1..200)) {
            let records: Vec<RollRecord> = faces.iter().map(|f| d20(*f)).collect();
            let stats = compute_statistics(&records, |r| r.contains_face(20), 20);
            prop_assert!((stats.deviation - (stats.percent - 5.0)).abs() < 1e-9);
        }
    }
}
