//! Flat CSV export of history for renderers

use crate::combat::CombatResult;
use crate::dice::RollRecord;
use crate::stats::{percent, theoretical_percent, FaceFrequency};
use chrono::{DateTime, Utc};
use std::fmt::Write;

fn time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

fn faces(rolls: &[u32]) -> String {
    let joined: Vec<String> = rolls.iter().map(u32::to_string).collect();
    format!("\"[{}]\"", joined.join(","))
}

/// Quote a free-text field when it would break the row
fn field(text: &str) -> String {
    if text.contains(|c: char| matches!(c, ',' | '"' | '\n')) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// General roller history, oldest first, one row per roll
pub fn rolls_to_csv(records: &[RollRecord]) -> String {
    let mut out = String::from("Roll,Dice,Sides,Modifier,Mode,Total,Detail,Time\n");
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            i + 1,
            record.count,
            record.sides,
            record.modifier,
            record.roll_mode.label(),
            record.total,
            faces(&record.rolls),
            time(&record.timestamp)
        );
    }
    out
}

/// Face frequency table followed by a summary block
pub fn frequency_to_csv(table: &[FaceFrequency], criticals: usize) -> String {
    let total: usize = table.iter().map(|f| f.count).sum();
    let sides = table.len() as u32;

    let mut out = String::from("Face,Count,Percent,Theoretical,Deviation\n");
    for face in table {
        let _ = writeln!(
            out,
            "{},{},{:.2}%,{:.2}%,{:.2}%",
            face.face, face.count, face.percent, face.theoretical, face.deviation
        );
    }
    let _ = write!(
        out,
        "\nSummary\nTotal Rolls,{}\nCriticals,{}\nCritical Percent,{:.2}%\nTheoretical,{:.2}%\n",
        total,
        criticals,
        percent(criticals, total),
        theoretical_percent(sides)
    );
    out
}

/// Combat history, one row per resolved ability
pub fn combat_to_csv(results: &[CombatResult]) -> String {
    let mut out = String::from("Index,Action,Attack,Critical,Miss,Dice,Rolls,Damage,Type,Saved,Time\n");
    for (i, result) in results.iter().enumerate() {
        let attack = result
            .attack
            .as_ref()
            .map(|a| a.total.to_string())
            .unwrap_or_default();
        let saved = result
            .save
            .as_ref()
            .map(|s| s.saved.to_string())
            .unwrap_or_default();
        let damage = if result.lethal {
            "lethal".to_string()
        } else {
            result.damage.total.to_string()
        };
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            i + 1,
            result.action,
            attack,
            result.is_critical,
            result.is_miss,
            field(&result.damage.dice),
            faces(&result.damage.rolls),
            damage,
            result.damage.damage_type.label(),
            saved,
            time(&result.timestamp)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{
        resolve_ability_with_dice, AbilityParams, ActionId, AutoHitParams, PalmPhase,
    };
    use crate::config::default_abilities;
    use crate::dice::{roll_dice, ModifierMode, RollMode, RollRequest, ScriptedDice};
    use crate::stats::frequency_table;

    #[test]
    fn test_rolls_csv() {
        let mut dice = ScriptedDice::new(vec![4, 2]);
        let request = RollRequest::new(2, 6).with_modifier(3, ModifierMode::Total);
        let record = roll_dice(&request, &mut dice).unwrap();
        let csv = rolls_to_csv(&[record]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Roll,Dice,Sides,Modifier,Mode,Total,Detail,Time");
        assert!(lines[1].starts_with("1,2,6,3,normal,9,\"[4,2]\","));
    }

    #[test]
    fn test_advantage_mode_label() {
        let mut dice = ScriptedDice::new(vec![5, 12]);
        let request = RollRequest::new(1, 20).with_roll_mode(RollMode::Advantage);
        let record = roll_dice(&request, &mut dice).unwrap();
        let csv = rolls_to_csv(&[record]);
        assert!(csv.lines().nth(1).unwrap().contains(",advantage,12,\"[12]\","));
    }

    #[test]
    fn test_frequency_csv_summary() {
        let table = frequency_table(&[20, 20, 1, 7], 20);
        let csv = frequency_to_csv(&table, 2);
        assert!(csv.starts_with("Face,Count,Percent,Theoretical,Deviation\n1,1,25.00%,5.00%,20.00%\n"));
        assert!(csv.contains("Total Rolls,4\n"));
        assert!(csv.contains("Critical Percent,50.00%\n"));
    }

    #[test]
    fn test_combat_csv() {
        let table = default_abilities();
        let mut dice = ScriptedDice::new(vec![3]);
        let missile = resolve_ability_with_dice(
            &table,
            ActionId::MagicMissile,
            &AbilityParams::AutoHit(AutoHitParams { level: 1 }),
            &mut dice,
        )
        .unwrap();
        let mut dice = ScriptedDice::new(vec![2]);
        let palm = resolve_ability_with_dice(
            &table,
            ActionId::QuiveringPalm,
            &AbilityParams::TwoPhase(PalmPhase::Activate {
                save_dc: None,
                target_save_modifier: 0,
            }),
            &mut dice,
        )
        .unwrap();

        let csv = combat_to_csv(&[missile, palm]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,magic-missile,,false,false,3d4+3,\"[3,3,3]\",12,Force,,"));
        assert!(lines[2].starts_with("2,quivering-palm,,false,false,10d10,\"[]\",lethal,Necrotic,false,"));
    }
}
