//! Hex: an attack that lays a curse die on the target

use super::params::CurseParams;
use super::rules::{AbilityConfig, AbilityFamily, AbilityRules};
use super::{family_mismatch, outcome_tag};
use crate::combat::{CombatResult, DamageRoll};
use crate::dice::{resolve_attack_roll, DiceSource, HitRule};
use crate::error::CombatError;

/// Attack against the target's armor class; a hit rolls the curse die
pub fn resolve_curse(
    config: &AbilityConfig,
    params: &CurseParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::Curse(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::Curse));
    };
    rules.curse_die.validate()?;

    let attack = resolve_attack_roll(
        params.roll_mode,
        params.attack_modifier,
        HitRule::ArmorClass(params.target_ac),
        dice,
    );
    let pool = if attack.is_critical {
        rules.curse_die.doubled()
    } else {
        rules.curse_die
    };
    let damage = if attack.is_miss {
        DamageRoll::none(config.damage_type, pool.to_string())
    } else {
        DamageRoll::rolled(config.damage_type, pool.to_string(), pool.roll(dice), 0)
    };

    let mut result = CombatResult::new(config.action, damage);
    result.roll_mode = params.roll_mode;
    result.is_critical = attack.is_critical;
    result.is_miss = attack.is_miss;
    result.attack = Some(attack);
    result.hexed_attribute = Some(params.attribute);
    result.label = format!(
        "{} - {}{}",
        config.name,
        params.attribute.label(),
        outcome_tag(result.is_critical, result.is_miss)
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::ActionId;
    use crate::config::default_abilities;
    use crate::dice::ScriptedDice;
    use crate::types::Attribute;

    #[test]
    fn test_hex_hit_rolls_curse_die() {
        let hex = default_abilities().get(ActionId::Hex).cloned().unwrap();
        let mut dice = ScriptedDice::new(vec![14, 5]);
        let params = CurseParams::new(Attribute::Wisdom, 5, 15);
        let result = resolve_curse(&hex, &params, &mut dice).unwrap();

        assert!(!result.is_miss);
        assert_eq!(result.damage.total, 5);
        assert_eq!(result.damage.dice, "1d6");
        assert!(result.label.contains("Wisdom"));
        assert_eq!(result.hexed_attribute, Some(Attribute::Wisdom));
    }

    #[test]
    fn test_hex_miss_against_armor() {
        let hex = default_abilities().get(ActionId::Hex).cloned().unwrap();
        let mut dice = ScriptedDice::new(vec![9, 5]);
        let params = CurseParams::new(Attribute::Strength, 5, 15);
        let result = resolve_curse(&hex, &params, &mut dice).unwrap();

        assert!(result.is_miss);
        assert_eq!(result.damage.total, 0);
        assert_eq!(dice.consumed(), 1);
    }
}
