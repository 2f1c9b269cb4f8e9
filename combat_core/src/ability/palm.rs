//! Quivering palm: a strike that plants vibrations, then a lethal activation

use super::params::PalmPhase;
use super::rules::{AbilityConfig, AbilityFamily, AbilityRules};
use super::{family_mismatch, outcome_tag};
use crate::combat::{CombatResult, DamageRoll, SaveOutcome};
use crate::dice::{resolve_attack_roll, DiceSource};
use crate::error::CombatError;

/// Resolve either phase of a two-phase ability.
///
/// The strike is an ordinary attack with its own damage. Activation forces a
/// save: success rolls the activation dice, failure kills the target outright
/// and rolls nothing.
pub fn resolve_quivering_palm(
    config: &AbilityConfig,
    phase: &PalmPhase,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::TwoPhase(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::TwoPhase));
    };
    rules.strike_dice.validate()?;
    rules.activation_dice.validate()?;

    match *phase {
        PalmPhase::Strike {
            attack_modifier,
            roll_mode,
            target_ac,
        } => {
            let attack = resolve_attack_roll(
                roll_mode,
                attack_modifier,
                rules.strike_hit_rule.against(target_ac),
                dice,
            );
            let pool = if attack.is_critical {
                rules.strike_dice.doubled()
            } else {
                rules.strike_dice
            };
            let formula = DamageRoll::formula(&[pool], rules.strike_bonus);
            let damage = if attack.is_miss {
                DamageRoll::none(rules.strike_damage_type, formula)
            } else {
                DamageRoll::rolled(rules.strike_damage_type, formula, pool.roll(dice), rules.strike_bonus)
            };

            let mut result = CombatResult::new(config.action, damage);
            result.roll_mode = roll_mode;
            result.is_critical = attack.is_critical;
            result.is_miss = attack.is_miss;
            result.attack = Some(attack);
            result.label = format!(
                "{} - Strike{}",
                config.name,
                outcome_tag(result.is_critical, result.is_miss)
            );
            Ok(result)
        }
        PalmPhase::Activate {
            save_dc,
            target_save_modifier,
        } => {
            let dc = save_dc.unwrap_or(rules.default_dc);
            let save = SaveOutcome::roll(dc, rules.save_attribute, target_save_modifier, None, dice);
            let formula = rules.activation_dice.to_string();

            let mut result = if save.saved {
                let rolls = rules.activation_dice.roll(dice);
                let mut result = CombatResult::new(
                    config.action,
                    DamageRoll::rolled(config.damage_type, formula, rolls, 0),
                );
                result.label = format!("{} - Activation resisted", config.name);
                result
            } else {
                let mut result =
                    CombatResult::new(config.action, DamageRoll::none(config.damage_type, formula));
                result.lethal = true;
                result.label = format!("{} - Activation: target slain", config.name);
                result
            };
            result.save = Some(save);
            Ok(result)
        }
    }
}
