//! Abilities made of several attacks or missiles

use super::params::{AutoHitParams, MultiAttackParams};
use super::rules::{AbilityConfig, AbilityFamily, AbilityRules};
use super::family_mismatch;
use crate::combat::{CombatResult, DamageRoll};
use crate::dice::{resolve_attack_roll, DiceSource};
use crate::error::CombatError;

/// Resolve independent attack rolls; each hit rolls the per-hit dice.
///
/// The result is critical when every attack hit and a miss when none did.
pub fn resolve_multi_attack(
    config: &AbilityConfig,
    params: &MultiAttackParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::MultiAttack(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::MultiAttack));
    };
    config.check_level(params.level)?;
    rules.hit_dice.validate()?;

    let max_attacks = rules.attack_scaling.count(rules.attacks, params.level);
    let count = params.attacks.unwrap_or(max_attacks);
    if count == 0 || count > max_attacks {
        return Err(CombatError::invalid(format!(
            "{} allows 1..={} attacks at level {}, got {}",
            config.action, max_attacks, params.level, count
        )));
    }
    let per_hit_bonus = rules.bonus_scaling.count(rules.per_hit_bonus, params.level) as i32;
    let rule = rules.hit_rule.against(params.target_ac);

    let mut attacks = Vec::with_capacity(count as usize);
    let mut rolls = Vec::new();
    let mut bonus = 0;
    let mut dice_rolled = 0;
    for index in 0..count {
        let attack = resolve_attack_roll(params.roll_mode, params.attack_modifier, rule, dice);
        if attack.is_hit() {
            let pool = if attack.is_critical {
                rules.hit_dice.doubled()
            } else {
                rules.hit_dice
            };
            rolls.extend(pool.roll(dice));
            dice_rolled += pool.count;
            if rules.add_modifier_to_damage {
                bonus += params.attack_modifier;
            }
            if !(rules.bonus_skips_last && index + 1 == count) {
                bonus += per_hit_bonus;
            }
        }
        attacks.push(attack);
    }

    let hits = attacks.iter().filter(|a| a.is_hit()).count() as u32;
    let damage = if hits == 0 {
        let nominal = rules.hit_dice.with_count(rules.hit_dice.count * count);
        DamageRoll::none(config.damage_type, nominal.to_string())
    } else {
        let formula = DamageRoll::formula(&[rules.hit_dice.with_count(dice_rolled)], bonus);
        DamageRoll::rolled(config.damage_type, formula, rolls, bonus)
    };

    let mut result = CombatResult::new(config.action, damage);
    result.level = Some(params.level);
    result.roll_mode = params.roll_mode;
    result.is_critical = hits == count;
    result.is_miss = hits == 0;
    result.label = format!(
        "{} - Level {} ({}/{} hits)",
        config.name, params.level, hits, count
    );
    result.attacks = attacks;
    Ok(result)
}

/// Resolve missiles that always hit: raw dice plus a flat bonus per missile
pub fn resolve_auto_hit(
    config: &AbilityConfig,
    params: &AutoHitParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::AutoHit(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::AutoHit));
    };
    config.check_level(params.level)?;
    rules.missile_die.validate()?;

    let missiles = rules.scaling.count(rules.missiles, params.level);
    let pool = rules.missile_die.with_count(rules.missile_die.count * missiles);
    let bonus = rules.per_missile_bonus * missiles as i32;
    let rolls = pool.roll(dice);

    let damage = DamageRoll::rolled(config.damage_type, DamageRoll::formula(&[pool], bonus), rolls, bonus);
    let mut result = CombatResult::new(config.action, damage);
    result.level = Some(params.level);
    result.label = format!("{} - Level {} ({} missiles)", config.name, params.level, missiles);
    Ok(result)
}
