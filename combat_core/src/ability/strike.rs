//! Single-attack abilities: smites, cantrips, sneak attack, weapon feats

use super::params::StrikeParams;
use super::rules::{AbilityConfig, AbilityFamily, AbilityRules};
use super::{family_mismatch, outcome_tag};
use crate::combat::{CombatResult, DamageRoll, SaveOutcome};
use crate::dice::{resolve_attack_roll, DiceSource, DiceSpec};
use crate::error::CombatError;

/// Resolve one attack roll followed by weapon and feature dice.
///
/// A miss rolls no damage dice. A critical doubles every dice pool, never the
/// flat bonus. A stunning save, if the ability has one, is rolled last and only
/// on a hit.
pub fn resolve_strike(
    config: &AbilityConfig,
    params: &StrikeParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::Strike(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::Strike));
    };
    config.check_level(params.level)?;

    let undead_dice = if params.target_is_undead { rules.undead_bonus_dice } else { 0 };
    let feature = rules
        .feature_dice
        .map(|d| d.with_count(rules.scaling.count(d.count, params.level) + undead_dice));
    let pools: Vec<DiceSpec> = rules.weapon_dice.into_iter().chain(feature).collect();
    if pools.is_empty() {
        return Err(CombatError::invalid(format!("{} has no damage dice", config.action)));
    }
    for pool in &pools {
        pool.validate()?;
    }

    let power = match (params.power_attack, rules.power_attack) {
        (false, _) => None,
        (true, Some(power)) => Some(power),
        (true, None) => {
            return Err(CombatError::invalid(format!(
                "{} has no power attack option",
                config.action
            )))
        }
    };
    let attack_modifier = params.attack_modifier - power.map_or(0, |p| p.penalty);
    let mut bonus = power.map_or(0, |p| p.bonus);
    if rules.add_modifier_to_damage {
        bonus += params.attack_modifier;
    }

    let attack = resolve_attack_roll(
        params.roll_mode,
        attack_modifier,
        rules.hit_rule.against(params.target_ac),
        dice,
    );

    let pools: Vec<DiceSpec> = if attack.is_critical {
        pools.iter().map(DiceSpec::doubled).collect()
    } else {
        pools
    };
    let formula = DamageRoll::formula(&pools, bonus);
    let damage = if attack.is_miss {
        DamageRoll::none(config.damage_type, formula)
    } else {
        let mut rolls = Vec::new();
        for pool in &pools {
            rolls.extend(pool.roll(dice));
        }
        DamageRoll::rolled(config.damage_type, formula, rolls, bonus)
    };

    let save = match rules.stun_save {
        Some(stun) if attack.is_hit() => Some(SaveOutcome::roll(
            8 + stun.proficiency + params.attack_modifier,
            stun.attribute,
            params.target_save_modifier,
            None,
            dice,
        )),
        _ => None,
    };

    let mut label = format!("{} - Level {}", config.name, params.level);
    if params.target_is_undead && rules.undead_bonus_dice > 0 {
        label.push_str(" vs undead");
    }
    if power.is_some() {
        label.push_str(" (power attack)");
    }
    label.push_str(outcome_tag(attack.is_critical, attack.is_miss));
    if let Some(save) = &save {
        label.push_str(if save.saved { " - stun resisted" } else { " - stunned" });
    }

    let mut result = CombatResult::new(config.action, damage);
    result.level = Some(params.level);
    result.roll_mode = params.roll_mode;
    result.is_critical = attack.is_critical;
    result.is_miss = attack.is_miss;
    result.attack = Some(attack);
    result.save = save;
    result.label = label;
    Ok(result)
}
