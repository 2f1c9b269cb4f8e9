//! Save-based abilities: area spells, dragon breath, multi-target screams

use super::params::{AreaSaveParams, BreathParams, BreathSize, MultiTargetSaveParams};
use super::rules::{AbilityConfig, AbilityFamily, AbilityRules};
use super::family_mismatch;
use crate::combat::{CombatResult, DamageRoll, SaveOutcome, TargetOutcome};
use crate::dice::{sum, DiceSource, DiceSpec};
use crate::error::CombatError;
use crate::types::{Attribute, DamageType, SaveEffect};

/// Roll the damage pool, then one save, then mitigate
#[allow(clippy::too_many_arguments)]
fn roll_saved_damage(
    damage_type: DamageType,
    pool: DiceSpec,
    bonus: i32,
    dc: i32,
    attribute: Attribute,
    effect: SaveEffect,
    save_modifier: i32,
    dice: &mut impl DiceSource,
) -> (DamageRoll, SaveOutcome) {
    let rolls = pool.roll(dice);
    let save = SaveOutcome::roll(dc, attribute, save_modifier, Some(effect), dice);
    let damage = DamageRoll::rolled(damage_type, DamageRoll::formula(&[pool], bonus), rolls, bonus)
        .mitigate(effect, save.saved);
    (damage, save)
}

fn save_label(save: &SaveOutcome) -> String {
    match (save.saved, save.effect) {
        (true, Some(effect)) => format!(
            "{} save {} vs DC {}: saved ({})",
            save.attribute.abbreviation(),
            save.total,
            save.dc,
            effect.label()
        ),
        (true, None) => format!("{} save {} vs DC {}: saved", save.attribute.abbreviation(), save.total, save.dc),
        (false, _) => format!("{} save {} vs DC {}: failed", save.attribute.abbreviation(), save.total, save.dc),
    }
}

/// Resolve a single damage pool against one target save
pub fn resolve_area_save(
    config: &AbilityConfig,
    params: &AreaSaveParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::AreaSave(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::AreaSave));
    };
    let level = params.level.unwrap_or(config.min_level);
    config.check_level(level)?;

    let count = params
        .dice_count
        .unwrap_or_else(|| rules.scaling.count(rules.dice.count, level));
    if count == 0 {
        return Err(CombatError::invalid(format!("{} needs at least one die", config.action)));
    }
    let pool = rules.dice.with_count(count);
    pool.validate()?;
    let dc = params.save_dc.unwrap_or(rules.default_dc);

    let (damage, save) = roll_saved_damage(
        config.damage_type,
        pool,
        rules.flat_bonus,
        dc,
        rules.save_attribute,
        rules.save_effect,
        params.target_save_modifier,
        dice,
    );

    let mut result = CombatResult::new(config.action, damage);
    result.level = Some(level);
    result.label = format!("{} - Level {} - {}", config.name, level, save_label(&save));
    result.save = Some(save);
    Ok(result)
}

/// Resolve a dragon breath: preset or custom dice, caller-chosen element
pub fn resolve_breath(
    config: &AbilityConfig,
    params: &BreathParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::Breath(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::Breath));
    };
    if !params.element.is_element() {
        return Err(CombatError::invalid(format!(
            "{} is not a breath element",
            params.element.label()
        )));
    }

    let (pool, dc, size_label) = match params.size {
        BreathSize::Preset(age) => {
            let preset = rules.preset(age).ok_or_else(|| {
                CombatError::invalid(format!("{} has no {} preset", config.action, age.label()))
            })?;
            (preset.dice, preset.dc, age.label().to_string())
        }
        BreathSize::Custom { dice, dc } => (dice, dc, "Custom".to_string()),
    };
    if pool.count == 0 {
        return Err(CombatError::invalid(format!("{} needs at least one die", config.action)));
    }
    pool.validate()?;

    let (damage, save) = roll_saved_damage(
        params.element,
        pool,
        0,
        dc,
        rules.save_attribute,
        rules.save_effect,
        params.target_save_modifier,
        dice,
    );

    let mut result = CombatResult::new(config.action, damage);
    result.label = format!(
        "{} - {} {} - {}",
        config.name,
        size_label,
        params.element.label(),
        save_label(&save)
    );
    result.save = Some(save);
    Ok(result)
}

/// Resolve a spell where every target saves and takes damage on its own.
///
/// Each target rolls its save first; damage dice are rolled only when the
/// save does not negate them. The result is critical when every target
/// failed and a miss when none did.
pub fn resolve_multi_target_save(
    config: &AbilityConfig,
    params: &MultiTargetSaveParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let AbilityRules::MultiTargetSave(rules) = &config.rules else {
        return Err(family_mismatch(config, AbilityFamily::MultiTargetSave));
    };
    config.check_level(params.level)?;
    if params.targets == 0 || params.targets > rules.max_targets {
        return Err(CombatError::invalid(format!(
            "{} affects 1..={} targets, got {}",
            config.action, rules.max_targets, params.targets
        )));
    }
    let pool = rules.dice.with_count(rules.scaling.count(rules.dice.count, params.level));
    pool.validate()?;
    let dc = params.save_dc.unwrap_or(rules.default_dc);

    let mut targets = Vec::with_capacity(params.targets as usize);
    let mut rolls = Vec::new();
    let mut total = 0;
    for index in 0..params.targets {
        let save = SaveOutcome::roll(
            dc,
            rules.save_attribute,
            params.target_save_modifier,
            Some(rules.save_effect),
            dice,
        );
        let target_rolls = if save.saved && rules.save_effect == SaveEffect::Negates {
            Vec::new()
        } else {
            pool.roll(dice)
        };
        let target_damage = rules.save_effect.apply(sum(&target_rolls), save.saved);
        total += target_damage;
        rolls.extend_from_slice(&target_rolls);
        targets.push(TargetOutcome {
            index,
            save,
            rolls: target_rolls,
            damage: target_damage,
        });
    }

    let mut damage = DamageRoll::rolled(
        config.damage_type,
        format!("{} x{}", pool, params.targets),
        rolls,
        0,
    );
    damage.total = total;

    let failed = targets.iter().filter(|t| !t.save.saved).count() as u32;
    let mut result = CombatResult::new(config.action, damage);
    result.level = Some(params.level);
    result.is_critical = failed == params.targets;
    result.is_miss = failed == 0;
    result.label = format!(
        "{} - Level {} ({}/{} failed DC {} {})",
        config.name,
        params.level,
        failed,
        params.targets,
        dc,
        rules.save_attribute.abbreviation()
    );
    result.targets = targets;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::rules::DragonAge;
    use crate::ability::ActionId;
    use crate::config::default_abilities;
    use crate::dice::ScriptedDice;

    fn config(action: ActionId) -> AbilityConfig {
        default_abilities().get(action).cloned().unwrap()
    }

    #[test]
    fn test_fireball_failed_save_full_damage() {
        let fireball = config(ActionId::Fireball);
        let mut script = vec![4; 8];
        script.push(5);
        let mut dice = ScriptedDice::new(script);
        let params = AreaSaveParams::at_level(3).with_target_save_modifier(2);
        let result = resolve_area_save(&fireball, &params, &mut dice).unwrap();

        let save = result.save.as_ref().unwrap();
        assert_eq!(save.dc, 15);
        assert!(!save.saved);
        assert_eq!(result.damage.total, 32);
        assert_eq!(result.damage.dice, "8d6");
    }

    #[test]
    fn test_fireball_upcast_and_overrides() {
        let fireball = config(ActionId::Fireball);
        let mut dice = ScriptedDice::new(vec![1]);
        let result = resolve_area_save(&fireball, &AreaSaveParams::at_level(5), &mut dice).unwrap();
        assert_eq!(result.damage.dice, "10d6");

        let params = AreaSaveParams::default().with_dice_count(3).with_save_dc(12);
        let result = resolve_area_save(&fireball, &params, &mut dice).unwrap();
        assert_eq!(result.damage.dice, "3d6");
        assert_eq!(result.save_dc(), Some(12));
    }

    #[test]
    fn test_disintegrate_saved_is_negated() {
        let disintegrate = config(ActionId::Disintegrate);
        let mut script = vec![6; 10];
        script.push(20);
        let mut dice = ScriptedDice::new(script);
        let result = resolve_area_save(&disintegrate, &AreaSaveParams::default(), &mut dice).unwrap();

        assert_eq!(result.damage.pre_mitigation, 100);
        assert_eq!(result.damage.rolls.len(), 10);
        assert_eq!(result.damage.total, 0);
        assert_eq!(result.damage.dice, "10d6+40");
    }

    #[test]
    fn test_young_breath_saved_halves() {
        let breath = config(ActionId::DragonBreath);
        let mut dice = ScriptedDice::new(vec![1, 2, 3, 4, 5, 6, 13]);
        let params = BreathParams::new(BreathSize::Preset(DragonAge::Young), DamageType::Fire, 3);
        let result = resolve_breath(&breath, &params, &mut dice).unwrap();

        let save = result.save.as_ref().unwrap();
        assert_eq!(save.dc, 14);
        assert_eq!(save.total, 16);
        assert!(save.saved);
        assert_eq!(result.damage.pre_mitigation, 21);
        assert_eq!(result.damage.total, 10);
    }

    #[test]
    fn test_breath_element_and_custom() {
        let breath = config(ActionId::DragonBreath);
        let mut dice = ScriptedDice::new(vec![2]);
        let bad = BreathParams::new(BreathSize::Preset(DragonAge::Adult), DamageType::Force, 0);
        assert!(resolve_breath(&breath, &bad, &mut dice).is_err());
        assert_eq!(dice.consumed(), 0);

        let custom = BreathSize::Custom {
            dice: DiceSpec::new(4, 8),
            dc: 20,
        };
        let result = resolve_breath(&breath, &BreathParams::new(custom, DamageType::Acid, 0), &mut dice).unwrap();
        assert_eq!(result.damage.damage_type, DamageType::Acid);
        assert_eq!(result.damage.dice, "4d8");
        assert_eq!(result.damage.total, 8);
    }

    #[test]
    fn test_psychic_scream_per_target() {
        let scream = config(ActionId::PsychicScream);
        // target 0 fails (5) and takes 4d6 of 3s, target 1 saves (18) and takes nothing
        let mut dice = ScriptedDice::new(vec![5, 3, 3, 3, 3, 18]);
        let params = MultiTargetSaveParams::new(4, 2);
        let result = resolve_multi_target_save(&scream, &params, &mut dice).unwrap();

        assert_eq!(result.targets.len(), 2);
        assert_eq!(result.targets[0].damage, 12);
        assert!(result.targets[1].save.saved);
        assert!(result.targets[1].rolls.is_empty());
        assert_eq!(result.damage.total, 12);
        assert_eq!(result.damage.rolls.len(), 4);
        assert!(!result.is_critical);
        assert!(!result.is_miss);
        assert_eq!(result.failed_saves(), 1);
    }

    #[test]
    fn test_psychic_scream_target_bounds() {
        let scream = config(ActionId::PsychicScream);
        let mut dice = ScriptedDice::new(vec![1]);
        assert!(resolve_multi_target_save(&scream, &MultiTargetSaveParams::new(4, 0), &mut dice).is_err());
        assert!(resolve_multi_target_save(&scream, &MultiTargetSaveParams::new(3, 1), &mut dice).is_err());
        assert_eq!(dice.consumed(), 0);
    }
}
