//! Abilities - rules table entries and the resolvers that apply them

mod curse;
mod id;
mod multi;
mod palm;
mod params;
mod rules;
mod save;
mod strike;

pub use curse::resolve_curse;
pub use id::ActionId;
pub use multi::{resolve_auto_hit, resolve_multi_attack};
pub use palm::resolve_quivering_palm;
pub use params::{
    AbilityParams, AreaSaveParams, AutoHitParams, BreathParams, BreathSize, CurseParams,
    MultiAttackParams, MultiTargetSaveParams, PalmPhase, StrikeParams,
};
pub use rules::{
    AbilityConfig, AbilityFamily, AbilityRules, AreaSaveRules, AutoHitRules, BreathPreset,
    BreathRules, CurseRules, DragonAge, HitRuleKind, MultiAttackRules, MultiTargetSaveRules,
    PowerAttack, Scaling, StrikeRules, StunSave, TwoPhaseRules,
};
pub use save::{resolve_area_save, resolve_breath, resolve_multi_target_save};
pub use strike::resolve_strike;

use crate::combat::CombatResult;
use crate::config::AbilityTable;
use crate::dice::{thread_dice, DiceSource};
use crate::error::CombatError;

/// Resolve an ability with thread-local entropy
pub fn resolve_ability(
    table: &AbilityTable,
    action: ActionId,
    params: &AbilityParams,
) -> Result<CombatResult, CombatError> {
    let mut dice = thread_dice();
    resolve_ability_with_dice(table, action, params, &mut dice)
}

/// Resolve an ability with a specific dice source (for deterministic testing).
///
/// Looks the action up in the table and hands it to the resolver for the
/// family of `params`. A family mismatch between the table entry and the
/// parameters is a configuration error. Nothing is rolled on error.
pub fn resolve_ability_with_dice(
    table: &AbilityTable,
    action: ActionId,
    params: &AbilityParams,
    dice: &mut impl DiceSource,
) -> Result<CombatResult, CombatError> {
    let config = table
        .get(action)
        .ok_or_else(|| CombatError::UnknownAbility(action.to_string()))?;

    let outcome = match params {
        AbilityParams::Strike(p) => resolve_strike(config, p, dice),
        AbilityParams::MultiAttack(p) => resolve_multi_attack(config, p, dice),
        AbilityParams::AutoHit(p) => resolve_auto_hit(config, p, dice),
        AbilityParams::AreaSave(p) => resolve_area_save(config, p, dice),
        AbilityParams::Breath(p) => resolve_breath(config, p, dice),
        AbilityParams::MultiTargetSave(p) => resolve_multi_target_save(config, p, dice),
        AbilityParams::Curse(p) => resolve_curse(config, p, dice),
        AbilityParams::TwoPhase(phase) => resolve_quivering_palm(config, phase, dice),
    };

    match &outcome {
        Ok(result) => tracing::debug!(
            action = %action,
            total = result.damage.total,
            critical = result.is_critical,
            miss = result.is_miss,
            lethal = result.lethal,
            "resolved ability"
        ),
        Err(err) => tracing::warn!(action = %action, error = %err, "ability resolution rejected"),
    }
    outcome
}

/// Resolve by string identifier, e.g. "divine-smite"
pub fn resolve_ability_named(
    table: &AbilityTable,
    action: &str,
    params: &AbilityParams,
) -> Result<CombatResult, CombatError> {
    resolve_ability(table, action.parse()?, params)
}

pub(crate) fn family_mismatch(config: &AbilityConfig, requested: AbilityFamily) -> CombatError {
    CombatError::invalid(format!(
        "{} is a {} ability, called with {} parameters",
        config.action,
        config.family(),
        requested
    ))
}

/// Label suffix for a classified attack
pub(crate) fn outcome_tag(is_critical: bool, is_miss: bool) -> &'static str {
    match (is_critical, is_miss) {
        (true, _) => " (CRITICAL)",
        (_, true) => " (MISS)",
        _ => "",
    }
}
