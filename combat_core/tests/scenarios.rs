//! End-to-end resolution scenarios with scripted dice

use combat_core::dice::{resolve_attack_roll, RollRecord};
use combat_core::prelude::*;
use combat_core::stats::{combat_summary, compute_statistics, d20_summary};
use proptest::prelude::*;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_natural_twenty_plus_five() {
    init_tracing();
    let mut dice = ScriptedDice::new(vec![20]);
    let attack = resolve_attack_roll(RollMode::Normal, 5, HitRule::ArmorClass(15), &mut dice);
    assert!(attack.is_critical);
    assert!(!attack.is_miss);
    assert_eq!(attack.total, 25);
}

#[test]
fn test_divine_smite_critical_doubles_pool() {
    init_tracing();
    let table = default_abilities();
    let mut dice = ScriptedDice::new(vec![20, 4]);
    let params = AbilityParams::Strike(StrikeParams::new(1, 5, 10));
    let result = resolve_ability_with_dice(&table, ActionId::DivineSmite, &params, &mut dice).unwrap();

    assert!(result.is_critical);
    assert_eq!(result.damage.dice, "4d8");
    assert_eq!(result.damage.rolls.len(), 4);
    assert_eq!(result.damage.total, 16);
    assert_eq!(result.damage.damage_type, DamageType::Radiant);
}

#[test]
fn test_young_dragon_breath_saved() {
    init_tracing();
    let table = default_abilities();
    let mut dice = ScriptedDice::new(vec![1, 2, 3, 4, 5, 6, 13]);
    let params = AbilityParams::Breath(BreathParams::new(
        BreathSize::Preset(DragonAge::Young),
        DamageType::Lightning,
        3,
    ));
    let result = resolve_ability_with_dice(&table, ActionId::DragonBreath, &params, &mut dice).unwrap();

    let save = result.save.as_ref().unwrap();
    assert!(save.saved);
    assert_eq!(save.total, 16);
    assert_eq!(result.damage.rolls.iter().sum::<u32>(), 21);
    assert_eq!(result.damage.total, 10);
    assert_eq!(result.damage.damage_type, DamageType::Lightning);
}

#[test]
fn test_magic_missile_level_three() {
    init_tracing();
    let table = default_abilities();
    let mut dice = ScriptedDice::new(vec![3]);
    let params = AbilityParams::AutoHit(AutoHitParams { level: 3 });
    let result = resolve_ability_with_dice(&table, ActionId::MagicMissile, &params, &mut dice).unwrap();

    assert_eq!(result.damage.total, 20);
    assert_eq!(result.damage.rolls.len(), 5);
}

#[test]
fn test_cleared_history_statistics() {
    let table = default_abilities();
    let mut history: History<CombatResult> = History::new();
    for _ in 0..10 {
        let params = AbilityParams::AutoHit(AutoHitParams { level: 1 });
        history.push(resolve_ability(&table, ActionId::MagicMissile, &params).unwrap());
    }
    assert_eq!(history.len(), 10);

    history.clear();
    assert_eq!(history.len(), 0);
    assert!(history.current().is_none());

    let summary = combat_summary(history.as_slice());
    assert_eq!(summary.count, 0);
    assert!(summary.average_damage.abs() < f64::EPSILON);

    let rolls: History<RollRecord> = History::new();
    let stats = compute_statistics(rolls.as_slice(), |r| r.is_d20(), 20);
    assert!(stats.percent.abs() < f64::EPSILON);
    assert_eq!(d20_summary(rolls.as_slice()).d20_rolls, 0);
}

#[test]
fn test_failed_resolution_consumes_no_entropy() {
    let table = default_abilities();
    let cases = [
        (ActionId::DivineSmite, AbilityParams::Strike(StrikeParams::new(9, 5, 10))),
        (ActionId::Fireball, AbilityParams::AreaSave(AreaSaveParams::at_level(2))),
        (ActionId::EldritchBlast, AbilityParams::MultiAttack(MultiAttackParams::new(1, 5, 10).with_attacks(4))),
        (ActionId::PsychicScream, AbilityParams::MultiTargetSave(MultiTargetSaveParams::new(5, 11))),
        (ActionId::Hex, AbilityParams::AutoHit(AutoHitParams { level: 1 })),
    ];
    for (action, params) in cases {
        let mut dice = ScriptedDice::new(vec![20]);
        let result = resolve_ability_with_dice(&table, action, &params, &mut dice);
        assert!(matches!(result, Err(CombatError::InvalidConfiguration(_))), "{action}");
        assert_eq!(dice.consumed(), 0, "{action}");
    }
}

#[test]
fn test_shared_history_across_threads() {
    let table = default_abilities();
    let shared: SharedHistory<CombatResult> = SharedHistory::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            let table = table.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    let params = AbilityParams::AutoHit(AutoHitParams { level: 2 });
                    let result = resolve_ability(&table, ActionId::MagicMissile, &params).unwrap();
                    shared.push(result);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(shared.len(), 100);
    shared.with(|history| {
        assert!(history.iter().all(|r| (8..=20).contains(&r.damage.total)));
    });
}

proptest! {
    #[test]
    fn prop_critical_iff_natural_twenty(seed in any::<u64>(), modifier in -5i32..15, ac in 5i32..25) {
        let mut dice = RngDice::seeded(seed);
        let attack = resolve_attack_roll(RollMode::Normal, modifier, HitRule::ArmorClass(ac), &mut dice);
        prop_assert_eq!(attack.is_critical, attack.natural == 20);
        prop_assert!(!(attack.is_critical && attack.is_miss));
    }

    #[test]
    fn prop_damage_total_is_rolls_plus_bonus(seed in any::<u64>(), level in 1u32..=20) {
        let table = default_abilities();
        let mut dice = RngDice::seeded(seed);
        let params = AbilityParams::Strike(StrikeParams::new(level, 4, 14));
        let result = resolve_ability_with_dice(&table, ActionId::SneakAttack, &params, &mut dice).unwrap();
        let rolled: i32 = result.damage.rolls.iter().map(|r| *r as i32).sum();
        prop_assert_eq!(result.damage.pre_mitigation, rolled + result.damage.bonus);
    }

    #[test]
    fn prop_save_mitigation(seed in any::<u64>(), modifier in -2i32..10) {
        let table = default_abilities();
        let mut dice = RngDice::seeded(seed);
        let params = AbilityParams::AreaSave(AreaSaveParams::at_level(3).with_target_save_modifier(modifier));
        let result = resolve_ability_with_dice(&table, ActionId::Fireball, &params, &mut dice).unwrap();
        let save = result.save.as_ref().unwrap();
        let expected = if save.saved {
            result.damage.pre_mitigation.div_euclid(2)
        } else {
            result.damage.pre_mitigation
        };
        prop_assert_eq!(result.damage.total, expected);
    }

    #[test]
    fn prop_multi_attack_flags(seed in any::<u64>(), level in 1u32..=20) {
        let table = default_abilities();
        let mut dice = RngDice::seeded(seed);
        let params = AbilityParams::MultiAttack(MultiAttackParams::new(level, 5, 15));
        let result = resolve_ability_with_dice(&table, ActionId::EldritchBlast, &params, &mut dice).unwrap();
        let hits = result.hits();
        prop_assert_eq!(result.is_critical, hits == result.attacks.len());
        prop_assert_eq!(result.is_miss, hits == 0);
    }

    #[test]
    fn prop_palm_activation(seed in any::<u64>(), modifier in -5i32..15) {
        let table = default_abilities();
        let mut dice = RngDice::seeded(seed);
        let params = AbilityParams::TwoPhase(PalmPhase::Activate { save_dc: None, target_save_modifier: modifier });
        let result = resolve_ability_with_dice(&table, ActionId::QuiveringPalm, &params, &mut dice).unwrap();
        if result.lethal {
            prop_assert_eq!(result.damage.total, 0);
            prop_assert!(result.damage.rolls.is_empty());
        } else {
            prop_assert_eq!(result.damage.rolls.len(), 10);
        }
    }
}
