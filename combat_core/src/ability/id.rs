//! ActionId - closed set of ability identifiers

use crate::error::CombatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of every ability the engine can resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    DivineSmite,
    FireBolt,
    SneakAttack,
    ThunderousSmite,
    StunningStrike,
    GreatWeaponMaster,
    ActionSurge,
    KiStrikes,
    EldritchBlast,
    ScorchingRay,
    MagicMissile,
    Hex,
    DragonBreath,
    PsychicScream,
    Fireball,
    ChainLightning,
    Tsunami,
    Whirlwind,
    ConeOfCold,
    Disintegrate,
    MeteorSwarm,
    HungerOfHadar,
    QuiveringPalm,
}

impl ActionId {
    pub fn all() -> &'static [ActionId] {
        &[
            ActionId::DivineSmite,
            ActionId::FireBolt,
            ActionId::SneakAttack,
            ActionId::ThunderousSmite,
            ActionId::StunningStrike,
            ActionId::GreatWeaponMaster,
            ActionId::ActionSurge,
            ActionId::KiStrikes,
            ActionId::EldritchBlast,
            ActionId::ScorchingRay,
            ActionId::MagicMissile,
            ActionId::Hex,
            ActionId::DragonBreath,
            ActionId::PsychicScream,
            ActionId::Fireball,
            ActionId::ChainLightning,
            ActionId::Tsunami,
            ActionId::Whirlwind,
            ActionId::ConeOfCold,
            ActionId::Disintegrate,
            ActionId::MeteorSwarm,
            ActionId::HungerOfHadar,
            ActionId::QuiveringPalm,
        ]
    }

    /// Kebab-case identifier, as used in the rules table
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::DivineSmite => "divine-smite",
            ActionId::FireBolt => "fire-bolt",
            ActionId::SneakAttack => "sneak-attack",
            ActionId::ThunderousSmite => "thunderous-smite",
            ActionId::StunningStrike => "stunning-strike",
            ActionId::GreatWeaponMaster => "great-weapon-master",
            ActionId::ActionSurge => "action-surge",
            ActionId::KiStrikes => "ki-strikes",
            ActionId::EldritchBlast => "eldritch-blast",
            ActionId::ScorchingRay => "scorching-ray",
            ActionId::MagicMissile => "magic-missile",
            ActionId::Hex => "hex",
            ActionId::DragonBreath => "dragon-breath",
            ActionId::PsychicScream => "psychic-scream",
            ActionId::Fireball => "fireball",
            ActionId::ChainLightning => "chain-lightning",
            ActionId::Tsunami => "tsunami",
            ActionId::Whirlwind => "whirlwind",
            ActionId::ConeOfCold => "cone-of-cold",
            ActionId::Disintegrate => "disintegrate",
            ActionId::MeteorSwarm => "meteor-swarm",
            ActionId::HungerOfHadar => "hunger-of-hadar",
            ActionId::QuiveringPalm => "quivering-palm",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CombatError::UnknownAbility(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_id() {
        for id in ActionId::all() {
            assert_eq!(id.as_str().parse::<ActionId>().unwrap(), *id);
        }
    }

    #[test]
    fn test_unknown_id() {
        let err = "wish".parse::<ActionId>().unwrap_err();
        assert!(matches!(err, CombatError::UnknownAbility(ref s) if s == "wish"));
    }
}
