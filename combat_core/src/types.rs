//! Shared rule vocabulary: damage types, save attributes, save effects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage type carried by every combat result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Radiant,
    Fire,
    Ice,
    Lightning,
    Acid,
    Poison,
    Slashing,
    Piercing,
    Bludgeoning,
    Force,
    Thunder,
    Necrotic,
}

impl DamageType {
    /// Elements a dragon breath may use
    pub const ELEMENTS: [DamageType; 5] = [
        DamageType::Fire,
        DamageType::Ice,
        DamageType::Lightning,
        DamageType::Acid,
        DamageType::Poison,
    ];

    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Radiant,
            DamageType::Fire,
            DamageType::Ice,
            DamageType::Lightning,
            DamageType::Acid,
            DamageType::Poison,
            DamageType::Slashing,
            DamageType::Piercing,
            DamageType::Bludgeoning,
            DamageType::Force,
            DamageType::Thunder,
            DamageType::Necrotic,
        ]
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            DamageType::Radiant => "Radiant",
            DamageType::Fire => "Fire",
            DamageType::Ice => "Ice",
            DamageType::Lightning => "Lightning",
            DamageType::Acid => "Acid",
            DamageType::Poison => "Poison",
            DamageType::Slashing => "Slashing",
            DamageType::Piercing => "Piercing",
            DamageType::Bludgeoning => "Bludgeoning",
            DamageType::Force => "Force",
            DamageType::Thunder => "Thunder",
            DamageType::Necrotic => "Necrotic",
        }
    }

    /// Presentation color as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            DamageType::Radiant => "#f5c842",
            DamageType::Fire => "#ef4444",
            DamageType::Ice => "#38bdf8",
            DamageType::Lightning => "#a78bfa",
            DamageType::Acid => "#4ade80",
            DamageType::Poison => "#a3e635",
            DamageType::Slashing | DamageType::Piercing | DamageType::Bludgeoning => "#94a3b8",
            DamageType::Force => "#8b5cf6",
            DamageType::Thunder => "#f59e0b",
            DamageType::Necrotic => "#581c87",
        }
    }

    /// Whether this type is one of the breath elements
    pub fn is_element(&self) -> bool {
        Self::ELEMENTS.contains(self)
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six character attributes, also used as saving throw tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    #[serde(alias = "str")]
    Strength,
    #[serde(alias = "dex")]
    Dexterity,
    #[serde(alias = "con")]
    Constitution,
    #[serde(alias = "int")]
    Intelligence,
    #[serde(alias = "wis")]
    Wisdom,
    #[serde(alias = "cha")]
    Charisma,
}

impl Attribute {
    /// Get all attributes in sheet order
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Constitution,
            Attribute::Intelligence,
            Attribute::Wisdom,
            Attribute::Charisma,
        ]
    }

    /// Three-letter abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Attribute::Strength => "STR",
            Attribute::Dexterity => "DEX",
            Attribute::Constitution => "CON",
            Attribute::Intelligence => "INT",
            Attribute::Wisdom => "WIS",
            Attribute::Charisma => "CHA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Dexterity => "Dexterity",
            Attribute::Constitution => "Constitution",
            Attribute::Intelligence => "Intelligence",
            Attribute::Wisdom => "Wisdom",
            Attribute::Charisma => "Charisma",
        }
    }
}

/// What a successful saving throw does to the damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveEffect {
    /// Saved targets take floor(damage / 2)
    Half,
    /// Saved targets take nothing
    #[serde(rename = "none")]
    Negates,
}

impl SaveEffect {
    /// Apply the save outcome to a pre-mitigation total
    pub fn apply(&self, total: i32, saved: bool) -> i32 {
        if !saved {
            return total;
        }
        match self {
            SaveEffect::Half => total.div_euclid(2),
            SaveEffect::Negates => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaveEffect::Half => "half",
            SaveEffect::Negates => "negated",
        }
    }
}
