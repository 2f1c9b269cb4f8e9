//! Ability rules table loading

use super::ConfigError;
use crate::ability::{AbilityConfig, ActionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for ability configurations, as laid out in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitiesConfig {
    pub abilities: Vec<AbilityConfig>,
}

/// Ability rules keyed by action
#[derive(Debug, Clone, Default)]
pub struct AbilityTable {
    configs: HashMap<ActionId, AbilityConfig>,
}

impl AbilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ability, replacing any previous entry for the action
    pub fn register(&mut self, config: AbilityConfig) {
        self.configs.insert(config.action, config);
    }

    pub fn get(&self, action: ActionId) -> Option<&AbilityConfig> {
        self.configs.get(&action)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Entries sorted by action
    pub fn iter(&self) -> impl Iterator<Item = &AbilityConfig> {
        let mut entries: Vec<_> = self.configs.values().collect();
        entries.sort_by_key(|c| c.action);
        entries.into_iter()
    }

    /// Validate every entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        for config in self.configs.values() {
            config
                .validate()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }
        Ok(())
    }

    fn from_config(config: AbilitiesConfig) -> Result<Self, ConfigError> {
        let mut table = AbilityTable::new();
        for ability in config.abilities {
            if table.get(ability.action).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate entry for {}",
                    ability.action
                )));
            }
            table.register(ability);
        }
        table.validate()?;
        Ok(table)
    }
}

/// Load the ability table from a TOML file
pub fn load_ability_table(path: &Path) -> Result<AbilityTable, ConfigError> {
    let config: AbilitiesConfig = super::load_toml(path)?;
    AbilityTable::from_config(config)
}

/// Load the ability table from a TOML string
pub fn parse_ability_table(content: &str) -> Result<AbilityTable, ConfigError> {
    let config: AbilitiesConfig = super::parse_toml(content)?;
    AbilityTable::from_config(config)
}

/// The embedded ability table
pub fn default_abilities() -> AbilityTable {
    let toml = include_str!("../../config/abilities.toml");
    parse_ability_table(toml).unwrap_or_else(|err| {
        tracing::error!(error = %err, "embedded ability table is invalid");
        AbilityTable::new()
    })
}
