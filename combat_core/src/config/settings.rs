//! Engine settings

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables the engine hands to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Most recent entries a history view shows
    #[serde(default = "default_history_display_cap")]
    pub history_display_cap: usize,
    /// Armor class offered when the caller has none
    #[serde(default = "default_reference_armor_class")]
    pub reference_armor_class: i32,
    /// Save modifier assumed for an unknown target
    #[serde(default = "default_target_save_modifier")]
    pub default_target_save_modifier: i32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            history_display_cap: default_history_display_cap(),
            reference_armor_class: default_reference_armor_class(),
            default_target_save_modifier: default_target_save_modifier(),
        }
    }
}

fn default_history_display_cap() -> usize {
    50
}
fn default_reference_armor_class() -> i32 {
    10
}
fn default_target_save_modifier() -> i32 {
    3
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings: EngineSettings = super::load_toml(path)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let settings: EngineSettings = super::parse_toml(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_display_cap == 0 {
            return Err(ConfigError::ValidationError(
                "history_display_cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
