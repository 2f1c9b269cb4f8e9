//! Engine error taxonomy

use crate::config::ConfigError;
use thiserror::Error;

/// Failure of a single engine call. No partial result accompanies an error.
#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Unknown ability: {0}")]
    UnknownAbility(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CombatError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CombatError::InvalidConfiguration(message.into())
    }
}
