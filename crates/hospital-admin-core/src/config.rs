//! Runtime configuration.
//!
//! Every field has a default matching the application's built-in values, so
//! an empty JSON object (or no config at all) is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Roster, StockStatus};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the form controllers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdminConfig {
    /// Stock at or below this count (and above zero) is low stock
    pub low_stock_threshold: u32,
    /// Symbol prefixed to medication prices
    pub currency_symbol: String,
    /// Doctors selectable on the schedule form
    pub roster: Roster,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: StockStatus::DEFAULT_LOW_STOCK_THRESHOLD,
            currency_symbol: "$".into(),
            roster: Roster::default(),
        }
    }
}

impl AdminConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            doctors = config.roster.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Check values serde cannot express constraints for.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.currency_symbol.is_empty() {
            return Err(ConfigError::Invalid("currency_symbol must not be empty".into()));
        }
        if self.currency_symbol.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "currency_symbol must not contain whitespace".into(),
            ));
        }
        if let Some(doctor) = self
            .roster
            .doctors()
            .iter()
            .find(|d| d.name.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "roster entry in {} has no name",
                doctor.department
            )));
        }
        Ok(())
    }
}
