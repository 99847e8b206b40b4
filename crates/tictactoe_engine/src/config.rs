//! Tuning for the opponent policies.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Probabilities that shape how each mode plays.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Chance that easy mode takes its preferred square (center, corners,
    /// edges) instead of a uniformly random one.
    #[serde(default = "default_easy_preference_rate")]
    easy_preference_rate: f64,

    /// Chance that smart mode skips the search and plays a random square.
    #[serde(default = "default_smart_blunder_rate")]
    smart_blunder_rate: f64,
}

fn default_easy_preference_rate() -> f64 {
    0.7
}

fn default_smart_blunder_rate() -> f64 {
    0.18
}

impl PolicyConfig {
    /// Creates a validated policy configuration.
    #[instrument]
    pub fn new(easy_preference_rate: f64, smart_blunder_rate: f64) -> Result<Self, ConfigError> {
        let config = Self {
            easy_preference_rate,
            smart_blunder_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration with every dice roll pinned to its deterministic branch:
    /// easy always takes its preferred square, smart always searches.
    pub fn deterministic() -> Self {
        Self {
            easy_preference_rate: 1.0,
            smart_blunder_rate: 0.0,
        }
    }

    /// Checks that both rates are probabilities.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("easy_preference_rate", self.easy_preference_rate)?;
        check_probability("smart_blunder_rate", self.smart_blunder_rate)?;
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            easy_preference_rate: default_easy_preference_rate(),
            smart_blunder_rate: default_smart_blunder_rate(),
        }
    }
}

#[track_caller]
fn check_probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
