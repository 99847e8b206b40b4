//! Host configuration loaded from TOML.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::{ConfigError, GameSession, Mode, PolicyConfig};
use tracing::{debug, info, instrument};

/// Settings for a host run.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct HostConfig {
    /// Opponent mode a session starts in.
    #[serde(default)]
    mode: Mode,

    /// Pause before the opponent answers, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Seed for reproducible dice. `None` draws from the OS.
    #[serde(default)]
    seed: Option<u64>,

    /// Policy tuning.
    #[serde(default)]
    policy: PolicyConfig,
}

fn default_think_delay_ms() -> u64 {
    450
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            think_delay_ms: default_think_delay_ms(),
            seed: None,
            policy: PolicyConfig::default(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.policy.validate()?;

        info!(mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, mode: Option<Mode>, seed: Option<u64>) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Starts a session in the configured mode with the configured dice.
    #[instrument(skip(self), fields(mode = %self.mode, seed = ?self.seed))]
    pub fn new_session(&self) -> Result<GameSession, ConfigError> {
        match self.seed {
            Some(seed) => GameSession::seeded(self.mode, self.policy, seed),
            None => GameSession::from_os_rng(self.mode, self.policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_full_config_parses() {
        let file = write_config(
            r#"
mode = "smart"
think_delay_ms = 0
seed = 42

[policy]
easy_preference_rate = 0.5
smart_blunder_rate = 0.0
"#,
        );
        let config = HostConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mode(), &Mode::Smart);
        assert_eq!(config.think_delay_ms(), &0);
        assert_eq!(config.seed(), &Some(42));
        assert_eq!(config.policy(), &PolicyConfig::new(0.5, 0.0).unwrap());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = write_config("");
        let config = HostConfig::from_file(file.path()).unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.think_delay_ms(), &450);
    }

    #[test]
    fn test_bad_rate_rejected() {
        let file = write_config("[policy]\nsmart_blunder_rate = 3.0\n");
        let err = HostConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("smart_blunder_rate"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let file = write_config("mode = \"hard\"\n");
        assert!(HostConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = HostConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let config = HostConfig::default().with_overrides(Some(Mode::Smart), Some(7));
        assert_eq!(config.mode(), &Mode::Smart);
        assert_eq!(config.seed(), &Some(7));

        let config = config.with_overrides(None, None);
        assert_eq!(config.mode(), &Mode::Smart);
        assert_eq!(config.seed(), &Some(7));
    }
}
