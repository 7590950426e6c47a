//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `octopus.toml` in the working directory. Every field has a
//! default so the file is optional, but an account number must come from
//! somewhere. Environment variables take precedence over file values.

use std::path::PathBuf;

use octopus_adapter_snapshot_file::SnapshotFileConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which account the sensor reports on.
    pub sensor: SensorConfig,
    /// Where the coordinator's data set is read from.
    pub snapshot: SnapshotFileConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Octopus account number (e.g. `A-1234ABCD`).
    pub account_number: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "octopus_priced=info,octopus_app=info,octopus_adapter_snapshot_file=info"
                .to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `octopus.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if no
    /// account number is configured.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("octopus.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("OCTOPUS_ACCOUNT") {
            self.sensor.account_number = val;
        }
        if let Some(val) = var("OCTOPUS_SNAPSHOT_PATH") {
            self.snapshot.path = PathBuf::from(val);
        }
        if let Some(val) = var("OCTOPUS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor.account_number.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sensor.account_number must be set (or OCTOPUS_ACCOUNT)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn should_produce_defaults_without_account() {
        let config = Config::default();
        assert_eq!(config.sensor.account_number, "");
        assert_eq!(config.snapshot.path, PathBuf::from("coordinator.json"));
        assert!(config.logging.filter.contains("octopus_priced=info"));
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [sensor]
            account_number = 'A-1234'

            [snapshot]
            path = '/tmp/data.json'
            missing_ok = false

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sensor.account_number, "A-1234");
        assert_eq!(config.snapshot.path, PathBuf::from("/tmp/data.json"));
        assert!(!config.snapshot.missing_ok);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [sensor]
            account_number = 'A-1234'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.snapshot.path, PathBuf::from("coordinator.json"));
        assert!(config.snapshot.missing_ok);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.sensor.account_number, "");
    }

    #[test]
    fn should_apply_overrides_with_rust_log_last() {
        let env: HashMap<&str, &str> = [
            ("OCTOPUS_ACCOUNT", "B-5678"),
            ("OCTOPUS_SNAPSHOT_PATH", "snap.json"),
            ("OCTOPUS_LOG", "info"),
            ("RUST_LOG", "trace"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.sensor.account_number, "B-5678");
        assert_eq!(config.snapshot.path, PathBuf::from("snap.json"));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_missing_account_number() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_accept_configured_account_number() {
        let mut config = Config::default();
        config.sensor.account_number = "A-1234".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
