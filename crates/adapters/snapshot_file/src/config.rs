//! File snapshot configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Where to find the coordinator's snapshot file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotFileConfig {
    /// Path of the JSON file holding the coordinator data set.
    pub path: PathBuf,
    /// Treat a missing file as "no data yet" instead of an error.
    pub missing_ok: bool,
}

impl Default for SnapshotFileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("coordinator.json"),
            missing_ok: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = SnapshotFileConfig::default();
        assert_eq!(config.path, PathBuf::from("coordinator.json"));
        assert!(config.missing_ok);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            path = "/var/lib/octopus/data.json"
            missing_ok = false
        "#;
        let config: SnapshotFileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.path, PathBuf::from("/var/lib/octopus/data.json"));
        assert!(!config.missing_ok);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: SnapshotFileConfig = toml::from_str(r#"path = "x.json""#).unwrap();
        assert_eq!(config.path, PathBuf::from("x.json"));
        assert!(config.missing_ok);
    }
}
