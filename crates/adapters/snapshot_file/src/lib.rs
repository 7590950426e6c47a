//! # octopus-adapter-snapshot-file
//!
//! Reads the update coordinator's last published data set from a JSON file
//! and serves it through the [`SnapshotSource`] port.
//!
//! The file holds the data set exactly as the coordinator produced it: an
//! object keyed by account number. Its content is not validated here; the
//! domain decoder tolerates any shape.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `octopus-app` and `octopus-domain`.

mod config;
mod error;

pub use config::SnapshotFileConfig;
pub use error::SnapshotFileError;

use octopus_app::ports::{Snapshot, SnapshotSource};
use octopus_domain::account::CoordinatorData;
use octopus_domain::error::OctopusError;

/// [`SnapshotSource`] backed by a JSON file on disk.
///
/// The file is re-read on every call, so an external coordinator can keep
/// rewriting it.
pub struct FileSnapshotSource {
    config: SnapshotFileConfig,
}

impl FileSnapshotSource {
    #[must_use]
    pub fn new(config: SnapshotFileConfig) -> Self {
        Self { config }
    }

    /// Read and parse the snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotFileError::Io`] if the file cannot be read (unless
    /// it is missing and `missing_ok` is set), or [`SnapshotFileError::Parse`]
    /// if it is not valid JSON.
    pub async fn read(&self) -> Result<Snapshot, SnapshotFileError> {
        let path = &self.config.path;
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && self.config.missing_ok => {
                tracing::debug!(path = %path.display(), "snapshot file not found, no data yet");
                return Ok(Snapshot::default());
            }
            Err(source) => {
                return Err(SnapshotFileError::Io {
                    path: path.clone(),
                    source,
                });
            }
        };

        let raw: serde_json::Value =
            serde_json::from_slice(&content).map_err(|source| SnapshotFileError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "snapshot file loaded");
        Ok(Snapshot::fresh(CoordinatorData::new(raw)))
    }
}

impl SnapshotSource for FileSnapshotSource {
    async fn latest(&self) -> Result<Snapshot, OctopusError> {
        Ok(self.read().await?)
    }
}
