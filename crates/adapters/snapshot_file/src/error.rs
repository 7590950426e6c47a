//! File snapshot adapter error types.

use std::path::PathBuf;

use octopus_domain::error::OctopusError;

/// Errors specific to the file snapshot adapter.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotFileError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not valid JSON.
    #[error("failed to parse snapshot file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<SnapshotFileError> for OctopusError {
    fn from(err: SnapshotFileError) -> Self {
        Self::Source(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_io_error_with_path() {
        let err = SnapshotFileError::Io {
            path: PathBuf::from("data.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "failed to read snapshot file data.json");
    }

    #[test]
    fn should_display_parse_error_with_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err = SnapshotFileError::Parse {
            path: PathBuf::from("data.json"),
            source: json_err,
        };
        assert_eq!(err.to_string(), "failed to parse snapshot file data.json");
    }

    #[test]
    fn should_convert_into_source_error() {
        let err: OctopusError = SnapshotFileError::Io {
            path: PathBuf::from("data.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();
        assert!(matches!(err, OctopusError::Source(_)));
    }
}
