//! Snapshot port: read access to the update coordinator's latest data.
//!
//! The coordinator (network fetches, refresh schedule) lives outside this
//! workspace. All the sensor needs is its most recent result and whether
//! the last refresh succeeded.

use std::future::Future;

use octopus_domain::account::CoordinatorData;
use octopus_domain::error::OctopusError;

/// The coordinator's state after its most recent refresh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// Last successfully fetched data set, if any.
    pub data: Option<CoordinatorData>,
    /// Whether the most recent refresh succeeded.
    pub last_update_success: bool,
}

impl Snapshot {
    /// A snapshot from a successful refresh.
    #[must_use]
    pub fn fresh(data: CoordinatorData) -> Self {
        Self {
            data: Some(data),
            last_update_success: true,
        }
    }
}

/// Source of coordinator snapshots.
pub trait SnapshotSource: Send + Sync {
    /// Return the most recent snapshot.
    fn latest(&self) -> impl Future<Output = Result<Snapshot, OctopusError>> + Send;
}

impl<T: SnapshotSource> SnapshotSource for std::sync::Arc<T> {
    fn latest(&self) -> impl Future<Output = Result<Snapshot, OctopusError>> + Send {
        (**self).latest()
    }
}
