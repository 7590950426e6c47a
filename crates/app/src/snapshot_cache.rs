//! In-process snapshot cache backed by a tokio watch channel.

use std::future::Future;

use tokio::sync::watch;

use octopus_domain::error::OctopusError;

use crate::ports::{Snapshot, SnapshotSource};

/// Holds the coordinator's latest [`Snapshot`].
///
/// A coordinator publishes each refresh result; readers either pull the
/// current value through [`SnapshotSource`] or [`subscribe`](Self::subscribe)
/// to be woken on every update. Only the newest snapshot is retained.
pub struct SnapshotCache {
    sender: watch::Sender<Snapshot>,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl SnapshotCache {
    /// Create a cache holding `initial`.
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Replace the cached snapshot and notify subscribers.
    pub fn publish(&self, snapshot: Snapshot) {
        self.sender.send_replace(snapshot);
    }

    /// Record a failed refresh, keeping the last fetched data.
    pub fn mark_failed(&self) {
        self.sender.send_modify(|snapshot| snapshot.last_update_success = false);
    }

    /// Subscribe to snapshot updates.
    ///
    /// The receiver sees the current snapshot immediately and is notified
    /// of every later publish.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    /// Clone of the current snapshot.
    #[must_use]
    pub fn current(&self) -> Snapshot {
        self.sender.borrow().clone()
    }
}

impl SnapshotSource for SnapshotCache {
    fn latest(&self) -> impl Future<Output = Result<Snapshot, OctopusError>> + Send {
        let snapshot = self.current();
        async { Ok(snapshot) }
    }
}
