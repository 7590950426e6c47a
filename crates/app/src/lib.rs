//! # octopus-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **snapshot port** (`SnapshotSource`) through which the
//!   update coordinator's latest data reaches the sensor
//! - Provide **in-process infrastructure** (`SnapshotCache`) that a
//!   coordinator can publish into and the sensor can follow
//! - Drive the domain's price projection from the `PriceSensor` use-case:
//!   exposure gate, availability, logging of skipped data, entity snapshots
//!
//! ## Dependency rule
//! Depends on `octopus-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod snapshot_cache;
