//! # octopus-domain
//!
//! Pure domain model for the Octopus Germany electricity price sensor.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Decode the coordinator's **account records** tolerantly into typed structures
//! - **Price projection**: select the current unit price and build the
//!   attribute tree shown next to it
//! - Define the **Entity** snapshot a hub displays for the sensor
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! The coordinator is reached through a port defined in the `app` crate.

pub mod error;
pub mod id;

pub mod account;
pub mod entity;
pub mod pricing;
