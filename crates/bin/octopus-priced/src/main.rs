//! # octopus-priced: Octopus price sensor runner
//!
//! Composition root that wires the snapshot adapter into the price sensor.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the file snapshot source (adapter) and the price sensor
//!   (application service)
//! - Decide whether the sensor is exposed, project it, and print the entity
//!   as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use octopus_adapter_snapshot_file::FileSnapshotSource;
use octopus_app::services::price_sensor::PriceSensor;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let source = FileSnapshotSource::new(config.snapshot.clone());
    let sensor = PriceSensor::new(config.sensor.account_number.clone(), source)?;

    if !sensor.discover().await? {
        tracing::warn!(
            account = sensor.account_number(),
            path = %config.snapshot.path.display(),
            "no entities to add for account"
        );
        return Ok(());
    }

    let entity = sensor.refresh().await?;
    tracing::info!(
        id = %entity.id,
        entity_id = %entity.entity_id,
        state = %entity.state,
        available = entity.is_available(),
        product = ?entity.get_attribute("code"),
        "price sensor updated"
    );

    println!("{}", serde_json::to_string_pretty(&entity)?);

    Ok(())
}
