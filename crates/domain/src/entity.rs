//! Entity: the display snapshot a hub renders for a sensor.
//!
//! An entity carries identity (`entity_id`, `unique_id`), the current
//! [`EntityState`], presentation hints (device class, state class, unit) and
//! a bag of typed attributes.

mod attribute_value;
mod state;

pub use attribute_value::AttributeValue;
pub use state::EntityState;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{OctopusError, ValidationError};
use crate::id::EntityId;

/// What kind of quantity a sensor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Monetary,
}

/// How the hub should treat successive readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
}

/// A sensor's display snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: EntityId,
    /// Dotted entity id, e.g. `sensor.octopus_a_1234_electricity_price`.
    pub entity_id: String,
    pub unique_id: String,
    pub friendly_name: String,
    pub state: EntityState,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub unit_of_measurement: Option<String>,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub last_updated: DateTime<Utc>,
}

impl Entity {
    /// Create a builder for constructing an [`Entity`].
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OctopusError::Validation`] when:
    /// - `entity_id` is empty ([`ValidationError::EmptyEntityId`])
    /// - `friendly_name` is empty ([`ValidationError::EmptyName`])
    pub fn validate(&self) -> Result<(), OctopusError> {
        if self.entity_id.is_empty() {
            return Err(ValidationError::EmptyEntityId.into());
        }
        if self.friendly_name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }
}

/// Step-by-step builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    id: Option<EntityId>,
    entity_id: Option<String>,
    unique_id: Option<String>,
    friendly_name: Option<String>,
    state: Option<EntityState>,
    device_class: Option<DeviceClass>,
    state_class: Option<StateClass>,
    unit_of_measurement: Option<String>,
    attributes: BTreeMap<String, AttributeValue>,
}

impl EntityBuilder {
    #[must_use]
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: EntityState) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn device_class(mut self, class: DeviceClass) -> Self {
        self.device_class = Some(class);
        self
    }

    #[must_use]
    pub fn state_class(mut self, class: StateClass) -> Self {
        self.state_class = Some(class);
        self
    }

    #[must_use]
    pub fn unit_of_measurement(mut self, unit: impl Into<String>) -> Self {
        self.unit_of_measurement = Some(unit.into());
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: BTreeMap<String, AttributeValue>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Consume the builder, validate, and return an [`Entity`].
    ///
    /// A missing `unique_id` falls back to the `entity_id`.
    ///
    /// # Errors
    ///
    /// Returns [`OctopusError::Validation`] if `entity_id` or
    /// `friendly_name` is missing or empty.
    pub fn build(self) -> Result<Entity, OctopusError> {
        let entity_id = self.entity_id.unwrap_or_default();
        let entity = Entity {
            id: self.id.unwrap_or_default(),
            unique_id: self.unique_id.unwrap_or_else(|| entity_id.clone()),
            entity_id,
            friendly_name: self.friendly_name.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            device_class: self.device_class,
            state_class: self.state_class,
            unit_of_measurement: self.unit_of_measurement,
            attributes: self.attributes,
            last_updated: Utc::now(),
        };
        entity.validate()?;
        Ok(entity)
    }
}
