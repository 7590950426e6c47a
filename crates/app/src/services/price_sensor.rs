//! Electricity price sensor: projects one account of the coordinator's
//! data into an [`Entity`] snapshot.

use tokio::sync::watch;

use octopus_domain::account::{AccountRecord, CoordinatorData};
use octopus_domain::entity::{DeviceClass, Entity, EntityState, StateClass};
use octopus_domain::error::{OctopusError, ValidationError};
use octopus_domain::id::EntityId;
use octopus_domain::pricing::{PriceSelection, build_attributes};

use crate::ports::{Snapshot, SnapshotSource};

/// Unit of the displayed price.
pub const UNIT_OF_MEASUREMENT: &str = "€/kWh";

/// Price sensor bound to a single account number.
pub struct PriceSensor<S> {
    id: EntityId,
    account_number: String,
    source: S,
}

impl<S> PriceSensor<S> {
    /// Create a sensor for `account_number` reading from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyAccountNumber`] if the account number
    /// is blank.
    pub fn new(account_number: impl Into<String>, source: S) -> Result<Self, OctopusError> {
        let account_number = account_number.into();
        if account_number.trim().is_empty() {
            return Err(ValidationError::EmptyAccountNumber.into());
        }
        Ok(Self {
            id: EntityId::new(),
            account_number,
            source,
        })
    }

    #[must_use]
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    #[must_use]
    pub fn friendly_name(&self) -> String {
        format!("Octopus {} Electricity Price", self.account_number)
    }

    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("octopus_{}_electricity_price", self.account_number)
    }

    /// Dotted entity id derived from the friendly name.
    #[must_use]
    pub fn entity_id(&self) -> String {
        format!("sensor.{}", slugify(&self.friendly_name()))
    }

    /// Whether the sensor should be exposed at all for `data`.
    ///
    /// Only accounts that are present and carry at least one product get a
    /// price sensor.
    #[must_use]
    pub fn should_expose(&self, data: Option<&CoordinatorData>) -> bool {
        let account = self.account_number.as_str();
        let Some(data) = data else {
            tracing::warn!(account, "no coordinator data, not exposing price sensor");
            return false;
        };

        tracing::debug!(keys = ?data.account_numbers(), "coordinator data keys");

        if !data.contains_account(account) {
            tracing::error!(account, "account missing from coordinator data");
            return false;
        }

        let has_products = data
            .account(account)
            .is_some_and(|record| !record.products.is_empty());
        if !has_products {
            tracing::error!(account, "no product data available for account");
            return false;
        }

        tracing::debug!(account, "exposing electricity price sensor");
        true
    }

    /// Whether the sensor can currently report a value.
    ///
    /// Requires the last refresh to have succeeded and the data set to be a
    /// mapping containing this account.
    #[must_use]
    pub fn is_available(&self, snapshot: &Snapshot) -> bool {
        snapshot.last_update_success
            && snapshot
                .data
                .as_ref()
                .is_some_and(|data| data.is_mapping() && data.contains_account(&self.account_number))
    }

    /// Build the entity snapshot for an already fetched coordinator snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`OctopusError::Source`] if the attribute tree cannot be
    /// serialized, or a validation error from the entity builder.
    pub fn project(&self, snapshot: &Snapshot) -> Result<Entity, OctopusError> {
        let record = self.decode(snapshot.data.as_ref());
        let record = record.as_ref();

        let state = if self.is_available(snapshot) {
            EntityState::from_reading(self.select_price(record))
        } else {
            tracing::debug!(account = %self.account_number, "price sensor unavailable");
            EntityState::Unavailable
        };

        let attributes = build_attributes(record)
            .into_attribute_map()
            .map_err(|err| OctopusError::Source(Box::new(err)))?;

        Entity::builder()
            .id(self.id)
            .entity_id(self.entity_id())
            .unique_id(self.unique_id())
            .friendly_name(self.friendly_name())
            .state(state)
            .device_class(DeviceClass::Monetary)
            .state_class(StateClass::Measurement)
            .unit_of_measurement(UNIT_OF_MEASUREMENT)
            .attributes(attributes)
            .build()
    }

    /// Re-project on every coordinator update until the publisher goes away.
    ///
    /// `on_entity` receives the entity for the snapshot current at
    /// subscription time and then one entity per update.
    ///
    /// # Errors
    ///
    /// Returns the first projection error.
    pub async fn follow<F>(
        &self,
        mut updates: watch::Receiver<Snapshot>,
        mut on_entity: F,
    ) -> Result<(), OctopusError>
    where
        F: FnMut(Entity),
    {
        loop {
            let snapshot = updates.borrow_and_update().clone();
            on_entity(self.project(&snapshot)?);

            if updates.changed().await.is_err() {
                tracing::debug!(account = %self.account_number, "snapshot publisher closed");
                return Ok(());
            }
        }
    }

    fn decode(&self, data: Option<&CoordinatorData>) -> Option<AccountRecord> {
        let account = self.account_number.as_str();
        let Some(data) = data.filter(|data| data.is_mapping()) else {
            tracing::debug!(account, "no valid data structure in coordinator");
            return None;
        };
        let record = data.account(account);
        if record.is_none() {
            tracing::debug!(account, "account not found in coordinator data");
        }
        record
    }

    fn select_price(&self, record: Option<&AccountRecord>) -> Option<f64> {
        let account = self.account_number.as_str();
        if record.is_none_or(|record| record.products.is_empty()) {
            tracing::warn!(account, "no products found in coordinator data");
            return None;
        }

        let selection = PriceSelection::evaluate(record);
        for skipped in &selection.skipped {
            tracing::warn!(
                account,
                product = skipped.code.as_deref().unwrap_or("Unknown"),
                gross_rate = %skipped.gross_rate,
                error = %skipped.error,
                "failed to convert price for product"
            );
        }

        match selection.price {
            Some(price) => tracing::debug!(
                account,
                product = selection.product_code.as_deref().unwrap_or("Unknown"),
                price,
                "found electricity price"
            ),
            None => tracing::warn!(account, "no valid price found in any product"),
        }
        selection.price
    }
}

impl<S: SnapshotSource> PriceSensor<S> {
    /// Fetch the latest snapshot from the source and project it.
    ///
    /// # Errors
    ///
    /// Returns the source's error, or any error from [`project`](Self::project).
    pub async fn refresh(&self) -> Result<Entity, OctopusError> {
        let snapshot = self.source.latest().await?;
        self.project(&snapshot)
    }

    /// Fetch the latest snapshot and apply [`should_expose`](Self::should_expose).
    ///
    /// # Errors
    ///
    /// Returns the source's error.
    pub async fn discover(&self) -> Result<bool, OctopusError> {
        let snapshot = self.source.latest().await?;
        Ok(self.should_expose(snapshot.data.as_ref()))
    }
}

/// Lowercase `name`, replacing runs of non-alphanumerics with `_`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}
