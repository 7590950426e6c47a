//! Account records published by the update coordinator.
//!
//! The coordinator hands over untyped JSON. Everything in here is decoded
//! once, tolerantly, into typed structures: a value of the wrong JSON type
//! counts as missing, `null` counts as missing, and list entries that are
//! not objects are dropped. Nothing in this module fails.

mod decode;

use serde_json::{Map, Value};

pub use decode::GrossRate;

/// The coordinator's full data set: account number → raw account record.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorData(Value);

impl CoordinatorData {
    /// Wrap the raw value published by the coordinator.
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Whether the data set has the expected shape (a JSON object).
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        self.0.is_object()
    }

    /// Whether `account_number` is a key of the data set.
    #[must_use]
    pub fn contains_account(&self, account_number: &str) -> bool {
        self.accounts()
            .is_some_and(|accounts| accounts.contains_key(account_number))
    }

    /// Account numbers present in the data set, in key order.
    #[must_use]
    pub fn account_numbers(&self) -> Vec<&str> {
        self.accounts()
            .map(|accounts| accounts.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Decode the record stored under `account_number`.
    ///
    /// Returns `None` when the data set is not a mapping, the account is not
    /// present, or the stored record is not a JSON object.
    #[must_use]
    pub fn account(&self, account_number: &str) -> Option<AccountRecord> {
        let raw = self.accounts()?.get(account_number)?.as_object()?;
        Some(AccountRecord::decode(account_number, raw))
    }

    fn accounts(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }
}

impl From<Value> for CoordinatorData {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

/// A single account's products, properties and balances.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountRecord {
    pub account_number: String,
    /// Ordered by priority; the first entry is treated as current.
    pub products: Vec<Product>,
    pub account: Option<AccountInfo>,
    pub malo_number: Option<String>,
    pub melo_number: Option<String>,
    /// Account balance in EUR.
    pub electricity_balance: Option<f64>,
}

impl AccountRecord {
    /// Decode an account record from its raw JSON object.
    #[must_use]
    pub fn decode(account_number: impl Into<String>, raw: &Map<String, Value>) -> Self {
        Self {
            account_number: account_number.into(),
            products: decode::objects(raw, "products", Product::decode),
            account: decode::object(raw, "account").map(AccountInfo::decode),
            malo_number: decode::text(raw, "malo_number"),
            melo_number: decode::text(raw, "melo_number"),
            electricity_balance: decode::number(raw, "electricity_balance"),
        }
    }

    /// Decode from any JSON value; non-objects yield `None`.
    #[must_use]
    pub fn from_value(account_number: impl Into<String>, raw: &Value) -> Option<Self> {
        raw.as_object().map(|obj| Self::decode(account_number, obj))
    }

    /// Properties of the account, or an empty slice when the account block
    /// is absent.
    #[must_use]
    pub fn properties(&self) -> &[PropertyInfo] {
        self.account
            .as_ref()
            .map_or(&[], |account| account.all_properties.as_slice())
    }
}

/// A tariff product attached to the account.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    /// Price in cents per kWh, as sent.
    pub gross_rate: GrossRate,
}

impl Product {
    fn decode(raw: &Map<String, Value>) -> Self {
        Self {
            code: decode::text(raw, "code"),
            name: decode::text(raw, "name"),
            description: decode::text(raw, "description"),
            kind: decode::text(raw, "type"),
            valid_from: decode::text(raw, "validFrom"),
            valid_to: decode::text(raw, "validTo"),
            gross_rate: GrossRate::decode(raw.get("grossRate")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountInfo {
    pub all_properties: Vec<PropertyInfo>,
}

impl AccountInfo {
    fn decode(raw: &Map<String, Value>) -> Self {
        Self {
            all_properties: decode::objects(raw, "allProperties", PropertyInfo::decode),
        }
    }
}

/// A supplied property (address) and its market locations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyInfo {
    pub id: Option<String>,
    pub electricity_malos: Vec<MaloInfo>,
}

impl PropertyInfo {
    fn decode(raw: &Map<String, Value>) -> Self {
        Self {
            id: decode::text(raw, "id"),
            electricity_malos: decode::objects(raw, "electricityMalos", MaloInfo::decode),
        }
    }
}

/// An electricity market location (`MaLo`) with its metering location (`MeLo`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaloInfo {
    pub malo_number: Option<String>,
    pub melo_number: Option<String>,
    /// Yearly reference consumption in kWh, exactly as sent upstream.
    pub reference_consumption: Option<Value>,
    pub meter: Option<MeterInfo>,
    pub agreements: Vec<AgreementInfo>,
}

impl MaloInfo {
    fn decode(raw: &Map<String, Value>) -> Self {
        Self {
            malo_number: decode::text(raw, "maloNumber"),
            melo_number: decode::text(raw, "meloNumber"),
            reference_consumption: decode::present(raw, "referenceConsumption"),
            meter: decode::non_empty_object(raw, "meter").map(MeterInfo::decode),
            agreements: decode::objects(raw, "agreements", AgreementInfo::decode),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeterInfo {
    pub id: Option<String>,
    pub meter_type: Option<String>,
    pub number: Option<String>,
    pub should_receive_smart_meter_data: bool,
    pub submit_meter_reading_url: String,
}

impl MeterInfo {
    fn decode(raw: &Map<String, Value>) -> Self {
        Self {
            id: decode::text(raw, "id"),
            meter_type: decode::text(raw, "meterType"),
            number: decode::text(raw, "number"),
            should_receive_smart_meter_data: decode::flag(raw, "shouldReceiveSmartMeterData")
                .unwrap_or(false),
            submit_meter_reading_url: decode::text(raw, "submitMeterReadingUrl")
                .unwrap_or_default(),
        }
    }
}

/// A supply agreement for a market location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgreementInfo {
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub product: Option<AgreementProduct>,
}

impl AgreementInfo {
    fn decode(raw: &Map<String, Value>) -> Self {
        Self {
            valid_from: decode::text(raw, "validFrom"),
            valid_to: decode::text(raw, "validTo"),
            product: decode::non_empty_object(raw, "product").map(AgreementProduct::decode),
        }
    }
}

/// Product summary referenced by an agreement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgreementProduct {
    pub code: Option<String>,
    pub description: String,
    pub full_name: String,
}

impl AgreementProduct {
    fn decode(raw: &Map<String, Value>) -> Self {
        Self {
            code: decode::text(raw, "code"),
            description: decode::text(raw, "description").unwrap_or_default(),
            full_name: decode::text(raw, "fullName").unwrap_or_default(),
        }
    }
}
