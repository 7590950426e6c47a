//! Flattened attribute tree describing the current product and the
//! account's properties, market locations, meters and agreements.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::account::{AccountRecord, AgreementInfo, MaloInfo, MeterInfo, PropertyInfo};
use crate::entity::AttributeValue;

/// Placeholder for any scalar the upstream data did not provide.
pub const UNKNOWN: &str = "Unknown";

fn or_unknown(value: Option<&String>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), Clone::clone)
}

/// Attributes exposed alongside the price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAttributes {
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub valid_from: String,
    pub valid_to: String,
    pub properties: Vec<PropertyAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malo_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub melo_number: Option<String>,
    /// Balance rendered as `"12.30 €"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_balance: Option<String>,
}

impl Default for PriceAttributes {
    fn default() -> Self {
        Self {
            code: UNKNOWN.to_string(),
            name: UNKNOWN.to_string(),
            description: UNKNOWN.to_string(),
            kind: UNKNOWN.to_string(),
            valid_from: UNKNOWN.to_string(),
            valid_to: UNKNOWN.to_string(),
            properties: Vec::new(),
            malo_number: None,
            melo_number: None,
            electricity_balance: None,
        }
    }
}

impl PriceAttributes {
    /// Flatten into entity attributes: scalars as strings, the property tree
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the property tree fails to serialize.
    pub fn into_attribute_map(self) -> Result<BTreeMap<String, AttributeValue>, serde_json::Error> {
        let mut map = BTreeMap::new();
        map.insert("code".to_string(), AttributeValue::String(self.code));
        map.insert("name".to_string(), AttributeValue::String(self.name));
        map.insert(
            "description".to_string(),
            AttributeValue::String(self.description),
        );
        map.insert("type".to_string(), AttributeValue::String(self.kind));
        map.insert(
            "valid_from".to_string(),
            AttributeValue::String(self.valid_from),
        );
        map.insert("valid_to".to_string(), AttributeValue::String(self.valid_to));
        map.insert(
            "properties".to_string(),
            AttributeValue::Json(serde_json::to_value(&self.properties)?),
        );

        let optional = [
            ("malo_number", self.malo_number),
            ("melo_number", self.melo_number),
            ("electricity_balance", self.electricity_balance),
        ];
        map.extend(optional.into_iter().filter_map(|(key, value)| {
            value.map(|value| (key.to_string(), AttributeValue::String(value)))
        }));

        Ok(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyAttributes {
    pub id: String,
    pub electricity_malos: Vec<MaloAttributes>,
}

impl From<&PropertyInfo> for PropertyAttributes {
    fn from(property: &PropertyInfo) -> Self {
        Self {
            id: or_unknown(property.id.as_ref()),
            electricity_malos: property.electricity_malos.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaloAttributes {
    pub malo_number: String,
    pub melo_number: String,
    pub reference_consumption: Value,
    pub agreements: Vec<AgreementAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter: Option<MeterAttributes>,
}

impl From<&MaloInfo> for MaloAttributes {
    fn from(malo: &MaloInfo) -> Self {
        Self {
            malo_number: or_unknown(malo.malo_number.as_ref()),
            melo_number: or_unknown(malo.melo_number.as_ref()),
            reference_consumption: malo
                .reference_consumption
                .clone()
                .unwrap_or_else(|| Value::String(UNKNOWN.to_string())),
            agreements: malo.agreements.iter().map(Into::into).collect(),
            meter: malo.meter.as_ref().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeterAttributes {
    pub id: String,
    pub meter_type: String,
    pub number: String,
    pub should_receive_smart_meter_data: bool,
    pub submit_meter_reading_url: String,
}

impl From<&MeterInfo> for MeterAttributes {
    fn from(meter: &MeterInfo) -> Self {
        Self {
            id: or_unknown(meter.id.as_ref()),
            meter_type: or_unknown(meter.meter_type.as_ref()),
            number: or_unknown(meter.number.as_ref()),
            should_receive_smart_meter_data: meter.should_receive_smart_meter_data,
            submit_meter_reading_url: meter.submit_meter_reading_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementAttributes {
    pub valid_from: String,
    pub valid_to: String,
    /// Serialized as `{}` when the agreement carries no product.
    #[serde(serialize_with = "object_or_empty")]
    pub product: Option<AgreementProductAttributes>,
}

impl From<&AgreementInfo> for AgreementAttributes {
    fn from(agreement: &AgreementInfo) -> Self {
        Self {
            valid_from: or_unknown(agreement.valid_from.as_ref()),
            valid_to: or_unknown(agreement.valid_to.as_ref()),
            product: agreement
                .product
                .as_ref()
                .map(|product| AgreementProductAttributes {
                    code: or_unknown(product.code.as_ref()),
                    description: product.description.clone(),
                    full_name: product.full_name.clone(),
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementProductAttributes {
    pub code: String,
    pub description: String,
    pub full_name: String,
}

fn object_or_empty<S: Serializer>(
    value: &Option<AgreementProductAttributes>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(product) => product.serialize(serializer),
        None => BTreeMap::<String, String>::new().serialize(serializer),
    }
}

/// Build the attribute tree for an account record.
///
/// Without a record, every scalar is [`UNKNOWN`] and there are no
/// properties. Without products, the scalars stay [`UNKNOWN`] but the
/// properties are still listed. Otherwise the first product fills the
/// scalars and the account's market location numbers and balance are added.
#[must_use]
pub fn build_attributes(record: Option<&AccountRecord>) -> PriceAttributes {
    let Some(record) = record else {
        return PriceAttributes::default();
    };

    let properties = record.properties().iter().map(Into::into).collect();

    let Some(product) = record.products.first() else {
        return PriceAttributes {
            properties,
            ..PriceAttributes::default()
        };
    };

    PriceAttributes {
        code: or_unknown(product.code.as_ref()),
        name: or_unknown(product.name.as_ref()),
        description: or_unknown(product.description.as_ref()),
        kind: or_unknown(product.kind.as_ref()),
        valid_from: or_unknown(product.valid_from.as_ref()),
        valid_to: or_unknown(product.valid_to.as_ref()),
        properties,
        malo_number: Some(or_unknown(record.malo_number.as_ref())),
        melo_number: Some(or_unknown(record.melo_number.as_ref())),
        electricity_balance: record
            .electricity_balance
            .map(|balance| format!("{balance:.2} €")),
    }
}
