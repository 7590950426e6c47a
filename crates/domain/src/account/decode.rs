//! Tolerant field accessors over raw JSON objects.

use serde_json::{Map, Value};

use crate::error::GrossRateError;

pub(super) fn text(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_owned)
}

pub(super) fn number(raw: &Map<String, Value>, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

/// The raw value under `key`, treating `null` as missing.
pub(super) fn present(raw: &Map<String, Value>, key: &str) -> Option<Value> {
    raw.get(key).filter(|value| !value.is_null()).cloned()
}

pub(super) fn flag(raw: &Map<String, Value>, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}

pub(super) fn object<'a>(raw: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    raw.get(key).and_then(Value::as_object)
}

pub(super) fn non_empty_object<'a>(
    raw: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    object(raw, key).filter(|obj| !obj.is_empty())
}

pub(super) fn objects<T>(
    raw: &Map<String, Value>,
    key: &str,
    decode: impl Fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).map(decode).collect())
        .unwrap_or_default()
}

/// A product's `grossRate` exactly as the upstream API sent it.
///
/// Kept raw so a bad rate is reported per product when the price is
/// selected, instead of being lost while decoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GrossRate {
    /// The key is not present. Reads as zero cents.
    #[default]
    Absent,
    Text(String),
    Number(f64),
    /// Any other JSON type, including `null`.
    Other(&'static str),
}

impl GrossRate {
    pub(super) fn decode(raw: Option<&Value>) -> Self {
        match raw {
            None => Self::Absent,
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Other("number"), Self::Number),
            Some(Value::Null) => Self::Other("null"),
            // Booleans are not rates, even though a loose float coercion would read `true` as 1.
            Some(Value::Bool(_)) => Self::Other("bool"),
            Some(Value::Array(_)) => Self::Other("array"),
            Some(Value::Object(_)) => Self::Other("object"),
        }
    }

    /// The rate in cents.
    ///
    /// # Errors
    ///
    /// Returns [`GrossRateError`] when the text is not a decimal number or
    /// the value has an unsupported type.
    pub fn cents(&self) -> Result<f64, GrossRateError> {
        match self {
            Self::Absent => Ok(0.0),
            Self::Number(n) => Ok(*n),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| GrossRateError::NotNumeric(text.clone())),
            Self::Other(kind) => Err(GrossRateError::UnsupportedType(*kind)),
        }
    }
}

impl std::fmt::Display for GrossRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => f.write_str("0"),
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Other(kind) => write!(f, "<{kind}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_read_absent_rate_as_zero() {
        assert_eq!(GrossRate::decode(None).cents(), Ok(0.0));
    }

    #[test]
    fn should_parse_numeric_text_with_surrounding_whitespace() {
        let rate = GrossRate::decode(Some(&json!(" 31.25 ")));
        assert_eq!(rate.cents(), Ok(31.25));
    }

    #[test]
    fn should_accept_json_numbers() {
        let rate = GrossRate::decode(Some(&json!(250)));
        assert_eq!(rate, GrossRate::Number(250.0));
        assert_eq!(rate.cents(), Ok(250.0));
    }

    #[test]
    fn should_reject_non_numeric_text() {
        let rate = GrossRate::decode(Some(&json!("abc")));
        assert_eq!(
            rate.cents(),
            Err(GrossRateError::NotNumeric("abc".to_string()))
        );
    }

    #[test]
    fn should_reject_null_and_bool() {
        assert_eq!(
            GrossRate::decode(Some(&Value::Null)).cents(),
            Err(GrossRateError::UnsupportedType("null"))
        );
        assert_eq!(
            GrossRate::decode(Some(&json!(true))).cents(),
            Err(GrossRateError::UnsupportedType("bool"))
        );
    }

    #[test]
    fn should_skip_non_object_list_entries() {
        let raw = json!({"items": [{"a": 1}, 2, "x", {"a": 3}]});
        let decoded = objects(raw.as_object().unwrap(), "items", |obj| {
            obj.get("a").and_then(Value::as_i64)
        });
        assert_eq!(decoded, vec![Some(1), Some(3)]);
    }

    #[test]
    fn should_display_raw_rate() {
        assert_eq!(GrossRate::Text("31.5".to_string()).to_string(), "31.5");
        assert_eq!(GrossRate::Absent.to_string(), "0");
        assert_eq!(GrossRate::Other("null").to_string(), "<null>");
    }
}
