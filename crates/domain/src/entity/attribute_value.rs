//! Typed attribute values attached to entities.

use serde::Serialize;

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    /// Nested trees (lists, objects).
    Json(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_string_variant_as_plain_string() {
        let val = AttributeValue::String("12.30 €".to_string());
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, "\"12.30 €\"");
    }

    #[test]
    fn should_serialize_json_variant_inline() {
        let val = AttributeValue::Json(serde_json::json!([{"id": "p-1"}]));
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, r#"[{"id":"p-1"}]"#);
    }
}
