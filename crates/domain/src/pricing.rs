//! Price projection: turns an account record into the displayed price and
//! its descriptive attributes.
//!
//! Both projections are pure: the same record always yields the same output,
//! and malformed input degrades to `None` or to the default attribute tree.
//!
//! The "current" product is simply the first one in the list. Validity dates
//! are carried through to the attributes but never evaluated.

mod attributes;

pub use attributes::{
    AgreementAttributes, AgreementProductAttributes, MaloAttributes, MeterAttributes,
    PriceAttributes, PropertyAttributes, UNKNOWN, build_attributes,
};

use crate::account::{AccountRecord, GrossRate};
use crate::error::GrossRateError;

/// Gross rates are published in cents.
pub const CENTS_PER_EURO: f64 = 100.0;

/// Select the current unit price in EUR/kWh.
///
/// Returns `None` when there is no record, no products, or no product with a
/// parseable gross rate.
#[must_use]
pub fn select_current_price(record: Option<&AccountRecord>) -> Option<f64> {
    PriceSelection::evaluate(record).price
}

/// Outcome of walking the product list for a price.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSelection {
    /// Selected price in EUR/kWh.
    pub price: Option<f64>,
    /// Code of the product the price was taken from.
    pub product_code: Option<String>,
    /// Products passed over because their rate did not parse, in list order.
    pub skipped: Vec<SkippedProduct>,
}

/// A product whose gross rate could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedProduct {
    pub code: Option<String>,
    pub gross_rate: GrossRate,
    pub error: GrossRateError,
}

impl PriceSelection {
    /// Walk the products in order and stop at the first parseable rate.
    #[must_use]
    pub fn evaluate(record: Option<&AccountRecord>) -> Self {
        let mut selection = Self::default();
        let Some(record) = record else {
            return selection;
        };

        for product in &record.products {
            match product.gross_rate.cents() {
                Ok(cents) => {
                    selection.price = Some(cents / CENTS_PER_EURO);
                    selection.product_code.clone_from(&product.code);
                    break;
                }
                Err(error) => selection.skipped.push(SkippedProduct {
                    code: product.code.clone(),
                    gross_rate: product.gross_rate.clone(),
                    error,
                }),
            }
        }

        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(raw: &serde_json::Value) -> AccountRecord {
        AccountRecord::from_value("A-1", raw).unwrap()
    }

    #[test]
    fn should_return_none_when_record_missing() {
        assert_eq!(select_current_price(None), None);
    }

    #[test]
    fn should_return_none_when_products_empty() {
        let record = record(&json!({"products": []}));
        assert_eq!(select_current_price(Some(&record)), None);
    }

    #[test]
    fn should_return_none_when_products_absent() {
        let record = record(&json!({}));
        assert_eq!(select_current_price(Some(&record)), None);
    }

    #[test]
    fn should_skip_unparseable_rate_and_use_next_product() {
        let record = record(&json!({
            "products": [{"grossRate": "abc"}, {"grossRate": "250"}]
        }));
        assert_eq!(select_current_price(Some(&record)), Some(2.5));
    }

    #[test]
    fn should_use_first_parseable_rate_only() {
        let record = record(&json!({
            "products": [
                {"code": "FIRST", "grossRate": "150"},
                {"code": "SECOND", "grossRate": "999"}
            ]
        }));
        let selection = PriceSelection::evaluate(Some(&record));
        assert_eq!(selection.price, Some(1.5));
        assert_eq!(selection.product_code.as_deref(), Some("FIRST"));
        assert!(selection.skipped.is_empty());
    }

    #[test]
    fn should_accept_numeric_rate() {
        let record = record(&json!({"products": [{"grossRate": 3150}]}));
        assert_eq!(select_current_price(Some(&record)), Some(31.5));
    }

    #[test]
    fn should_read_missing_rate_as_zero_price() {
        let record = record(&json!({"products": [{"code": "E-1"}, {"grossRate": "250"}]}));
        assert_eq!(select_current_price(Some(&record)), Some(0.0));
    }

    #[test]
    fn should_return_none_when_no_rate_parses() {
        let record = record(&json!({
            "products": [{"grossRate": null}, {"grossRate": "n/a"}, {"grossRate": [1]}]
        }));
        let selection = PriceSelection::evaluate(Some(&record));
        assert_eq!(selection.price, None);
        assert_eq!(selection.skipped.len(), 3);
    }

    #[test]
    fn should_report_skipped_products_in_order() {
        let record = record(&json!({
            "products": [
                {"code": "BAD", "grossRate": "abc"},
                {"code": "GOOD", "grossRate": "250"}
            ]
        }));
        let selection = PriceSelection::evaluate(Some(&record));
        assert_eq!(selection.skipped.len(), 1);
        let skipped = &selection.skipped[0];
        assert_eq!(skipped.code.as_deref(), Some("BAD"));
        assert_eq!(skipped.gross_rate, GrossRate::Text("abc".to_string()));
        assert_eq!(
            skipped.error,
            GrossRateError::NotNumeric("abc".to_string())
        );
    }

    #[test]
    fn should_select_identically_when_called_twice() {
        let record = record(&json!({
            "products": [{"grossRate": "x"}, {"grossRate": "31.57"}]
        }));
        let first = PriceSelection::evaluate(Some(&record));
        let second = PriceSelection::evaluate(Some(&record));
        assert_eq!(first, second);
        assert_eq!(
            first.price.map(f64::to_bits),
            second.price.map(f64::to_bits)
        );
    }
}
