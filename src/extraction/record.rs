//! Raw records as returned by the extraction collaborator

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::types::*;
use crate::utils::validation::{validate_item_name, validate_non_negative};

/// Line item exactly as extracted; every field may be absent or mistyped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLineItem {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "qty")]
    pub quantity: Option<Value>,
    pub unit_price: Option<Value>,
    #[serde(alias = "total_price")]
    pub line_total: Option<Value>,
}

impl RawLineItem {
    /// Convert to a typed line item. `name`, `quantity` and `unit_price` are required.
    pub fn to_line_item(&self, index: usize) -> ValidationResult<LineItem> {
        let malformed = |reason: String| ValidationError::MalformedItem { index, reason };
        let field_error = |error: ValidationError| match error {
            ValidationError::InvalidField(reason) => malformed(reason),
            other => other,
        };

        let name = self
            .name
            .as_deref()
            .ok_or_else(|| malformed("missing name".to_string()))?;
        validate_item_name(name).map_err(field_error)?;

        let quantity = required_amount("quantity", self.quantity.as_ref()).map_err(malformed)?;
        validate_non_negative("quantity", &quantity).map_err(field_error)?;

        let unit_price =
            required_amount("unit_price", self.unit_price.as_ref()).map_err(malformed)?;

        let line_total = match self.line_total.as_ref() {
            None => None,
            Some(value) => Some(
                parse_amount(value)
                    .ok_or_else(|| malformed(format!("line_total is not numeric: {}", value)))?,
            ),
        };

        Ok(LineItem {
            name: name.to_string(),
            description: self.description.clone(),
            quantity,
            unit_price,
            line_total,
        })
    }
}

/// Purchase request exactly as extracted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPurchaseRequest {
    pub pr_id: Option<Value>,
    pub vendor_name: Option<String>,
    pub date: Option<String>,
    pub currency: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub items: Vec<RawLineItem>,
    pub grand_total: Option<Value>,
}

impl RawPurchaseRequest {
    /// Deserialize from an already parsed JSON value
    pub fn from_value(value: Value) -> ExtractionResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert to a typed purchase request, rejecting the whole document if
    /// any item is malformed.
    pub fn to_purchase_request(&self) -> ValidationResult<PurchaseRequest> {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| item.to_line_item(index))
            .collect::<ValidationResult<Vec<_>>>()?;

        let grand_total = match self.grand_total.as_ref() {
            None => None,
            Some(value) => Some(parse_amount(value).ok_or_else(|| {
                ValidationError::MalformedDocument(format!(
                    "grand_total is not numeric: {}",
                    value
                ))
            })?),
        };

        Ok(PurchaseRequest {
            pr_id: self.pr_id.as_ref().and_then(text_value),
            vendor_name: self.vendor_name.clone(),
            date: self.date.clone(),
            currency: self.currency.clone(),
            items,
            grand_total,
        })
    }
}

/// Largest decimal exponent, in either direction, accepted for an amount
pub const MAX_AMOUNT_SCALE: i64 = 32;

/// Parse a monetary or quantity value from JSON.
///
/// Accepts numbers and numeric strings carrying a currency symbol or
/// thousands separators (`"$1,200.50"`). Values whose exponent lies outside
/// `MAX_AMOUNT_SCALE` are rejected; arithmetic on them would have to rescale
/// to billions of digits.
pub fn parse_amount(value: &Value) -> Option<BigDecimal> {
    let amount = match value {
        Value::Number(number) => BigDecimal::from_str(&number.to_string()).ok()?,
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| !matches!(c, ',' | '$' | '€' | '£' | '₹' | ' '))
                .collect();
            BigDecimal::from_str(&cleaned).ok()?
        }
        _ => return None,
    };

    if amount.fractional_digit_count().abs() > MAX_AMOUNT_SCALE {
        return None;
    }
    Some(amount)
}

/// Treat an explicit JSON `null` item list as empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawLineItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<RawLineItem>>::deserialize(deserializer)?.unwrap_or_default())
}

fn required_amount(field: &str, value: Option<&Value>) -> Result<BigDecimal, String> {
    let value = value.ok_or_else(|| format!("missing {}", field))?;
    parse_amount(value).ok_or_else(|| format!("{} is not numeric: {}", field, value))
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&json!(12)), Some(BigDecimal::from(12)));
        assert_eq!(
            parse_amount(&json!("$1,200.50")),
            Some(BigDecimal::from_str("1200.50").unwrap())
        );
        assert_eq!(
            parse_amount(&json!(8.5)),
            Some(BigDecimal::from_str("8.5").unwrap())
        );
        assert_eq!(parse_amount(&json!("twelve")), None);
        assert_eq!(parse_amount(&json!(null)), None);
        assert_eq!(parse_amount(&json!([1])), None);
    }

    #[test]
    fn test_parse_amount_rejects_extreme_exponents() {
        assert_eq!(parse_amount(&json!("1e-4000000000")), None);
        assert_eq!(parse_amount(&json!("1E4000000000")), None);
        assert_eq!(parse_amount(&json!("1e-33")), None);
        assert_eq!(parse_amount(&json!("1.5e3")), Some(BigDecimal::from(1500)));
        assert_eq!(
            parse_amount(&json!("0.00000000000000000000000000000001")),
            Some(BigDecimal::from_str("1e-32").unwrap())
        );
    }

    #[test]
    fn test_extreme_exponent_price_is_malformed() {
        let raw = RawPurchaseRequest::from_value(json!({
            "items": [{"name": "Widget", "qty": 1, "unit_price": "1e-4000000000"}]
        }))
        .unwrap();

        match raw.to_purchase_request() {
            Err(ValidationError::MalformedItem { index, reason }) => {
                assert_eq!(index, 0);
                assert!(reason.contains("unit_price"));
            }
            other => panic!("expected malformed item, got {:?}", other),
        }

        let raw = RawPurchaseRequest::from_value(json!({"grand_total": "5e999999999"})).unwrap();
        assert!(matches!(
            raw.to_purchase_request(),
            Err(ValidationError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_null_items_are_empty() {
        let raw = RawPurchaseRequest::from_value(json!({
            "vendor_name": "Acme",
            "items": null,
            "grand_total": 10
        }))
        .unwrap();

        assert!(raw.items.is_empty());
        let pr = raw.to_purchase_request().unwrap();
        assert!(pr.items.is_empty());
        assert_eq!(pr.grand_total, Some(BigDecimal::from(10)));
    }

    #[test]
    fn test_raw_item_aliases() {
        let raw: RawLineItem = serde_json::from_value(json!({
            "name": "Widget",
            "qty": 2,
            "unit_price": 10,
            "total_price": 20
        }))
        .unwrap();

        let item = raw.to_line_item(0).unwrap();
        assert_eq!(item.quantity, BigDecimal::from(2));
        assert_eq!(item.line_total, Some(BigDecimal::from(20)));
    }

    #[test]
    fn test_missing_unit_price_is_malformed() {
        let raw = RawLineItem {
            name: Some("Widget".to_string()),
            quantity: Some(json!(1)),
            ..RawLineItem::default()
        };

        match raw.to_line_item(3) {
            Err(ValidationError::MalformedItem { index, reason }) => {
                assert_eq!(index, 3);
                assert!(reason.contains("unit_price"));
            }
            other => panic!("expected malformed item, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_quantity_is_malformed() {
        let raw = RawLineItem {
            name: Some("Widget".to_string()),
            quantity: Some(json!(-1)),
            unit_price: Some(json!(5)),
            ..RawLineItem::default()
        };
        assert!(raw.to_line_item(0).is_err());
    }

    #[test]
    fn test_to_purchase_request() {
        let raw = RawPurchaseRequest::from_value(json!({
            "vendor_name": "Acme",
            "pr_id": 1042,
            "date": "2024-05-10",
            "currency": "USD",
            "items": [
                {"name": "Widget", "qty": 2, "unit_price": 10, "total_price": 20}
            ],
            "grand_total": "20.00"
        }))
        .unwrap();

        let pr = raw.to_purchase_request().unwrap();
        assert_eq!(pr.pr_id.as_deref(), Some("1042"));
        assert_eq!(pr.vendor_name.as_deref(), Some("Acme"));
        assert_eq!(pr.items.len(), 1);
        assert_eq!(pr.grand_total, Some(BigDecimal::from(20)));
    }

    #[test]
    fn test_missing_items_and_total_are_allowed() {
        let raw = RawPurchaseRequest::from_value(json!({"vendor_name": "Acme"})).unwrap();
        let pr = raw.to_purchase_request().unwrap();
        assert!(pr.items.is_empty());
        assert_eq!(pr.grand_total, None);
    }

    #[test]
    fn test_unparsable_grand_total_rejects_document() {
        let raw = RawPurchaseRequest::from_value(json!({"grand_total": "n/a"})).unwrap();
        assert!(matches!(
            raw.to_purchase_request(),
            Err(ValidationError::MalformedDocument(_))
        ));
    }
}
