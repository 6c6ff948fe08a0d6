//! Core types and data structures for purchase request comparison

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Literal placed in [`ComparisonReport::cheaper_option`] when both grand totals match
pub const EQUAL_OPTION: &str = "Equal";

/// A single priced entry within a purchase request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display label, case-sensitive as authored
    pub name: String,
    /// Optional free text, never used for matching
    pub description: Option<String>,
    /// Ordered quantity (non-negative)
    #[serde(with = "bigdecimal::serde::json_num")]
    pub quantity: BigDecimal,
    /// Price of a single unit
    #[serde(with = "bigdecimal::serde::json_num")]
    pub unit_price: BigDecimal,
    /// Line total as declared on the document, not re-derived
    #[serde(default, with = "bigdecimal::serde::json_num_option")]
    pub line_total: Option<BigDecimal>,
}

impl LineItem {
    /// Create a new line item without a declared line total
    pub fn new(name: String, quantity: BigDecimal, unit_price: BigDecimal) -> Self {
        Self {
            name,
            description: None,
            quantity,
            unit_price,
            line_total: None,
        }
    }

    /// Attach the line total declared on the document
    pub fn with_line_total(mut self, line_total: BigDecimal) -> Self {
        self.line_total = Some(line_total);
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// Difference between the declared line total and `quantity * unit_price`.
    ///
    /// Returns `None` when no total was declared or when the two agree.
    pub fn line_total_mismatch(&self) -> Option<BigDecimal> {
        let declared = self.line_total.as_ref()?;
        let derived = &self.quantity * &self.unit_price;
        let delta = declared - derived;
        if delta.is_zero() {
            None
        } else {
            Some(delta)
        }
    }
}

/// A structured purchase request, as produced by extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Document identifier, informational only
    pub pr_id: Option<String>,
    /// Vendor issuing the quotation
    pub vendor_name: Option<String>,
    /// Document date exactly as extracted
    pub date: Option<String>,
    /// Currency code as extracted (e.g. USD)
    pub currency: Option<String>,
    /// Line items in document order
    pub items: Vec<LineItem>,
    /// Authoritative document total
    #[serde(default, with = "bigdecimal::serde::json_num_option")]
    pub grand_total: Option<BigDecimal>,
}

impl PurchaseRequest {
    /// Create an empty purchase request for a vendor
    pub fn new(pr_id: Option<String>, vendor_name: Option<String>) -> Self {
        Self {
            pr_id,
            vendor_name,
            date: None,
            currency: None,
            items: Vec::new(),
            grand_total: None,
        }
    }

    /// Add a line item
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Set the declared grand total
    pub fn with_grand_total(mut self, grand_total: BigDecimal) -> Self {
        self.grand_total = Some(grand_total);
        self
    }

    /// Grand total used for comparison; a missing total counts as zero
    pub fn effective_grand_total(&self) -> BigDecimal {
        self.grand_total.clone().unwrap_or_else(|| BigDecimal::from(0))
    }

    /// Sum of the declared line totals. Items without a declared total are skipped.
    pub fn items_total(&self) -> BigDecimal {
        self.items
            .iter()
            .filter_map(|item| item.line_total.as_ref())
            .sum()
    }

    /// Best-effort parse of the extracted date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        const FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%B %d, %Y"];

        let raw = self.date.as_deref()?.trim();
        FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }
}

/// Classification of a single compared item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Default label; also used for one-sided items unless presence reporting is on
    Match,
    /// PR1 quotes a lower unit price
    Pr1Cheaper,
    /// PR2 quotes a lower unit price
    Pr2Cheaper,
    /// Both unit prices are identical
    Equal,
    /// Item only present in PR1 (presence reporting)
    Pr1Only,
    /// Item only present in PR2 (presence reporting)
    Pr2Only,
}

impl ItemStatus {
    /// Classify a signed `price2 - price1` delta
    pub fn from_diff(diff: &BigDecimal) -> Self {
        if diff.is_zero() {
            ItemStatus::Equal
        } else if diff < &BigDecimal::from(0) {
            ItemStatus::Pr2Cheaper
        } else {
            ItemStatus::Pr1Cheaper
        }
    }
}

/// Comparison of one normalized item key across both requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemComparison {
    /// Normalized matching key
    pub name: String,
    pub in_pr1: bool,
    pub in_pr2: bool,
    /// Unit price in PR1, if present
    #[serde(default, with = "bigdecimal::serde::json_num_option")]
    pub price1: Option<BigDecimal>,
    /// Unit price in PR2, if present
    #[serde(default, with = "bigdecimal::serde::json_num_option")]
    pub price2: Option<BigDecimal>,
    /// `price2 - price1` when both sides are present
    #[serde(default, with = "bigdecimal::serde::json_num_option")]
    pub diff: Option<BigDecimal>,
    pub status: ItemStatus,
}

/// Result of comparing two purchase requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub pr1_id: Option<String>,
    pub pr2_id: Option<String>,
    pub vendor1: Option<String>,
    pub vendor2: Option<String>,
    /// One entry per normalized key, sorted by key
    pub item_comparison: Vec<ItemComparison>,
    /// `grand_total(pr2) - grand_total(pr1)`
    #[serde(with = "bigdecimal::serde::json_num")]
    pub total_diff: BigDecimal,
    /// Vendor with the strictly lower grand total, or [`EQUAL_OPTION`]
    pub cheaper_option: Option<String>,
}

impl ComparisonReport {
    /// Look up the entry for a normalized key
    pub fn entry(&self, key: &str) -> Option<&ItemComparison> {
        self.item_comparison.iter().find(|entry| entry.name == key)
    }

    /// Number of entries carrying the given status
    pub fn count_by_status(&self, status: ItemStatus) -> usize {
        self.item_comparison
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }

    /// Whether the grand totals were equal
    pub fn is_tie(&self) -> bool {
        self.cheaper_option.as_deref() == Some(EQUAL_OPTION) && self.total_diff.is_zero()
    }
}

/// Errors raised while validating extracted records
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("Malformed item at index {index}: {reason}")]
    MalformedItem { index: usize, reason: String },
    #[error("Duplicate item name: {0}")]
    DuplicateItem(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors signalled by the extraction collaborator
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Extraction failed: {0}")]
    Failed(String),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Unknown source: {0}")]
    UnknownSource(String),
}

/// Result type for extraction
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Errors surfaced by the comparison service
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("{0}")]
    Extraction(String),
    #[error("File {document} invalid: {source}")]
    Validation {
        document: usize,
        #[source]
        source: ValidationError,
    },
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for comparison service operations
pub type CompareResult<T> = Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_total_mismatch() {
        let item = LineItem::new("Widget".to_string(), BigDecimal::from(2), BigDecimal::from(10))
            .with_line_total(BigDecimal::from(25));
        assert_eq!(item.line_total_mismatch(), Some(BigDecimal::from(5)));

        let consistent = item.clone().with_line_total(BigDecimal::from(20));
        assert_eq!(consistent.line_total_mismatch(), None);
    }

    #[test]
    fn test_effective_grand_total_defaults_to_zero() {
        let pr = PurchaseRequest::new(None, Some("Acme".to_string()));
        assert_eq!(pr.effective_grand_total(), BigDecimal::from(0));
    }

    #[test]
    fn test_items_total_skips_undeclared() {
        let pr = PurchaseRequest::new(None, None)
            .with_item(
                LineItem::new("A".to_string(), BigDecimal::from(1), BigDecimal::from(5))
                    .with_line_total(BigDecimal::from(5)),
            )
            .with_item(LineItem::new(
                "B".to_string(),
                BigDecimal::from(3),
                BigDecimal::from(7),
            ));
        assert_eq!(pr.items_total(), BigDecimal::from(5));
    }

    #[test]
    fn test_parsed_date_formats() {
        let mut pr = PurchaseRequest::new(None, None);
        pr.date = Some("2024-05-10".to_string());
        assert_eq!(pr.parsed_date(), NaiveDate::from_ymd_opt(2024, 5, 10));

        pr.date = Some("May 10, 2024".to_string());
        assert_eq!(pr.parsed_date(), NaiveDate::from_ymd_opt(2024, 5, 10));

        pr.date = Some("next tuesday".to_string());
        assert_eq!(pr.parsed_date(), None);
    }

    #[test]
    fn test_item_status_from_diff() {
        assert_eq!(
            ItemStatus::from_diff(&BigDecimal::from(-2)),
            ItemStatus::Pr2Cheaper
        );
        assert_eq!(
            ItemStatus::from_diff(&BigDecimal::from_str("0.01").unwrap()),
            ItemStatus::Pr1Cheaper
        );
        assert_eq!(
            ItemStatus::from_diff(&BigDecimal::from_str("0.00").unwrap()),
            ItemStatus::Equal
        );
    }

    #[test]
    fn test_money_fields_serialize_as_numbers() {
        let item = LineItem::new("Widget".to_string(), BigDecimal::from(2), BigDecimal::from(10))
            .with_line_total(BigDecimal::from_str("20.50").unwrap());
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["quantity"], serde_json::json!(2));
        assert_eq!(value["unit_price"], serde_json::json!(10));
        assert_eq!(value["line_total"], serde_json::json!(20.5));

        let restored: LineItem = serde_json::from_value(value).unwrap();
        assert_eq!(restored, item);

        let pr = PurchaseRequest::new(None, None);
        let value = serde_json::to_value(&pr).unwrap();
        assert!(value["grand_total"].is_null());
    }

    #[test]
    fn test_item_status_serializes_snake_case() {
        let json = serde_json::to_string(&ItemStatus::Pr2Cheaper).unwrap();
        assert_eq!(json, "\"pr2_cheaper\"");
        let json = serde_json::to_string(&ItemStatus::Match).unwrap();
        assert_eq!(json, "\"match\"");
    }
}
