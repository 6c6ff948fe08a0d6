//! Validation utilities

use bigdecimal::BigDecimal;
use std::collections::HashSet;

use crate::comparison::KeyStrategy;
use crate::extraction::RawPurchaseRequest;
use crate::traits::*;
use crate::types::*;

/// Validate that an amount is not negative
pub fn validate_non_negative(field: &str, amount: &BigDecimal) -> ValidationResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(ValidationError::InvalidField(format!(
            "{} cannot be negative",
            field
        )))
    } else {
        Ok(())
    }
}

/// Longest accepted item name, counted in characters rather than bytes
pub const MAX_ITEM_NAME_CHARS: usize = 500;

/// Validate that an item name is usable as a matching key
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidField(
            "Item name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > MAX_ITEM_NAME_CHARS {
        return Err(ValidationError::InvalidField(
            "Item name cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that no two items share a normalized key
pub fn validate_unique_keys(items: &[LineItem], key_strategy: KeyStrategy) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for item in items {
        let key = key_strategy.key(&item.name);
        if !seen.insert(key.clone()) {
            return Err(ValidationError::DuplicateItem(key));
        }
    }
    Ok(())
}

/// Validator that also rejects negative prices and duplicate item names
pub struct StrictDocumentValidator {
    key_strategy: KeyStrategy,
}

impl StrictDocumentValidator {
    /// Create a validator detecting duplicates under the given key strategy
    pub fn new(key_strategy: KeyStrategy) -> Self {
        Self { key_strategy }
    }
}

impl Default for StrictDocumentValidator {
    fn default() -> Self {
        Self::new(KeyStrategy::default())
    }
}

impl DocumentValidator for StrictDocumentValidator {
    fn validate_document(&self, raw: &RawPurchaseRequest) -> ValidationResult<PurchaseRequest> {
        let pr = raw.to_purchase_request()?;
        self.validate_items(&pr.items)?;

        if let Some(grand_total) = &pr.grand_total {
            validate_non_negative("grand_total", grand_total)
                .map_err(|e| ValidationError::MalformedDocument(e.to_string()))?;
        }

        Ok(pr)
    }

    fn validate_items(&self, items: &[LineItem]) -> ValidationResult<()> {
        for (index, item) in items.iter().enumerate() {
            let checks = validate_non_negative("unit_price", &item.unit_price).and_then(|_| {
                item.line_total
                    .as_ref()
                    .map_or(Ok(()), |total| validate_non_negative("line_total", total))
            });
            if let Err(ValidationError::InvalidField(reason)) = checks {
                return Err(ValidationError::MalformedItem { index, reason });
            }
        }

        validate_unique_keys(items, self.key_strategy)
    }
}
