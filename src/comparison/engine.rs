//! Reconciliation engine that aligns two purchase requests item by item

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::comparison::KeyStrategy;
use crate::types::*;

/// Engine configuration, fixed at construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// How item names become matching keys
    pub key_strategy: KeyStrategy,
    /// Label one-sided items `pr1_only`/`pr2_only` instead of `match`
    pub report_presence: bool,
}

impl ComparisonConfig {
    /// Baseline behavior: verbatim case folding and `match` for one-sided items
    pub fn baseline() -> Self {
        Self {
            key_strategy: KeyStrategy::CaseFold,
            report_presence: false,
        }
    }

    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> CompareResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compares two purchase requests
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: ComparisonConfig,
}

impl ComparisonEngine {
    /// Create an engine with the given configuration
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Build the key index for one request. Later items overwrite earlier ones
    /// sharing the same key.
    pub fn index_items<'a>(&self, pr: &'a PurchaseRequest) -> BTreeMap<String, &'a LineItem> {
        let mut index = BTreeMap::new();
        for item in &pr.items {
            let key = self.config.key_strategy.key(&item.name);
            if let Some(previous) = index.insert(key, item) {
                tracing::warn!(
                    pr_id = ?pr.pr_id,
                    overwritten = %previous.name,
                    kept = %item.name,
                    "duplicate item key, keeping the later item"
                );
            }
        }
        index
    }

    /// Compare two purchase requests
    pub fn compare(&self, pr1: &PurchaseRequest, pr2: &PurchaseRequest) -> ComparisonReport {
        let items1 = self.index_items(pr1);
        let items2 = self.index_items(pr2);

        let keys: BTreeSet<&String> = items1.keys().chain(items2.keys()).collect();

        let item_comparison: Vec<ItemComparison> = keys
            .into_iter()
            .map(|key| self.compare_item(key, items1.get(key).copied(), items2.get(key).copied()))
            .collect();

        let total1 = grand_total_or_zero(pr1);
        let total2 = grand_total_or_zero(pr2);
        let total_diff = &total2 - &total1;

        let cheaper_option = if total1 < total2 {
            pr1.vendor_name.clone()
        } else if total2 < total1 {
            pr2.vendor_name.clone()
        } else {
            Some(EQUAL_OPTION.to_string())
        };

        tracing::info!(
            items = item_comparison.len(),
            total_diff = %total_diff,
            cheaper_option = ?cheaper_option,
            "compared purchase requests"
        );

        ComparisonReport {
            pr1_id: pr1.pr_id.clone(),
            pr2_id: pr2.pr_id.clone(),
            vendor1: pr1.vendor_name.clone(),
            vendor2: pr2.vendor_name.clone(),
            item_comparison,
            total_diff,
            cheaper_option,
        }
    }

    fn compare_item(
        &self,
        key: &str,
        item1: Option<&LineItem>,
        item2: Option<&LineItem>,
    ) -> ItemComparison {
        let price1 = item1.map(|item| item.unit_price.clone());
        let price2 = item2.map(|item| item.unit_price.clone());

        let (diff, status) = match (&price1, &price2) {
            (Some(p1), Some(p2)) => {
                let diff = p2 - p1;
                let status = ItemStatus::from_diff(&diff);
                (Some(diff), status)
            }
            (Some(_), None) if self.config.report_presence => (None, ItemStatus::Pr1Only),
            (None, Some(_)) if self.config.report_presence => (None, ItemStatus::Pr2Only),
            _ => (None, ItemStatus::Match),
        };

        tracing::debug!(key, ?status, "compared item");

        ItemComparison {
            name: key.to_string(),
            in_pr1: item1.is_some(),
            in_pr2: item2.is_some(),
            price1,
            price2,
            diff,
            status,
        }
    }
}

fn grand_total_or_zero(pr: &PurchaseRequest) -> BigDecimal {
    if pr.grand_total.is_none() {
        tracing::warn!(
            pr_id = ?pr.pr_id,
            vendor = ?pr.vendor_name,
            "grand total missing, treating as zero"
        );
    }
    pr.effective_grand_total()
}

/// Compare two purchase requests with the default configuration
pub fn compare(pr1: &PurchaseRequest, pr2: &PurchaseRequest) -> ComparisonReport {
    ComparisonEngine::default().compare(pr1, pr2)
}
