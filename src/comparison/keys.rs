//! Item key normalization

use serde::{Deserialize, Serialize};

/// How item names are turned into matching keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Lowercase the name verbatim; names match only if identical ignoring case
    CaseFold,
    /// Trim and collapse whitespace runs, then lowercase
    #[default]
    CollapseWhitespace,
}

impl KeyStrategy {
    /// Derive the matching key for an item name
    pub fn key(&self, name: &str) -> String {
        match self {
            KeyStrategy::CaseFold => name.to_lowercase(),
            KeyStrategy::CollapseWhitespace => collapse_whitespace(name).to_lowercase(),
        }
    }
}

/// Trim and replace every internal whitespace run with a single space
pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
