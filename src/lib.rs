//! # PR Compare
//!
//! Compares two purchase requests (vendor quotations) line by line and in
//! aggregate, and reports which vendor offers the better price.
//!
//! ## Features
//!
//! - **Item alignment**: case-insensitive, whitespace-tolerant matching of item names
//! - **Price deltas**: exact per-item and grand-total differences using `BigDecimal`
//! - **Deterministic reports**: items are always listed in sorted key order
//! - **Validation boundary**: malformed extraction output is rejected with typed errors
//! - **Extractor abstraction**: extraction clients are injected through a trait
//!
//! ## Quick Start
//!
//! ```rust
//! use pr_compare::{compare, LineItem, PurchaseRequest};
//! use bigdecimal::BigDecimal;
//!
//! let pr1 = PurchaseRequest::new(Some("PR-1".to_string()), Some("Acme".to_string()))
//!     .with_item(LineItem::new("Widget".to_string(), BigDecimal::from(2), BigDecimal::from(10)))
//!     .with_grand_total(BigDecimal::from(20));
//! let pr2 = PurchaseRequest::new(Some("PR-2".to_string()), Some("Globex".to_string()))
//!     .with_item(LineItem::new("widget".to_string(), BigDecimal::from(2), BigDecimal::from(8)))
//!     .with_grand_total(BigDecimal::from(16));
//!
//! let report = compare(&pr1, &pr2);
//! assert_eq!(report.cheaper_option.as_deref(), Some("Globex"));
//! ```

pub mod comparison;
pub mod extraction;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use comparison::*;
pub use extraction::{parse_model_output, RawLineItem, RawPurchaseRequest};
pub use traits::*;
pub use types::*;
