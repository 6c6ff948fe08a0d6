//! Purchase request comparison: key normalization, the reconciliation engine
//! and the service that feeds it extracted documents

pub mod engine;
pub mod keys;
pub mod service;

pub use engine::*;
pub use keys::*;
pub use service::*;
