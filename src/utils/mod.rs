//! Utility modules

pub mod memory_extractor;
pub mod validation;

pub use memory_extractor::*;
pub use validation::*;
