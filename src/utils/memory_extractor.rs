//! In-memory extractor implementation for testing

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;

use crate::extraction::{parse_model_output, RawPurchaseRequest};
use crate::traits::*;
use crate::types::*;

/// Extractor serving canned model responses keyed by source name
#[derive(Debug, Clone, Default)]
pub struct MemoryExtractor {
    responses: HashMap<String, String>,
}

impl MemoryExtractor {
    /// Create an empty extractor
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw model response returned for a source
    pub fn with_response(mut self, source: &str, response: &str) -> Self {
        self.responses.insert(source.to_string(), response.to_string());
        self
    }

    /// Register a failure marker for a source
    pub fn with_failure(self, source: &str, message: &str) -> Self {
        let marker = json!({ "error": message, "raw_text": "" }).to_string();
        self.with_response(source, &marker)
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Whether no source is registered
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl PrExtractor for MemoryExtractor {
    async fn extract(&self, source: &str) -> ExtractionResult<RawPurchaseRequest> {
        let response = self
            .responses
            .get(source)
            .ok_or_else(|| ExtractionError::UnknownSource(source.to_string()))?;
        parse_model_output(response)
    }
}
