//! Traits for the extraction and validation seams

use async_trait::async_trait;

use crate::extraction::RawPurchaseRequest;
use crate::types::*;

/// Extraction collaborator
///
/// Implementations turn a source document (a file path, an upload key, ...)
/// into a raw purchase request. Clients receive their configuration when they
/// are constructed and are injected into the comparison service, so tests can
/// substitute a fixture-backed implementation.
#[async_trait]
pub trait PrExtractor: Send + Sync {
    /// Extract a raw purchase request from a source document.
    ///
    /// Failure must be returned as an error, never as a partially filled record.
    async fn extract(&self, source: &str) -> ExtractionResult<RawPurchaseRequest>;
}

/// Validation boundary between raw extraction output and the engine
pub trait DocumentValidator: Send + Sync {
    /// Convert a raw record into a typed purchase request, rejecting malformed input
    fn validate_document(&self, raw: &RawPurchaseRequest) -> ValidationResult<PurchaseRequest>;

    /// Additional checks on the typed line items
    fn validate_items(&self, items: &[LineItem]) -> ValidationResult<()>;
}

/// Validator enforcing required fields only
pub struct DefaultDocumentValidator;

impl DocumentValidator for DefaultDocumentValidator {
    fn validate_document(&self, raw: &RawPurchaseRequest) -> ValidationResult<PurchaseRequest> {
        let pr = raw.to_purchase_request()?;
        self.validate_items(&pr.items)?;
        Ok(pr)
    }

    fn validate_items(&self, _items: &[LineItem]) -> ValidationResult<()> {
        Ok(())
    }
}
