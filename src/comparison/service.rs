//! Orchestrates extraction, validation and comparison of two documents

use serde::{Deserialize, Serialize};

use crate::comparison::{ComparisonConfig, ComparisonEngine};
use crate::extraction::RawPurchaseRequest;
use crate::traits::*;
use crate::types::*;

/// Both validated documents together with their comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentComparison {
    pub pr1: PurchaseRequest,
    pub pr2: PurchaseRequest,
    pub report: ComparisonReport,
}

/// Comparison service wiring an extractor, a validator and the engine
pub struct ComparisonService<E: PrExtractor> {
    extractor: E,
    validator: Box<dyn DocumentValidator>,
    engine: ComparisonEngine,
}

impl<E: PrExtractor> ComparisonService<E> {
    /// Create a service with the default validator and engine configuration
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            validator: Box::new(DefaultDocumentValidator),
            engine: ComparisonEngine::default(),
        }
    }

    /// Create a service with a custom validator and engine configuration
    pub fn with_validator(
        extractor: E,
        validator: Box<dyn DocumentValidator>,
        config: ComparisonConfig,
    ) -> Self {
        Self {
            extractor,
            validator,
            engine: ComparisonEngine::new(config),
        }
    }

    /// The engine used for comparisons
    pub fn engine(&self) -> &ComparisonEngine {
        &self.engine
    }

    /// Extract both documents, then validate and compare them.
    ///
    /// Extraction failures on either side are collected and returned before
    /// the engine runs.
    pub async fn compare_documents(
        &self,
        source1: &str,
        source2: &str,
    ) -> CompareResult<DocumentComparison> {
        let (raw1, raw2) = futures::join!(
            self.extractor.extract(source1),
            self.extractor.extract(source2)
        );

        match (raw1, raw2) {
            (Ok(raw1), Ok(raw2)) => self.compare_records(&raw1, &raw2),
            (raw1, raw2) => {
                let errors: Vec<String> = [raw1.err(), raw2.err()]
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, error)| {
                        error.map(|error| format!("File {} Error: {}", i + 1, error))
                    })
                    .collect();
                let message = errors.join(" | ");
                tracing::warn!(%source1, %source2, %message, "extraction failed");
                Err(CompareError::Extraction(message))
            }
        }
    }

    /// Validate two raw records and compare them
    pub fn compare_records(
        &self,
        raw1: &RawPurchaseRequest,
        raw2: &RawPurchaseRequest,
    ) -> CompareResult<DocumentComparison> {
        let pr1 = self
            .validator
            .validate_document(raw1)
            .map_err(|source| CompareError::Validation {
                document: 1,
                source,
            })?;
        let pr2 = self
            .validator
            .validate_document(raw2)
            .map_err(|source| CompareError::Validation {
                document: 2,
                source,
            })?;

        let report = self.engine.compare(&pr1, &pr2);
        Ok(DocumentComparison { pr1, pr2, report })
    }
}
