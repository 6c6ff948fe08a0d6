//! Boundary with the extraction collaborator
//!
//! Extraction itself (PDF text, the model call) happens elsewhere. This module
//! turns what the extractor returns into a [`RawPurchaseRequest`] and makes
//! sure a failure marker can never pass for a document.

pub mod record;

pub use record::*;

use serde_json::Value;

use crate::types::*;

/// Key that marks an extractor response as a failure rather than a document
pub const ERROR_MARKER: &str = "error";

/// Remove Markdown code fences a model may wrap its JSON in
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model response into a raw purchase request.
///
/// An object carrying an `error` key is reported as [`ExtractionError::Failed`].
pub fn parse_model_output(text: &str) -> ExtractionResult<RawPurchaseRequest> {
    let value: Value = serde_json::from_str(&strip_code_fences(text))?;

    if let Some(error) = value.get(ERROR_MARKER) {
        let message = match error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        return Err(ExtractionError::Failed(message));
    }

    if !value.is_object() {
        return Err(ExtractionError::Failed(format!(
            "expected a JSON object, got {}",
            value
        )));
    }

    RawPurchaseRequest::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        let text = "```json\n{\"vendor_name\": \"Acme\"}\n```";
        assert_eq!(strip_code_fences(text), "{\"vendor_name\": \"Acme\"}");
    }

    #[test]
    fn test_parse_fenced_output() {
        let text = r#"```json
        {"vendor_name": "Acme", "items": [{"name": "Widget", "qty": 2, "unit_price": 10}],
         "grand_total": 20}
        ```"#;

        let raw = parse_model_output(text).unwrap();
        assert_eq!(raw.vendor_name.as_deref(), Some("Acme"));
        assert_eq!(raw.items.len(), 1);
    }

    #[test]
    fn test_error_marker_is_failure() {
        let text = r#"{"error": "quota exceeded", "raw_text": "Purchase Request #1"}"#;

        match parse_model_output(text) {
            Err(ExtractionError::Failed(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected extraction failure, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_model_output("Sorry, I cannot read this document."),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_non_object_is_failure() {
        assert!(matches!(
            parse_model_output("[1, 2, 3]"),
            Err(ExtractionError::Failed(_))
        ));
    }
}
