//! Error types for field extraction

use thiserror::Error;

/// Failures surfaced while building or querying a field catalog
///
/// Extraction itself never returns these as `Err`: the engine renders
/// them into the `errors`/`warnings` lists of the result so that no
/// failure crosses the public boundary as an exception.
#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    /// Root value was null, nothing to extract
    #[error("Cannot extract fields: input data is null")]
    NullInput,

    /// A subtree sat past the configured depth bound and was skipped
    #[error("Maximum nesting depth {max} exceeded at {path}")]
    DepthLimitExceeded { path: String, max: usize },

    /// An array was wider than the configured index window
    #[error("Array at {path} truncated: processed first {processed} of {total} items")]
    ArrayTruncated {
        path: String,
        processed: usize,
        total: usize,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// A find_by_path pattern did not compile to a valid matcher
    #[error("Invalid path pattern '{pattern}': {reason}")]
    InvalidPathPattern { pattern: String, reason: String },
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        ExtractionError::JsonParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_message_names_path_and_limit() {
        let err = ExtractionError::DepthLimitExceeded {
            path: "$.a.b".to_string(),
            max: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("$.a.b"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_truncation_message_names_counts() {
        let err = ExtractionError::ArrayTruncated {
            path: "$.items".to_string(),
            processed: 5,
            total: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("$.items"));
        assert!(msg.contains('5'));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ExtractionError = parse_err.into();
        assert!(matches!(err, ExtractionError::JsonParse(_)));
    }
}
