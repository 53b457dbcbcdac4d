//! Field extraction engine for JSON API responses
//!
//! This module turns an arbitrary JSON value into a deterministic,
//! uniquely-named, depth- and width-bounded field catalog with stable
//! path addresses, ready to be mapped onto a target database schema.
//!
//! ## Features
//!
//! - **Bounded traversal** - `max_depth` and `array_index_limit` cap the
//!   walk over untrusted payloads
//! - **Name disambiguation** - every field name is unique across the
//!   whole catalog, with `_1`/`_2` suffixes on collisions
//! - **Stable addressing** - `$`-rooted paths like `$.user.posts[0].title`
//! - **Failure-soft results** - problems are reported inside the result's
//!   `errors`/`warnings`, never thrown across the boundary
//!
//! ## Example
//!
//! ```rust,ignore
//! use field_mapping_core::extraction::{extract_fields, ExtractionOptions};
//!
//! let response = serde_json::json!({"user": {"name": "Ada", "posts": [1, 2]}});
//! let result = extract_fields(&response, ExtractionOptions::default());
//!
//! for field in field_mapping_core::extraction::flatten(&result.fields) {
//!     println!("{} ({}) at {}", field.name, field.field_type, field.path);
//! }
//! ```

mod engine;
mod error;
mod field;
mod names;
mod options;
mod path;
mod query;
mod stats;

pub use engine::{ExtractionResult, FieldExtractor};
pub use error::ExtractionError;
pub use field::{Field, FieldType};
pub use names::NameRegistry;
pub use options::{ExtractionOptions, ExtractionOptionsBuilder, TypeDetector};
pub use path::{ROOT_PATH, append_segment, build_path};
pub use query::{filter_by_type, find_by_path, flatten};
pub use stats::{ExtractionStats, summarize};

use serde_json::Value;

/// Extract a field catalog from a parsed JSON value
pub fn extract_fields(data: &Value, options: ExtractionOptions) -> ExtractionResult {
    FieldExtractor::with_options(options).extract(data)
}

/// Parse a JSON string and extract a field catalog from it
///
/// Parse failures degrade to an empty result carrying one error string,
/// matching the engine's never-throw contract.
pub fn extract_json(text: &str, options: ExtractionOptions) -> ExtractionResult {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => extract_fields(&value, options),
        Err(e) => ExtractionResult::failed(ExtractionError::from(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_fields_convenience() {
        let result = extract_fields(
            &json!({"name": "Ada", "age": 36}),
            ExtractionOptions::default(),
        );
        assert_eq!(result.fields.len(), 2);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_extract_json_parses_and_extracts() {
        let result = extract_json(r#"{"a": 1, "b": [true]}"#, ExtractionOptions::default());
        assert_eq!(result.fields.len(), 2);
        assert!(result.is_ok());
    }

    #[test]
    fn test_extract_json_surfaces_parse_failure_as_data() {
        let result = extract_json("{not valid json", ExtractionOptions::default());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("JSON parsing error"));
        assert!(result.fields.is_empty());
    }

    #[test]
    fn test_module_surface_round_trip() {
        let result = extract_fields(
            &json!({"user": {"tags": ["a", "b"]}}),
            ExtractionOptions::default(),
        );
        let all = flatten(&result.fields);
        let tagged = find_by_path(&result.fields, "$.user.tags*").unwrap();

        assert!(all.len() > tagged.len());
        assert!(tagged.iter().all(|f| f.path.starts_with("$.user.tags")));
    }
}
