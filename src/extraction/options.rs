//! Configuration for field extraction

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::field::FieldType;

/// Override hook for classifying raw values into type tags
pub type TypeDetector = Arc<dyn Fn(&Value) -> FieldType + Send + Sync>;

/// Tuning options for one extraction pass
///
/// Options are supplied per call, never held as global state, so two
/// extractions with different options cannot interfere.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOptions {
    /// Maximum nesting depth to descend into (deeper subtrees are skipped)
    pub max_depth: usize,

    /// Emit fields for null values instead of dropping them silently
    pub include_null_values: bool,

    /// Maximum array items to expand per array (0 = all)
    pub array_index_limit: usize,

    /// Optional override for value classification
    #[serde(skip)]
    pub type_detector: Option<TypeDetector>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            max_depth: 10,
            include_null_values: false,
            array_index_limit: 5,
            type_detector: None,
        }
    }
}

impl ExtractionOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom options
    pub fn builder() -> ExtractionOptionsBuilder {
        ExtractionOptionsBuilder::default()
    }

    /// Classify a raw value through the custom detector, or the default rules
    pub fn classify(&self, value: &Value) -> FieldType {
        match &self.type_detector {
            Some(detector) => detector(value),
            None => FieldType::of_value(value),
        }
    }
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("max_depth", &self.max_depth)
            .field("include_null_values", &self.include_null_values)
            .field("array_index_limit", &self.array_index_limit)
            .field("type_detector", &self.type_detector.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Builder for ExtractionOptions
#[derive(Debug, Default)]
pub struct ExtractionOptionsBuilder {
    options: ExtractionOptions,
}

impl ExtractionOptionsBuilder {
    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }

    /// Emit fields for null values
    pub fn include_null_values(mut self, include: bool) -> Self {
        self.options.include_null_values = include;
        self
    }

    /// Set the maximum array items to expand (0 = all)
    pub fn array_index_limit(mut self, limit: usize) -> Self {
        self.options.array_index_limit = limit;
        self
    }

    /// Install a custom type detector
    pub fn type_detector(
        mut self,
        detector: impl Fn(&Value) -> FieldType + Send + Sync + 'static,
    ) -> Self {
        self.options.type_detector = Some(Arc::new(detector));
        self
    }

    /// Build the options
    pub fn build(self) -> ExtractionOptions {
        self.options
    }
}
