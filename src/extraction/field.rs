//! Field catalog types produced by extraction

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag assigned to an extracted field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// String value
    String,
    /// Numeric value (integer or float)
    Number,
    /// Boolean value
    Boolean,
    /// Array container
    Array,
    /// Object container
    Object,
    /// Null value
    Null,
    /// Undefined value (only produced by custom detectors)
    Undefined,
}

impl FieldType {
    /// Get the lowercase tag name
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Null => "null",
            FieldType::Undefined => "undefined",
        }
    }

    /// Classify a raw JSON value with the default rules
    pub fn of_value(value: &Value) -> FieldType {
        match value {
            Value::Null => FieldType::Null,
            Value::Bool(_) => FieldType::Boolean,
            Value::Number(_) => FieldType::Number,
            Value::String(_) => FieldType::String,
            Value::Array(_) => FieldType::Array,
            Value::Object(_) => FieldType::Object,
        }
    }

    /// Parse an exact tag name back into a type tag
    pub fn parse_tag(tag: &str) -> Option<FieldType> {
        match tag {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "boolean" => Some(FieldType::Boolean),
            "array" => Some(FieldType::Array),
            "object" => Some(FieldType::Object),
            "null" => Some(FieldType::Null),
            "undefined" => Some(FieldType::Undefined),
            _ => None,
        }
    }

    /// Check if this tag is a container (object or array)
    pub fn is_container(&self) -> bool {
        matches!(self, FieldType::Object | FieldType::Array)
    }

    /// Check if this tag carries no value information
    pub fn is_nullish(&self) -> bool {
        matches!(self, FieldType::Null | FieldType::Undefined)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single extracted field
///
/// Field trees are immutable value objects; a new extraction pass
/// replaces the whole catalog rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Disambiguated name, unique across the whole catalog
    pub name: String,
    /// Detected type tag
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Canonical address within the source document (e.g. `$.user.posts[0].title`)
    pub path: String,
    /// Child fields for containers, omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Field>,
}

impl Field {
    /// Create a new leaf field
    pub fn new(name: impl Into<String>, field_type: FieldType, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            path: path.into(),
            nested: Vec::new(),
        }
    }

    /// Attach child fields
    pub fn with_nested(mut self, nested: Vec<Field>) -> Self {
        self.nested = nested;
        self
    }

    /// Check if this field has no children
    pub fn is_leaf(&self) -> bool {
        self.nested.is_empty()
    }
}
