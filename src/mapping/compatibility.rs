//! Type compatibility classification for field mappings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::extraction::FieldType;

/// Verdict level for one source/target type pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    /// Types line up, no action needed
    Compatible,
    /// Mapping works with a conversion the caller should confirm
    Warning,
    /// Mapping cannot work as declared
    Error,
}

impl CompatibilityLevel {
    /// Presentation color hint, fixed per level
    pub fn color(&self) -> &'static str {
        match self {
            CompatibilityLevel::Compatible => "#4CAF50",
            CompatibilityLevel::Warning => "#FF9800",
            CompatibilityLevel::Error => "#F44336",
        }
    }
}

impl std::fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompatibilityLevel::Compatible => write!(f, "compatible"),
            CompatibilityLevel::Warning => write!(f, "warning"),
            CompatibilityLevel::Error => write!(f, "error"),
        }
    }
}

/// Classifier verdict with presentation hint and remediation advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Verdict level
    pub level: CompatibilityLevel,
    /// Color hint derived from the level
    pub color: String,
    /// Ordered remediation suggestions
    pub suggestions: Vec<String>,
}

impl CompatibilityResult {
    /// A clean verdict with no suggestions
    pub fn compatible() -> Self {
        Self::at_level(CompatibilityLevel::Compatible)
    }

    /// A warning verdict carrying one suggestion
    pub fn warning(suggestion: impl Into<String>) -> Self {
        Self::at_level(CompatibilityLevel::Warning).with_suggestion(suggestion)
    }

    /// An error verdict carrying one suggestion
    pub fn error(suggestion: impl Into<String>) -> Self {
        Self::at_level(CompatibilityLevel::Error).with_suggestion(suggestion)
    }

    /// Append a remediation suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    fn at_level(level: CompatibilityLevel) -> Self {
        Self {
            level,
            color: level.color().to_string(),
            suggestions: Vec::new(),
        }
    }
}

/// Parse a schema column type string into a type tag
///
/// Accepts the seven canonical tags plus common database logical types;
/// parenthesized size arguments like `varchar(255)` are ignored.
pub fn parse_target_type(raw: &str) -> Option<FieldType> {
    let normalized = raw.trim().to_ascii_lowercase();
    let base = normalized.split('(').next().unwrap_or(&normalized).trim();

    if let Some(tag) = FieldType::parse_tag(base) {
        return Some(tag);
    }
    match base {
        "int" | "integer" | "bigint" | "smallint" | "float" | "double" | "decimal" | "numeric"
        | "real" => Some(FieldType::Number),
        "text" | "varchar" | "char" | "uuid" | "date" | "timestamp" | "datetime" => {
            Some(FieldType::String)
        }
        "bool" => Some(FieldType::Boolean),
        "json" | "jsonb" => Some(FieldType::Object),
        _ => None,
    }
}

/// Host-tunable classification policy
///
/// The fixed contract always holds: identical scalar tags are
/// compatible, number/string and boolean/string/number pairs warn with
/// a conversion suggestion, a container against a scalar is an error,
/// and an unrecognized target type is an error. Custom rules apply only
/// to the pairs the contract leaves open (nullish sources, nullish
/// targets, and object/array cross-pairs).
#[derive(Debug, Clone, Default)]
pub struct CompatibilityPolicy {
    rules: HashMap<(FieldType, FieldType), CompatibilityResult>,
}

impl CompatibilityPolicy {
    /// Create the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom verdict for a source/target pair
    ///
    /// Rules on pairs pinned by the fixed contract are ignored.
    pub fn with_rule(
        mut self,
        source: FieldType,
        target: FieldType,
        result: CompatibilityResult,
    ) -> Self {
        self.rules.insert((source, target), result);
        self
    }

    /// Classify one source/target type pair
    ///
    /// Stateless and total: every pair of tags has a verdict, and calls
    /// are independent, so the classifier may run concurrently without
    /// coordination.
    pub fn classify(&self, source: FieldType, target: &str) -> CompatibilityResult {
        let Some(target_tag) = parse_target_type(target) else {
            return CompatibilityResult::error(format!(
                "Target type '{}' is not recognized; use a supported column type",
                target
            ));
        };

        if !is_pinned(source, target_tag) {
            if let Some(custom) = self.rules.get(&(source, target_tag)) {
                return custom.clone();
            }
        }

        match (source, target_tag) {
            (s, t) if s == t => CompatibilityResult::compatible(),
            (s, _) if s.is_nullish() => CompatibilityResult::warning(
                "No sample value was seen for this field; confirm the column type manually",
            ),
            (_, t) if t.is_nullish() => CompatibilityResult::error(format!(
                "Target type '{}' cannot store values; choose a concrete column type",
                target
            )),
            (s, t) if s.is_container() && t.is_container() => CompatibilityResult::error(format!(
                "Source is {} but the column expects {}; re-map a matching sub-field",
                s, t
            )),
            (s, t) if s.is_container() => CompatibilityResult::error(format!(
                "Cannot store {} in a {} column; flatten it or map one of its sub-fields",
                s, t
            )),
            (s, t) if t.is_container() => CompatibilityResult::error(format!(
                "Column expects {} but the source is scalar {}; re-map a sub-field of the target",
                t, s
            )),
            (FieldType::Number, FieldType::String) | (FieldType::String, FieldType::Number) => {
                CompatibilityResult::warning(format!(
                    "Values need a {} to {} cast before loading",
                    source, target_tag
                ))
            }
            // Only boolean/string and boolean/number pairs remain
            _ => CompatibilityResult::warning(format!(
                "Convert {} to {} with an explicit rule (e.g. true/false literals)",
                source, target_tag
            )),
        }
    }
}

/// Check whether a pair's verdict is fixed by the classification contract
fn is_pinned(source: FieldType, target: FieldType) -> bool {
    let scalar = |t: FieldType| {
        matches!(
            t,
            FieldType::String | FieldType::Number | FieldType::Boolean
        )
    };
    match (source, target) {
        (s, t) if s == t && scalar(s) => true,
        (s, t) if s.is_container() && scalar(t) => true,
        (s, t) if scalar(s) && t.is_container() => true,
        (FieldType::Number, FieldType::String) | (FieldType::String, FieldType::Number) => true,
        (FieldType::Boolean, FieldType::String) | (FieldType::String, FieldType::Boolean) => true,
        (FieldType::Boolean, FieldType::Number) | (FieldType::Number, FieldType::Boolean) => true,
        _ => false,
    }
}

/// Classify one source/target type pair with the default policy
pub fn classify(source: FieldType, target: &str) -> CompatibilityResult {
    CompatibilityPolicy::default().classify(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_scalars_are_compatible() {
        let result = classify(FieldType::String, "string");
        assert_eq!(result.level, CompatibilityLevel::Compatible);
        assert!(result.suggestions.is_empty());
        assert_eq!(result.color, "#4CAF50");
    }

    #[test]
    fn test_number_string_pairs_warn_with_cast_suggestion() {
        let result = classify(FieldType::Number, "string");
        assert_eq!(result.level, CompatibilityLevel::Warning);
        assert!(result.suggestions[0].contains("cast"));
        assert_eq!(result.color, "#FF9800");

        let reverse = classify(FieldType::String, "number");
        assert_eq!(reverse.level, CompatibilityLevel::Warning);
    }

    #[test]
    fn test_boolean_scalar_pairs_warn() {
        assert_eq!(
            classify(FieldType::Boolean, "string").level,
            CompatibilityLevel::Warning
        );
        assert_eq!(
            classify(FieldType::Boolean, "number").level,
            CompatibilityLevel::Warning
        );
        assert_eq!(
            classify(FieldType::Number, "boolean").level,
            CompatibilityLevel::Warning
        );
    }

    #[test]
    fn test_container_against_scalar_is_error() {
        let result = classify(FieldType::Object, "string");
        assert_eq!(result.level, CompatibilityLevel::Error);
        assert!(result.suggestions[0].contains("flatten"));
        assert_eq!(result.color, "#F44336");

        assert_eq!(
            classify(FieldType::String, "array").level,
            CompatibilityLevel::Error
        );
    }

    #[test]
    fn test_identical_containers_are_compatible() {
        assert_eq!(
            classify(FieldType::Object, "object").level,
            CompatibilityLevel::Compatible
        );
        assert_eq!(
            classify(FieldType::Array, "array").level,
            CompatibilityLevel::Compatible
        );
    }

    #[test]
    fn test_unknown_target_is_error() {
        let result = classify(FieldType::String, "geometry");
        assert_eq!(result.level, CompatibilityLevel::Error);
        assert!(result.suggestions[0].contains("geometry"));
    }

    #[test]
    fn test_nullish_source_warns() {
        let result = classify(FieldType::Null, "string");
        assert_eq!(result.level, CompatibilityLevel::Warning);
        assert_eq!(
            classify(FieldType::Undefined, "number").level,
            CompatibilityLevel::Warning
        );
    }

    #[test]
    fn test_database_aliases_normalize() {
        assert_eq!(parse_target_type("integer"), Some(FieldType::Number));
        assert_eq!(parse_target_type("VARCHAR(255)"), Some(FieldType::String));
        assert_eq!(parse_target_type("decimal(10,2)"), Some(FieldType::Number));
        assert_eq!(parse_target_type("jsonb"), Some(FieldType::Object));
        assert_eq!(parse_target_type("bool"), Some(FieldType::Boolean));
        assert_eq!(parse_target_type("geometry"), None);

        assert_eq!(
            classify(FieldType::Number, "bigint").level,
            CompatibilityLevel::Compatible
        );
        assert_eq!(
            classify(FieldType::Object, "jsonb").level,
            CompatibilityLevel::Compatible
        );
    }

    #[test]
    fn test_custom_rule_applies_to_open_pair() {
        let policy = CompatibilityPolicy::new().with_rule(
            FieldType::Array,
            FieldType::Object,
            CompatibilityResult::warning("Arrays are accepted by this json column"),
        );
        let result = policy.classify(FieldType::Array, "jsonb");
        assert_eq!(result.level, CompatibilityLevel::Warning);
    }

    #[test]
    fn test_custom_rule_cannot_relax_pinned_pair() {
        let policy = CompatibilityPolicy::new().with_rule(
            FieldType::Object,
            FieldType::String,
            CompatibilityResult::compatible(),
        );
        // Container vs scalar stays an error regardless of custom rules
        let result = policy.classify(FieldType::Object, "string");
        assert_eq!(result.level, CompatibilityLevel::Error);
    }

    #[test]
    fn test_classifier_is_total_over_all_tag_pairs() {
        let tags = [
            FieldType::String,
            FieldType::Number,
            FieldType::Boolean,
            FieldType::Array,
            FieldType::Object,
            FieldType::Null,
            FieldType::Undefined,
        ];
        for source in tags {
            for target in tags {
                let result = classify(source, target.type_name());
                if result.level != CompatibilityLevel::Compatible {
                    assert!(
                        !result.suggestions.is_empty(),
                        "{} -> {} should carry advice",
                        source,
                        target
                    );
                }
            }
        }
    }
}
