//! Mapping validation module for checking field-to-column associations
//!
//! This module provides functionality to:
//! - Classify type compatibility between extracted fields and database columns
//! - Validate mapping sets against snapshots of the field catalog and target schema
//! - Re-run validation continuously with latest-wins generation stamps
//! - Forward remediation advisories without mutating engine state
//!
//! # Example
//!
//! ```rust,ignore
//! use field_mapping_core::extraction::extract_json;
//! use field_mapping_core::mapping::{
//!     ColumnRef, ContinuousValidator, DatabaseColumn, FieldMapping, FieldRef, TargetSchema,
//! };
//!
//! let extraction = extract_json(r#"{"id": 7, "name": "Ada"}"#, Default::default());
//!
//! let schema = TargetSchema::new("users")
//!     .with_column(DatabaseColumn::new("id", "bigint"))
//!     .with_column(DatabaseColumn::new("name", "varchar(255)"));
//!
//! let mappings = vec![FieldMapping::new(
//!     FieldRef::new("name", "$.name"),
//!     ColumnRef::new("name"),
//! )];
//!
//! let validator = ContinuousValidator::new();
//! let outcome = validator.validate_now(&mappings, &extraction.fields, &schema);
//! if let Some(report) = outcome.report() {
//!     println!("Clean: {}", report.summary.is_clean());
//! }
//! ```

mod compatibility;
mod types;
mod validator;

pub use compatibility::{
    CompatibilityLevel, CompatibilityPolicy, CompatibilityResult, classify, parse_target_type,
};
pub use types::{
    ColumnRef, DatabaseColumn, FieldMapping, FieldRef, FixAdvisory, MappingStatus,
    MappingValidation, TargetSchema, ValidationReport, ValidationSummary,
};
pub use validator::{ContinuousValidator, MappingValidator, PassOutcome, ValidationPass};

/// Validate a mapping set once with the default compatibility policy
///
/// This is a convenience function for one-shot validation.
pub fn validate_mappings(
    mappings: &[FieldMapping],
    catalog: &[crate::extraction::Field],
    schema: &TargetSchema,
) -> Vec<MappingValidation> {
    let validator = MappingValidator::new();
    validator.validate(mappings, catalog, schema)
}
