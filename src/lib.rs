//! Field Mapping Core - Shared library for response-to-schema mapping operations
//!
//! Provides unified interfaces for:
//! - Field extraction from JSON API responses (bounded traversal, stable naming)
//! - Catalog queries over extracted field trees
//! - Type compatibility classification between fields and database columns
//! - Continuous mapping validation with latest-wins generation stamps

pub mod extraction;
pub mod mapping;

// Re-export extraction types
pub use extraction::{
    ExtractionError, ExtractionOptions, ExtractionOptionsBuilder, ExtractionResult,
    ExtractionStats, Field, FieldExtractor, FieldType, extract_fields, extract_json,
};

// Re-export mapping types
pub use mapping::{
    CompatibilityLevel, CompatibilityPolicy, CompatibilityResult, ContinuousValidator,
    DatabaseColumn, FieldMapping, FixAdvisory, MappingStatus, MappingValidation, MappingValidator,
    PassOutcome, TargetSchema, ValidationReport, ValidationSummary,
};
