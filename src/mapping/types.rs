//! Types for mapping declarations and validation results

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::compatibility::CompatibilityLevel;

/// Reference to a source field by catalog name and address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Disambiguated field name, unique within one catalog
    pub name: String,
    /// Canonical address of the field
    pub path: String,
}

impl FieldRef {
    /// Create a new field reference
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Reference to a target schema column by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Column name within the target schema
    pub name: String,
}

impl ColumnRef {
    /// Create a new column reference
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A user-declared association between a source field and a target column
///
/// Mappings are created and destroyed by the host's mapping editor; the
/// validation engine only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Stable mapping identifier
    pub id: String,
    /// Source side of the association
    pub source_field: FieldRef,
    /// Target side of the association
    pub target_field: ColumnRef,
}

impl FieldMapping {
    /// Create a mapping with a fresh random identifier
    pub fn new(source: FieldRef, target: ColumnRef) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_field: source,
            target_field: target,
        }
    }

    /// Create a mapping with a caller-supplied identifier
    pub fn with_id(id: impl Into<String>, source: FieldRef, target: ColumnRef) -> Self {
        Self {
            id: id.into(),
            source_field: source,
            target_field: target,
        }
    }
}

/// A column in the target database schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseColumn {
    /// Column name
    pub name: String,
    /// Column type as declared by the schema (e.g. `varchar(255)`, `jsonb`)
    #[serde(rename = "type")]
    pub column_type: String,
    /// Whether the column accepts NULL (default: true)
    #[serde(default = "default_true")]
    pub nullable: bool,
}

fn default_true() -> bool {
    true
}

impl DatabaseColumn {
    /// Create a nullable column
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable: true,
        }
    }

    /// Set whether the column accepts NULL
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Named, ordered collection of target columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSchema {
    /// Schema (table) name
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<DatabaseColumn>,
}

impl TargetSchema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column
    pub fn with_column(mut self, column: DatabaseColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&DatabaseColumn> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Overall status derived for one validated mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStatus {
    /// Source and target line up
    Compatible,
    /// Mapping works with a conversion to confirm
    Warning,
    /// Mapping cannot work as declared
    Error,
    /// Source field or target column no longer exists
    Missing,
}

impl From<CompatibilityLevel> for MappingStatus {
    fn from(level: CompatibilityLevel) -> Self {
        match level {
            CompatibilityLevel::Compatible => MappingStatus::Compatible,
            CompatibilityLevel::Warning => MappingStatus::Warning,
            CompatibilityLevel::Error => MappingStatus::Error,
        }
    }
}

impl std::fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingStatus::Compatible => write!(f, "compatible"),
            MappingStatus::Warning => write!(f, "warning"),
            MappingStatus::Error => write!(f, "error"),
            MappingStatus::Missing => write!(f, "missing"),
        }
    }
}

/// Validation outcome for a single mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingValidation {
    /// The mapping that was checked
    pub mapping: FieldMapping,
    /// Names referenced by the mapping that no longer resolve
    pub missing_fields: Vec<String>,
    /// Messages from the type compatibility classifier
    pub type_mismatches: Vec<String>,
    /// Derived status (missing beats error beats warning)
    pub status: MappingStatus,
}

/// Status counts across one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Mappings with no findings
    pub compatible: usize,
    /// Mappings with conversion warnings
    pub warnings: usize,
    /// Mappings with type errors
    pub errors: usize,
    /// Mappings referencing vanished fields or columns
    pub missing: usize,
    /// Total mappings checked
    pub total: usize,
}

impl ValidationSummary {
    /// Recount statuses across per-mapping results
    pub fn new(results: &[MappingValidation]) -> Self {
        let mut summary = ValidationSummary {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.status {
                MappingStatus::Compatible => summary.compatible += 1,
                MappingStatus::Warning => summary.warnings += 1,
                MappingStatus::Error => summary.errors += 1,
                MappingStatus::Missing => summary.missing += 1,
            }
        }
        summary
    }

    /// Check whether every mapping came back compatible
    pub fn is_clean(&self) -> bool {
        self.compatible == self.total
    }
}

/// Output of one validation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Generation stamp of the pass that produced this report
    pub generation: u64,
    /// Per-mapping outcomes in input order
    pub results: Vec<MappingValidation>,
    /// Status counts across all mappings
    pub summary: ValidationSummary,
    /// Wall-clock duration of the pass in milliseconds
    pub duration_ms: u64,
}

/// Advisory remediation note forwarded to the caller
///
/// Purely informational: forwarding one never mutates the engine, the
/// mapping set, or any report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixAdvisory {
    /// Identifier of the mapping the advice concerns
    pub mapping_id: String,
    /// Suggested remediation
    pub suggestion: String,
}
