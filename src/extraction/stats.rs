//! Catalog statistics

use serde::{Deserialize, Serialize};

use super::field::{Field, FieldType};

/// Summary statistics for one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Number of top-level fields in the catalog
    pub total_fields: usize,
    /// Deepest nesting level reached (top-level fields sit at 1, empty catalog at 0)
    pub max_depth: usize,
    /// Array fields counted over the whole tree
    pub array_fields: usize,
    /// Object fields counted over the whole tree
    pub object_fields: usize,
    /// Primitive fields counted over the whole tree
    pub primitive_fields: usize,
}

/// Summarize a field catalog
///
/// `total_fields` reflects only the top-level sequence length while the
/// per-type counters walk the whole tree, so the numbers diverge for
/// nested data. Callers rely on that asymmetry; keep it.
pub fn summarize(fields: &[Field]) -> ExtractionStats {
    let mut stats = ExtractionStats {
        total_fields: fields.len(),
        ..Default::default()
    };
    for field in fields {
        tally(field, 1, &mut stats);
    }
    stats
}

fn tally(field: &Field, depth: usize, stats: &mut ExtractionStats) {
    stats.max_depth = stats.max_depth.max(depth);
    match field.field_type {
        FieldType::Array => stats.array_fields += 1,
        FieldType::Object => stats.object_fields += 1,
        // Everything else counts as primitive, null and undefined included
        _ => stats.primitive_fields += 1,
    }
    for child in &field.nested {
        tally(child, depth + 1, stats);
    }
}
