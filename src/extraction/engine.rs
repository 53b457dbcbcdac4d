//! Field extraction engine
//!
//! Walks a raw JSON value into a bounded, uniquely-named field catalog.
//! The walk runs over an explicit frame stack instead of call-stack
//! recursion, so `max_depth` is enforced by bookkeeping and adversarial
//! nesting cannot exhaust the stack.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::ExtractionError;
use super::field::{Field, FieldType};
use super::names::NameRegistry;
use super::options::ExtractionOptions;
use super::path::{self, ROOT_PATH};
use super::stats::{self, ExtractionStats};

/// Name seed for the synthetic field standing in for a primitive root
const ROOT_VALUE_SEED: &str = "root_value";
/// Name seed for fields emitted in place of null values
const NULL_VALUE_SEED: &str = "null_value";
/// Name seed for the synthetic array descriptor field
const ARRAY_INFO_SEED: &str = "array_info";

/// Result of one extraction pass
///
/// Always handed back as a value: failures land in `errors` and
/// `warnings` instead of crossing the boundary as an `Err` or a panic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted field catalog (top-level fields carrying nested children)
    pub fields: Vec<Field>,
    /// Fatal problems; when non-empty the catalog is empty
    pub errors: Vec<String>,
    /// Non-fatal observations such as depth cutoffs and array truncation
    pub warnings: Vec<String>,
    /// Catalog statistics
    pub statistics: ExtractionStats,
}

impl ExtractionResult {
    /// Build the degraded result for a failure that aborts the whole pass
    pub fn failed(error: ExtractionError) -> Self {
        Self {
            errors: vec![error.to_string()],
            ..Default::default()
        }
    }

    /// Check whether the pass completed without fatal errors
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Builds field catalogs from raw JSON values
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    options: ExtractionOptions,
}

impl FieldExtractor {
    /// Create an extractor with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options
    pub fn with_options(options: ExtractionOptions) -> Self {
        Self { options }
    }

    /// Get the active options
    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Run one extraction pass over a raw JSON value
    ///
    /// The same value and options always produce a structurally identical
    /// result; the pass holds no state beyond its own call.
    pub fn extract(&self, data: &Value) -> ExtractionResult {
        if data.is_null() {
            debug!("Extraction rejected: root value is null");
            return ExtractionResult::failed(ExtractionError::NullInput);
        }

        debug!(
            max_depth = self.options.max_depth,
            array_index_limit = self.options.array_index_limit,
            "Extraction pass started"
        );
        let mut pass = Pass::new(&self.options);
        let fields = pass.collect(data);
        let statistics = stats::summarize(&fields);
        debug!(
            fields = statistics.total_fields,
            warnings = pass.warnings.len(),
            "Extraction pass complete"
        );

        ExtractionResult {
            fields,
            errors: Vec::new(),
            warnings: pass.warnings,
            statistics,
        }
    }
}

/// Node in the temporary build arena; children link to parents by index
struct ArenaNode {
    parent: Option<usize>,
    field: Field,
}

/// A container whose entries are still being consumed
///
/// `depth` is the nesting level of the container's children: entries of
/// the root container sit at depth 1.
enum Frame<'a> {
    Object {
        entries: serde_json::map::Iter<'a>,
        path: String,
        depth: usize,
        parent: Option<usize>,
    },
    Array {
        items: &'a [Value],
        next: usize,
        limit: usize,
        path: String,
        depth: usize,
        parent: Option<usize>,
    },
}

/// Working state for a single extraction pass
struct Pass<'a> {
    options: &'a ExtractionOptions,
    names: NameRegistry,
    warnings: Vec<String>,
    nodes: Vec<ArenaNode>,
    stack: Vec<Frame<'a>>,
}

impl<'a> Pass<'a> {
    fn new(options: &'a ExtractionOptions) -> Self {
        Self {
            options,
            names: NameRegistry::new(),
            warnings: Vec::new(),
            nodes: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Walk the root value and return the assembled top-level fields
    fn collect(&mut self, root: &'a Value) -> Vec<Field> {
        let root_tag = self.options.classify(root);
        match (root_tag, root) {
            (FieldType::Object, Value::Object(map)) => {
                self.expand_object(map, ROOT_PATH.to_string(), 1, None);
            }
            (FieldType::Array, Value::Array(items)) => {
                self.expand_array(items, ROOT_PATH.to_string(), 1, None);
            }
            _ => {
                // Primitive or nullish root: no tree walk at all, just a
                // single stand-in field addressing the document root.
                let name = self.names.claim(ROOT_VALUE_SEED);
                return vec![Field::new(name, root_tag, ROOT_PATH)];
            }
        }

        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Object {
                    mut entries,
                    path,
                    depth,
                    parent,
                } => {
                    if let Some((key, value)) = entries.next() {
                        let value_path = path::append_segment(&path, key);
                        // Put the remainder back before descending so the
                        // subtree is finished ahead of the next sibling.
                        self.stack.push(Frame::Object {
                            entries,
                            path,
                            depth,
                            parent,
                        });
                        self.visit_value(key, value, value_path, depth, parent);
                    }
                }
                Frame::Array {
                    items,
                    next,
                    limit,
                    path,
                    depth,
                    parent,
                } => {
                    if next < limit {
                        let value = &items[next];
                        let seed = format!("item_{}", next);
                        let value_path = path::append_segment(&path, &next.to_string());
                        self.stack.push(Frame::Array {
                            items,
                            next: next + 1,
                            limit,
                            path,
                            depth,
                            parent,
                        });
                        self.visit_value(&seed, value, value_path, depth, parent);
                    } else {
                        if limit < items.len() {
                            self.warn_truncated(&path, limit, items.len());
                        }
                        self.emit_array_info(&path, parent);
                    }
                }
            }
        }

        Self::assemble(std::mem::take(&mut self.nodes))
    }

    /// Emit the field for one container entry and queue its subtree
    fn visit_value(
        &mut self,
        name_seed: &str,
        value: &'a Value,
        value_path: String,
        container_depth: usize,
        parent: Option<usize>,
    ) {
        let tag = self.options.classify(value);

        if tag.is_nullish() {
            // Null values claim the null_value seed, never their own key,
            // and only appear when the options ask for them.
            if self.options.include_null_values {
                let name = self.names.claim(NULL_VALUE_SEED);
                self.nodes.push(ArenaNode {
                    parent,
                    field: Field::new(name, tag, value_path),
                });
            }
            return;
        }

        let name = self.names.claim(name_seed);
        let index = self.nodes.len();
        self.nodes.push(ArenaNode {
            parent,
            field: Field::new(name, tag, value_path.clone()),
        });

        match (tag, value) {
            (FieldType::Object, Value::Object(map)) => {
                self.expand_object(map, value_path, container_depth + 1, Some(index));
            }
            (FieldType::Array, Value::Array(items)) => {
                self.expand_array(items, value_path, container_depth + 1, Some(index));
            }
            _ => {}
        }
    }

    /// Queue an object's entries, or record the depth cutoff
    fn expand_object(
        &mut self,
        map: &'a Map<String, Value>,
        path: String,
        depth: usize,
        parent: Option<usize>,
    ) {
        if depth > self.options.max_depth {
            self.warn_depth(path);
            return;
        }
        self.stack.push(Frame::Object {
            entries: map.iter(),
            path,
            depth,
            parent,
        });
    }

    /// Queue an array's leading items, or record the depth cutoff
    fn expand_array(&mut self, items: &'a [Value], path: String, depth: usize, parent: Option<usize>) {
        if depth > self.options.max_depth {
            self.warn_depth(path);
            return;
        }
        let limit = if self.options.array_index_limit == 0 {
            items.len()
        } else {
            items.len().min(self.options.array_index_limit)
        };
        self.stack.push(Frame::Array {
            items,
            next: 0,
            limit,
            path,
            depth,
            parent,
        });
    }

    /// Append the synthetic array descriptor and its placeholder children
    ///
    /// `length` and `processed_count` are type descriptors with fixed
    /// names; they are never bound to the real counts.
    fn emit_array_info(&mut self, array_path: &str, parent: Option<usize>) {
        let name = self.names.claim(ARRAY_INFO_SEED);
        let info_index = self.nodes.len();
        self.nodes.push(ArenaNode {
            parent,
            field: Field::new(name, FieldType::Object, array_path),
        });
        self.nodes.push(ArenaNode {
            parent: Some(info_index),
            field: Field::new(
                "length",
                FieldType::Number,
                path::append_segment(array_path, "length"),
            ),
        });
        self.nodes.push(ArenaNode {
            parent: Some(info_index),
            field: Field::new(
                "processed_count",
                FieldType::Number,
                path::append_segment(array_path, "processed_count"),
            ),
        });
    }

    fn warn_depth(&mut self, path: String) {
        warn!(path = %path, max_depth = self.options.max_depth, "Depth limit reached, skipping subtree");
        self.warnings.push(
            ExtractionError::DepthLimitExceeded {
                path,
                max: self.options.max_depth,
            }
            .to_string(),
        );
    }

    fn warn_truncated(&mut self, path: &str, processed: usize, total: usize) {
        warn!(path = %path, processed, total, "Array truncated at index limit");
        self.warnings.push(
            ExtractionError::ArrayTruncated {
                path: path.to_string(),
                processed,
                total,
            }
            .to_string(),
        );
    }

    /// Fold the arena back into owned trees
    ///
    /// Nodes were created in traversal order, so every child has a higher
    /// index than its parent. Popping from the back moves each node into
    /// its parent before the parent itself is moved, collecting children
    /// in reverse; one reversal per node restores document order.
    fn assemble(mut nodes: Vec<ArenaNode>) -> Vec<Field> {
        let mut roots = Vec::new();
        while let Some(mut node) = nodes.pop() {
            node.field.nested.reverse();
            match node.parent {
                Some(index) => nodes[index].field.nested.push(node.field),
                None => roots.push(node.field),
            }
        }
        roots.reverse();
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_object() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract(&json!({"id": 7, "name": "Ada", "active": true}));

        assert!(result.is_ok());
        assert_eq!(result.fields.len(), 3);
        assert_eq!(result.fields[0].name, "active");
        assert_eq!(result.fields[0].field_type, FieldType::Boolean);
        assert_eq!(result.fields[0].path, "$.active");
        assert_eq!(result.statistics.total_fields, 3);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_nested_object_attaches_children() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract(&json!({"user": {"id": 1, "name": "Ada"}}));

        assert_eq!(result.fields.len(), 1);
        let user = &result.fields[0];
        assert_eq!(user.field_type, FieldType::Object);
        assert_eq!(user.nested.len(), 2);
        assert_eq!(user.nested[0].path, "$.user.id");
        assert_eq!(user.nested[1].path, "$.user.name");
    }

    #[test]
    fn test_null_root_is_input_error() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract(&json!(null));

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("null"));
        assert!(result.fields.is_empty());
        assert_eq!(result.statistics, ExtractionStats::default());
    }

    #[test]
    fn test_primitive_root_yields_root_value() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract(&json!(42));

        assert_eq!(result.fields.len(), 1);
        assert_eq!(result.fields[0].name, "root_value");
        assert_eq!(result.fields[0].field_type, FieldType::Number);
        assert_eq!(result.fields[0].path, "$");
        assert_eq!(result.statistics.total_fields, 1);
        assert_eq!(result.statistics.primitive_fields, 1);
        assert_eq!(result.statistics.object_fields, 0);
    }

    #[test]
    fn test_depth_guard_drops_subtree_with_warning() {
        let options = ExtractionOptions::builder().max_depth(1).build();
        let extractor = FieldExtractor::with_options(options);
        let result = extractor.extract(&json!({"a": {"b": 1}}));

        assert_eq!(result.fields.len(), 1);
        let a = &result.fields[0];
        assert_eq!(a.field_type, FieldType::Object);
        assert!(a.nested.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("$.a"));
    }

    #[test]
    fn test_zero_depth_blocks_container_root() {
        let options = ExtractionOptions::builder().max_depth(0).build();
        let extractor = FieldExtractor::with_options(options);
        let result = extractor.extract(&json!({"a": 1}));

        assert!(result.fields.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains('$'));
    }

    #[test]
    fn test_array_truncation_and_descriptor() {
        let options = ExtractionOptions::builder().array_index_limit(2).build();
        let extractor = FieldExtractor::with_options(options);
        let result = extractor.extract(&json!({"items": [10, 20, 30, 40]}));

        let items = &result.fields[0];
        let names: Vec<&str> = items.nested.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["item_0", "item_1", "array_info"]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("$.items"));
        assert!(result.warnings[0].contains('2'));
        assert!(result.warnings[0].contains('4'));

        let info = &items.nested[2];
        assert_eq!(info.field_type, FieldType::Object);
        assert_eq!(info.path, "$.items");
        assert_eq!(info.nested[0].name, "length");
        assert_eq!(info.nested[0].path, "$.items.length");
        assert_eq!(info.nested[1].name, "processed_count");
        assert_eq!(info.nested[1].field_type, FieldType::Number);
    }

    #[test]
    fn test_empty_array_still_gets_descriptor() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract(&json!({"items": []}));

        let items = &result.fields[0];
        assert_eq!(items.nested.len(), 1);
        assert_eq!(items.nested[0].name, "array_info");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_array_limit_zero_processes_everything() {
        let options = ExtractionOptions::builder().array_index_limit(0).build();
        let extractor = FieldExtractor::with_options(options);
        let result = extractor.extract(&json!([1, 2, 3, 4, 5, 6, 7, 8]));

        // 8 items plus the descriptor, nothing truncated
        assert_eq!(result.fields.len(), 9);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_null_values_dropped_by_default() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract(&json!({"a": null, "b": 1}));

        assert_eq!(result.fields.len(), 1);
        assert_eq!(result.fields[0].name, "b");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_null_values_included_on_request() {
        let options = ExtractionOptions::builder().include_null_values(true).build();
        let extractor = FieldExtractor::with_options(options);
        let result = extractor.extract(&json!({"a": null, "b": 1}));

        assert_eq!(result.fields.len(), 2);
        let null_field = &result.fields[0];
        assert_eq!(null_field.name, "null_value");
        assert_eq!(null_field.field_type, FieldType::Null);
        assert_eq!(null_field.path, "$.a");
    }

    #[test]
    fn test_extraction_is_pure() {
        let extractor = FieldExtractor::with_options(
            ExtractionOptions::builder()
                .array_index_limit(2)
                .include_null_values(true)
                .build(),
        );
        let data = json!({"a": [1, 2, 3], "b": {"c": null}, "a-b": 5});

        assert_eq!(extractor.extract(&data), extractor.extract(&data));
    }

    #[test]
    fn test_custom_detector_reroutes_root() {
        let options = ExtractionOptions::builder()
            .type_detector(|_| FieldType::Undefined)
            .build();
        let extractor = FieldExtractor::with_options(options);
        let result = extractor.extract(&json!({"a": 1}));

        // A nullish root classification skips the tree walk entirely
        assert_eq!(result.fields.len(), 1);
        assert_eq!(result.fields[0].name, "root_value");
        assert_eq!(result.fields[0].field_type, FieldType::Undefined);
    }

    #[test]
    fn test_sibling_names_collide_across_levels() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract(&json!({"a": {"x": 1}, "b": {"x": 2}}));

        let first = &result.fields[0].nested[0];
        let second = &result.fields[1].nested[0];
        assert_eq!(first.name, "x");
        assert_eq!(second.name, "x_1");
    }
}
