//! Read-only queries over extracted field catalogs

use regex::Regex;

use super::error::ExtractionError;
use super::field::{Field, FieldType};

/// Flatten a catalog into a pre-order list
///
/// Parents are emitted before their children; this ordering is the
/// canonical "all fields" view the rest of the crate builds on.
pub fn flatten(fields: &[Field]) -> Vec<&Field> {
    let mut out = Vec::new();
    collect(fields, &mut out);
    out
}

fn collect<'a>(fields: &'a [Field], out: &mut Vec<&'a Field>) {
    for field in fields {
        out.push(field);
        collect(&field.nested, out);
    }
}

/// Keep only fields carrying the given type tag
pub fn filter_by_type(fields: &[Field], field_type: FieldType) -> Vec<&Field> {
    flatten(fields)
        .into_iter()
        .filter(|field| field.field_type == field_type)
        .collect()
}

/// Find fields whose path matches a wildcard pattern
///
/// `*` matches any run of characters; `.` and `$` are taken literally.
/// Matching is anchored against the full path. Patterns that do not
/// compile come back as an `InvalidPathPattern` error rather than a
/// panic.
pub fn find_by_path<'a>(
    fields: &'a [Field],
    pattern: &str,
) -> Result<Vec<&'a Field>, ExtractionError> {
    let matcher = compile_pattern(pattern)?;
    Ok(flatten(fields)
        .into_iter()
        .filter(|field| matcher.is_match(&field.path))
        .collect())
}

/// Translate a wildcard pattern into an anchored regex
///
/// Only `.` and `$` are escaped; bracket characters pass through to the
/// regex engine untouched, so indexed addresses like `$.tags[0]` are
/// reachable via `*` wildcards rather than literal bracket patterns.
fn compile_pattern(pattern: &str) -> Result<Regex, ExtractionError> {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for c in pattern.chars() {
        match c {
            '.' => translated.push_str(r"\."),
            '$' => translated.push_str(r"\$"),
            '*' => translated.push_str(".*"),
            other => translated.push(other),
        }
    }
    translated.push('$');

    Regex::new(&translated).map_err(|e| ExtractionError::InvalidPathPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Vec<Field> {
        vec![
            Field::new("id", FieldType::Number, "$.id"),
            Field::new("user", FieldType::Object, "$.user").with_nested(vec![
                Field::new("name", FieldType::String, "$.user.name"),
                Field::new("tags", FieldType::Array, "$.user.tags")
                    .with_nested(vec![Field::new("item_0", FieldType::String, "$.user.tags[0]")]),
            ]),
        ]
    }

    #[test]
    fn test_flatten_is_preorder() {
        let catalog = sample_catalog();
        let names: Vec<&str> = flatten(&catalog).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "user", "name", "tags", "item_0"]);
    }

    #[test]
    fn test_filter_by_type() {
        let catalog = sample_catalog();
        let strings = filter_by_type(&catalog, FieldType::String);
        assert_eq!(strings.len(), 2);
        assert!(strings.iter().all(|f| f.field_type == FieldType::String));
    }

    #[test]
    fn test_find_by_path_literal() {
        let catalog = sample_catalog();
        let found = find_by_path(&catalog, "$.user.name").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "name");
    }

    #[test]
    fn test_find_by_path_wildcard() {
        let catalog = sample_catalog();
        let found = find_by_path(&catalog, "$.user.*").unwrap();
        let names: Vec<&str> = found.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "tags", "item_0"]);
    }

    #[test]
    fn test_find_by_path_is_anchored() {
        let catalog = sample_catalog();
        // "$.user" must not match "$.user.name"
        let found = find_by_path(&catalog, "$.user").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "$.user");
    }

    #[test]
    fn test_find_by_path_brackets_are_not_escaped() {
        let catalog = sample_catalog();
        // Brackets become a regex character class, so the literal indexed
        // path does not match itself; a wildcard reaches it instead.
        let literal = find_by_path(&catalog, "$.user.tags[0]").unwrap();
        assert!(literal.is_empty());

        let wildcard = find_by_path(&catalog, "$.user.tags*").unwrap();
        assert_eq!(wildcard.len(), 2);
    }

    #[test]
    fn test_find_by_path_invalid_pattern() {
        let catalog = sample_catalog();
        let err = find_by_path(&catalog, "$.user.(").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPathPattern { .. }));
    }
}
