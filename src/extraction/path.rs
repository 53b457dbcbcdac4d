//! Canonical path addresses for extracted fields
//!
//! Addresses follow the grammar `$` followed by `.segment` or `[digits]`
//! parts, e.g. `$.user.posts[0].title`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Address of the document root
pub const ROOT_PATH: &str = "$";

static INDEX_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Build a canonical address from ordered path segments
///
/// Purely-numeric segments render with bracket notation, everything else
/// with dot notation. The rule is applied uniformly whether a segment
/// came from an object key or an array index, so a numeric object key
/// also renders as `[n]`.
pub fn build_path(segments: &[&str]) -> String {
    let mut path = String::from(ROOT_PATH);
    for segment in segments {
        push_segment(&mut path, segment);
    }
    path
}

/// Append a single segment to an existing address
pub fn append_segment(base: &str, segment: &str) -> String {
    let mut path = String::with_capacity(base.len() + segment.len() + 2);
    path.push_str(base);
    push_segment(&mut path, segment);
    path
}

fn push_segment(path: &mut String, segment: &str) {
    if INDEX_SEGMENT.is_match(segment) {
        path.push('[');
        path.push_str(segment);
        path.push(']');
    } else {
        path.push('.');
        path.push_str(segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_segments_is_root() {
        assert_eq!(build_path(&[]), "$");
    }

    #[test]
    fn test_mixed_segments() {
        assert_eq!(
            build_path(&["user", "posts", "0", "title"]),
            "$.user.posts[0].title"
        );
    }

    #[test]
    fn test_numeric_object_key_renders_with_brackets() {
        // The joiner is not array-aware: digit keys take bracket form too
        assert_eq!(build_path(&["config", "404"]), "$.config[404]");
    }

    #[test]
    fn test_non_numeric_segments_use_dots() {
        assert_eq!(build_path(&["a1", "1a"]), "$.a1.1a");
    }

    #[test]
    fn test_append_segment() {
        assert_eq!(append_segment("$.items", "3"), "$.items[3]");
        assert_eq!(append_segment("$.items[3]", "name"), "$.items[3].name");
    }
}
