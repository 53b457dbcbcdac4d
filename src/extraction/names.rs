//! Per-pass field name disambiguation

use std::collections::HashSet;

/// Allocates unique field names for one extraction pass
///
/// The used-name set is global across the whole pass, not per sibling
/// level, and is scoped to a single extraction call. Claim order follows
/// traversal order: a property's own field claims before its subtree is
/// descended into, so collision suffixes depend on document order.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize a raw key into an identifier-safe name
    ///
    /// Every character outside `[A-Za-z0-9_]` becomes `_`.
    pub fn sanitize(raw: &str) -> String {
        raw.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect()
    }

    /// Claim a unique name derived from a raw key
    ///
    /// Returns the sanitized name, or the first unused `_1`, `_2`, …
    /// suffixed variant when the sanitized name was already claimed.
    pub fn claim(&mut self, raw: &str) -> String {
        let base = Self::sanitize(raw);
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut counter = 1usize;
        loop {
            let candidate = format!("{}_{}", base, counter);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Number of names claimed so far
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Check whether nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
