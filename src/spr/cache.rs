//! Substitution cache: raw reference text to its compiled replacement

use crate::error::Result;
use crate::utils::IgnoreCaseLiteral;

#[derive(Debug, Clone)]
struct CachedRef {
    matcher: IgnoreCaseLiteral,
    value: String,
}

/// Resolved references of one top-level compilation
///
/// Keys compare case-insensitively, with the same matcher that substitutes
/// them. The first value stored for a reference is kept; later inserts for
/// the same reference are ignored. Substitution runs in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RefCache {
    entries: Vec<CachedRef>,
}

impl RefCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|c| c.matcher.is_match_exact(reference))
            .map(|c| c.value.as_str())
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.get(reference).is_some()
    }

    /// Store a replacement unless the reference is already cached
    ///
    /// Occurrences of `reference` inside `value` are removed first, so a
    /// stored value never expands into itself.
    ///
    /// # Returns
    /// `true` if the value was stored
    ///
    /// # Errors
    /// `RefError::InvalidRegex` if no matcher can be built for `reference`
    pub fn insert(&mut self, reference: &str, value: String) -> Result<bool> {
        if reference.is_empty() || self.contains(reference) {
            return Ok(false);
        }
        let matcher = IgnoreCaseLiteral::new(reference)?;
        let value = matcher.replace_all(&value, "");
        self.entries.push(CachedRef { matcher, value });
        Ok(true)
    }

    /// Replace every occurrence of every cached reference in `text`
    pub fn apply(&self, text: &str) -> String {
        self.entries
            .iter()
            .fold(text.to_string(), |acc, c| c.matcher.replace_all(&acc, &c.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
