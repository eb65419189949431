//! Common text utility functions

use regex::{NoExpand, Regex, RegexBuilder};

use crate::error::Result;

/// Case-insensitive matcher for a literal string, compiled once
///
/// Case folding is the regex engine's simple Unicode folding, so `find_from`,
/// `is_match_exact` and `replace_all` always agree on what matches.
#[derive(Debug, Clone)]
pub struct IgnoreCaseLiteral {
    regex: Regex,
}

impl IgnoreCaseLiteral {
    /// # Errors
    /// `RefError::InvalidRegex` if the literal exceeds the regex size limit
    pub fn new(literal: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&regex::escape(literal))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex })
    }

    /// Byte offset of the first occurrence at or after `from`
    ///
    /// `None` if there is none or `from` is not a valid position in `text`.
    pub fn find_from(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() || !text.is_char_boundary(from) {
            return None;
        }
        self.regex.find_at(text, from).map(|m| m.start())
    }

    /// True if the whole of `text` is one occurrence of the literal
    pub fn is_match_exact(&self, text: &str) -> bool {
        self.regex
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len())
    }

    /// Replace every occurrence in `text`
    ///
    /// The replacement is inserted literally (no `$group` expansion) and the
    /// result is not re-scanned.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        if self.regex.as_str().is_empty() {
            return text.to_string();
        }
        self.regex.replace_all(text, NoExpand(replacement)).into_owned()
    }
}

/// Check if a string contains the search phrase (case-insensitive)
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.to_lowercase().contains(&phrase.to_lowercase())
}

/// Split a search string into terms
///
/// Terms are separated by whitespace; a double-quoted run is kept together as
/// one term with the quotes removed.
pub fn split_search_terms(search: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in search.chars() {
        if c.is_whitespace() && !quoted {
            if !current.is_empty() {
                terms.push(std::mem::take(&mut current));
            }
        } else if c == '"' {
            quoted = !quoted;
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }

    terms
}
