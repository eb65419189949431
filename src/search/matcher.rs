//! Matching a single search term against an entry

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};

use crate::database::Entry;
use crate::error::Result;
use crate::utils::contains_phrase;
use super::parameters::{SearchFields, SearchParameters};

enum Pattern {
    Text(String),
    Regex(Regex),
}

/// Compiled form of one search pass
pub(crate) struct EntryMatcher<'p> {
    params: &'p SearchParameters,
    pattern: Pattern,
    now: DateTime<Utc>,
}

impl<'p> EntryMatcher<'p> {
    pub(crate) fn new(params: &'p SearchParameters, term: &str) -> Result<Self> {
        let pattern = if params.regular_expression {
            Pattern::Regex(
                RegexBuilder::new(term)
                    .case_insensitive(params.ignore_case)
                    .build()?,
            )
        } else {
            Pattern::Text(term.to_string())
        };

        Ok(Self {
            params,
            pattern,
            now: Utc::now(),
        })
    }

    pub(crate) fn is_match(&self, entry: &Entry) -> bool {
        if self.params.exclude_expired && entry.is_expired_at(self.now) {
            return false;
        }

        let fields = self.params.fields;
        (fields.contains(SearchFields::TITLES) && self.matches(&entry.title))
            || (fields.contains(SearchFields::USER_NAMES) && self.matches(&entry.username))
            || (fields.contains(SearchFields::URLS) && self.matches(&entry.url))
            || (fields.contains(SearchFields::PASSWORDS) && self.matches(&entry.password))
            || (fields.contains(SearchFields::NOTES) && self.matches(&entry.notes))
            || (fields.contains(SearchFields::UUIDS) && self.matches(&entry.uuid_hex()))
            || (fields.contains(SearchFields::OTHER)
                && entry.custom_fields.iter().any(|f| self.matches(&f.value)))
    }

    fn matches(&self, value: &str) -> bool {
        match &self.pattern {
            Pattern::Text(term) if self.params.ignore_case => contains_phrase(value, term),
            Pattern::Text(term) => value.contains(term.as_str()),
            Pattern::Regex(re) => re.is_match(value),
        }
    }
}
