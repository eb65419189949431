//! Search parameters

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Entry fields a search string is matched against.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SearchFields: u8 {
        const TITLES     = 1 << 0;
        const USER_NAMES = 1 << 1;
        const URLS       = 1 << 2;
        const PASSWORDS  = 1 << 3;
        const NOTES      = 1 << 4;
        const UUIDS      = 1 << 5;
        /// Custom string fields
        const OTHER      = 1 << 6;
    }
}

impl SearchFields {
    /// Map a reference scan selector (`T`, `U`, `A`, `P`, `N`, `I`, `O`) to its field
    pub fn from_scan(selector: char) -> Option<Self> {
        match selector.to_ascii_uppercase() {
            'T' => Some(Self::TITLES),
            'U' => Some(Self::USER_NAMES),
            'A' => Some(Self::URLS),
            'P' => Some(Self::PASSWORDS),
            'N' => Some(Self::NOTES),
            'I' => Some(Self::UUIDS),
            'O' => Some(Self::OTHER),
            _ => None,
        }
    }
}

/// What to search for and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParameters {
    /// One or more whitespace-separated terms; `-term` excludes
    pub search_string: String,
    pub fields: SearchFields,
    /// Treat the whole search string as one regular expression
    pub regular_expression: bool,
    pub ignore_case: bool,
    /// Skip entries whose expiry time has passed
    pub exclude_expired: bool,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            search_string: String::new(),
            fields: SearchFields::TITLES
                | SearchFields::USER_NAMES
                | SearchFields::URLS
                | SearchFields::NOTES
                | SearchFields::OTHER,
            regular_expression: false,
            ignore_case: true,
            exclude_expired: false,
        }
    }
}

impl SearchParameters {
    /// Parameters searching a single field
    pub fn for_field(search_string: &str, field: SearchFields) -> Self {
        let mut params = Self::default();
        params.setup_none();
        params.search_string = search_string.to_string();
        params.enable(field);
        params
    }

    /// Turn every field flag off
    pub fn setup_none(&mut self) {
        self.fields = SearchFields::empty();
    }

    pub fn enable(&mut self, fields: SearchFields) {
        self.fields |= fields;
    }
}
