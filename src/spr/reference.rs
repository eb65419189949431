//! Reference token scanning and parsing
//!
//! Wire format: `{REF:<Wanted>@<Scan>:<SearchTerm>}`, case-insensitive. The
//! token ends at the first `}` after the opening marker.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::database::Entry;
use crate::error::{RefError, Result};
use crate::search::{SearchFields, SearchParameters};
use crate::utils::IgnoreCaseLiteral;
use crate::{REF_END, REF_START};

static REF_START_MATCHER: Lazy<IgnoreCaseLiteral> =
    Lazy::new(|| IgnoreCaseLiteral::new(REF_START).unwrap());

/// Field of the target entry that replaces the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Title,
    UserName,
    Url,
    Password,
    Notes,
    Uuid,
}

impl EntryField {
    /// Map a wanted selector (`T`, `U`, `A`, `P`, `N`, `I`) to its field
    pub fn from_wanted(selector: char) -> Option<Self> {
        match selector.to_ascii_uppercase() {
            'T' => Some(Self::Title),
            'U' => Some(Self::UserName),
            'A' => Some(Self::Url),
            'P' => Some(Self::Password),
            'N' => Some(Self::Notes),
            'I' => Some(Self::Uuid),
            _ => None,
        }
    }

    /// Raw (uncompiled) value of this field
    pub fn value<'e>(&self, entry: &'e Entry) -> Cow<'e, str> {
        match self {
            Self::Title => Cow::Borrowed(&entry.title),
            Self::UserName => Cow::Borrowed(&entry.username),
            Self::Url => Cow::Borrowed(&entry.url),
            Self::Password => Cow::Borrowed(&entry.password),
            Self::Notes => Cow::Borrowed(&entry.notes),
            Self::Uuid => Cow::Owned(entry.uuid_hex()),
        }
    }
}

/// Location of a candidate token in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// Byte offset of `{`
    pub start: usize,
    /// Byte offset one past the closing `}`
    pub end: usize,
}

impl TokenSpan {
    pub fn raw<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Find the next `{REF:` ... `}` span at or after byte offset `from`
///
/// An offset inside a multi-byte character is moved forward to the next
/// character boundary.
pub fn find_reference(text: &str, from: usize) -> Option<TokenSpan> {
    let mut from = from.min(text.len());
    while !text.is_char_boundary(from) {
        from += 1;
    }

    let start = REF_START_MATCHER.find_from(text, from)?;
    let close = text[start + 1..].find(REF_END)?;
    let end = start + 1 + close + REF_END.len();
    Some(TokenSpan { start, end })
}

/// Parsed reference token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Wanted selector, upper-cased; may be unknown
    pub wanted: char,
    /// Field the search term is matched against
    pub scan: SearchFields,
    pub search_term: String,
}

impl Reference {
    /// Parse a raw token such as `{REF:U@T:Mail}`
    ///
    /// The wanted selector is not validated here: an unknown one still lets the
    /// search run, the token is dropped once a target has been found.
    ///
    /// # Errors
    /// `RefError::MalformedReference` if the grammar does not match,
    /// `RefError::UnknownScanField` if the scan selector is unknown.
    pub fn parse(raw: &str) -> Result<Self> {
        let malformed = || RefError::MalformedReference(raw.to_string());

        let has_start = raw
            .get(..REF_START.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(REF_START));
        if !has_start || !raw.ends_with(REF_END) || raw.len() < REF_START.len() + REF_END.len() {
            return Err(malformed());
        }

        let body: Vec<char> = raw[REF_START.len()..raw.len() - REF_END.len()].chars().collect();
        if body.len() <= 4 || body[1] != '@' || body[3] != ':' {
            return Err(malformed());
        }

        let scan_selector = body[2].to_ascii_uppercase();
        let scan = SearchFields::from_scan(scan_selector)
            .ok_or(RefError::UnknownScanField(scan_selector))?;

        Ok(Self {
            wanted: body[0].to_ascii_uppercase(),
            scan,
            search_term: body[4..].iter().collect(),
        })
    }

    pub fn wanted_field(&self) -> Option<EntryField> {
        EntryField::from_wanted(self.wanted)
    }

    /// Search for the term in the scanned field only
    pub fn search_parameters(&self) -> SearchParameters {
        SearchParameters::for_field(&self.search_term, self.scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_reference() {
        let text = "Login: {REF:U@T:A} rest";
        let span = find_reference(text, 0).unwrap();
        assert_eq!(span.raw(text), "{REF:U@T:A}");
        assert_eq!(span.start, 7);

        assert!(find_reference(text, span.start + 1).is_none());
    }

    #[test]
    fn test_find_reference_case_insensitive() {
        let text = "{ref:t@t:x}";
        assert_eq!(find_reference(text, 0).unwrap().raw(text), "{ref:t@t:x}");
    }

    #[test]
    fn test_find_reference_missing_markers() {
        assert!(find_reference("plain text", 0).is_none());
        assert!(find_reference("{REF:T@T:unterminated", 0).is_none());
        assert!(find_reference("} {REF:", 0).is_none());
        assert!(find_reference("abc", 100).is_none());
    }

    #[test]
    fn test_find_reference_offset_inside_char() {
        let text = "ü{REF:T@T:x}";
        let span = find_reference(text, 1).unwrap();
        assert_eq!(span.start, 2);
    }

    #[test]
    fn test_find_reference_nested_open() {
        // Ends at the first closing brace
        let text = "{REF:T@T:{REF:U@T:x}}";
        assert_eq!(find_reference(text, 0).unwrap().raw(text), "{REF:T@T:{REF:U@T:x}");
        assert_eq!(find_reference(text, 1).unwrap().raw(text), "{REF:U@T:x}");
    }

    #[test]
    fn test_parse_valid() {
        let reference = Reference::parse("{ref:u@t:My Mail}").unwrap();
        assert_eq!(reference.wanted, 'U');
        assert_eq!(reference.scan, SearchFields::TITLES);
        assert_eq!(reference.search_term, "My Mail");
        assert_eq!(reference.wanted_field(), Some(EntryField::UserName));
    }

    #[test]
    fn test_parse_all_scan_selectors() {
        for (c, field) in [
            ('T', SearchFields::TITLES),
            ('U', SearchFields::USER_NAMES),
            ('A', SearchFields::URLS),
            ('P', SearchFields::PASSWORDS),
            ('N', SearchFields::NOTES),
            ('I', SearchFields::UUIDS),
            ('O', SearchFields::OTHER),
        ] {
            let raw = format!("{{REF:T@{c}:x}}");
            assert_eq!(Reference::parse(&raw).unwrap().scan, field);
        }
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(Reference::parse("{REF:TX:Y}"), Err(RefError::MalformedReference(_))));
        assert!(matches!(Reference::parse("{REF:T@T:}"), Err(RefError::MalformedReference(_))));
        assert!(matches!(Reference::parse("{REF:T@TX}"), Err(RefError::MalformedReference(_))));
        assert!(matches!(Reference::parse("{REF:}"), Err(RefError::MalformedReference(_))));
        assert!(matches!(Reference::parse("{FOO:T@T:x}"), Err(RefError::MalformedReference(_))));
        assert!(matches!(Reference::parse("{REF:T@T:x"), Err(RefError::MalformedReference(_))));
        assert!(matches!(Reference::parse(""), Err(RefError::MalformedReference(_))));
    }

    #[test]
    fn test_parse_unknown_selectors() {
        assert_eq!(Reference::parse("{REF:T@X:y}"), Err(RefError::UnknownScanField('X')));

        // Unknown wanted selector parses; it is rejected after the search
        let reference = Reference::parse("{REF:Z@T:X}").unwrap();
        assert_eq!(reference.wanted, 'Z');
        assert_eq!(reference.wanted_field(), None);
    }

    #[test]
    fn test_search_parameters_single_field() {
        let params = Reference::parse("{REF:P@N:vpn}")
            .unwrap()
            .search_parameters();
        assert_eq!(params.fields, SearchFields::NOTES);
        assert_eq!(params.search_string, "vpn");
        assert!(!params.regular_expression);
    }

    #[test]
    fn test_entry_field_value() {
        let entry = Entry::new("T")
            .with_username("U")
            .with_url("A")
            .with_password("P")
            .with_notes("N");
        assert_eq!(EntryField::Title.value(&entry), "T");
        assert_eq!(EntryField::UserName.value(&entry), "U");
        assert_eq!(EntryField::Url.value(&entry), "A");
        assert_eq!(EntryField::Password.value(&entry), "P");
        assert_eq!(EntryField::Notes.value(&entry), "N");
        assert_eq!(EntryField::Uuid.value(&entry), entry.uuid_hex());
        assert_eq!(EntryField::from_wanted('o'), None);
    }
}
