//! Entry search
//!
//! Resolves a search string against a record tree. A single term (or a
//! regular expression) is matched in one pass over the whole tree. Several
//! terms are evaluated one after another, shortest first:
//! - a plain term replaces the candidate list with its own matches
//! - a `-term` removes its matches from the candidate list
//!
//! The candidate list starts as the entries directly under the root.

mod matcher;
pub mod parameters;

use std::ptr;

use tracing::trace;

use crate::database::{Entry, EntryTree, NodeAction};
use crate::error::{RefError, Result};
use crate::utils::split_search_terms;
use matcher::EntryMatcher;

pub use parameters::{SearchFields, SearchParameters};

/// Find the entries matching `params`, in traversal order
///
/// # Errors
/// `RefError::SearchAborted` if the tree aborted a traversal,
/// `RefError::InvalidRegex` if a regular expression search does not compile.
pub fn search_entries<'a, T>(tree: &'a T, params: &SearchParameters) -> Result<Vec<&'a Entry>>
where
    T: EntryTree + ?Sized,
{
    let mut terms = split_search_terms(&params.search_string);
    if terms.len() <= 1 || params.regular_expression {
        return search_pass(tree, params, &params.search_string);
    }

    // Stable sort, ascending by length
    terms.sort_by_key(|t| t.chars().count());

    let mut candidates = tree.root_entries();
    for term in &terms {
        let (needle, negate) = match term.strip_prefix('-') {
            Some(rest) => (rest, !rest.is_empty()),
            None => (term.as_str(), false),
        };

        let matches = search_pass(tree, params, needle)?;
        trace!(term = %needle, negate, matches = matches.len(), "search term evaluated");

        candidates = if negate {
            candidates
                .into_iter()
                .filter(|c| !matches.iter().any(|m| ptr::eq(*m, *c)))
                .collect()
        } else {
            matches
        };
    }

    Ok(candidates)
}

/// One traversal collecting every entry that matches `term`
fn search_pass<'a, T>(tree: &'a T, params: &SearchParameters, term: &str) -> Result<Vec<&'a Entry>>
where
    T: EntryTree + ?Sized,
{
    let matcher = EntryMatcher::new(params, term)?;
    let mut found = Vec::new();

    let traversal = tree.traverse(&mut |entry| {
        if matcher.is_match(entry) {
            found.push(entry);
        }
        NodeAction::Continue
    });

    if traversal.is_aborted() {
        return Err(RefError::SearchAborted);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Group, Traversal};

    fn titles(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.title.clone()).collect()
    }

    fn title_search(tree: &Group, search: &str) -> Vec<String> {
        let params = SearchParameters::for_field(search, SearchFields::TITLES);
        titles(&search_entries(tree, &params).unwrap())
    }

    /// Tree whose traversal aborts on the entry titled "stop"
    struct AbortingTree(Group);

    impl EntryTree for AbortingTree {
        fn root_entries(&self) -> Vec<&Entry> {
            self.0.root_entries()
        }

        fn traverse<'a>(&'a self, visitor: &mut dyn FnMut(&'a Entry) -> NodeAction) -> Traversal {
            self.0.traverse(&mut |entry| {
                if entry.title == "stop" {
                    NodeAction::Abort
                } else {
                    visitor(entry)
                }
            })
        }
    }

    #[test]
    fn test_single_term_traversal_order() {
        let mut root = Group::new("Root");
        let mut sub = Group::new("Sub");
        sub.add_entry(Entry::new("Dup nested"));
        root.add_group(sub);
        root.add_entry(Entry::new("Dup"));
        root.add_entry(Entry::new("Other"));

        assert_eq!(title_search(&root, "dup"), vec!["Dup", "Dup nested"]);
        assert!(title_search(&root, "missing").is_empty());
    }

    #[test]
    fn test_negated_term() {
        let mut root = Group::new("Root");
        root.add_entry(Entry::new("alpha beta"));
        root.add_entry(Entry::new("alpha"));

        assert_eq!(title_search(&root, "alpha -beta"), vec!["alpha"]);
    }

    #[test]
    fn test_positive_terms_replace_candidates() {
        let mut root = Group::new("Root");
        root.add_entry(Entry::new("red"));
        root.add_entry(Entry::new("green"));

        // Not an intersection: the later (longer) term wins
        assert_eq!(title_search(&root, "red green"), vec!["green"]);
    }

    #[test]
    fn test_terms_sorted_shortest_first() {
        let mut root = Group::new("Root");
        root.add_entry(Entry::new("alphabet"));
        root.add_entry(Entry::new("crab"));

        // "ab" runs first, "alphabet" last, whatever the input order
        assert_eq!(title_search(&root, "ab alphabet"), vec!["alphabet"]);
        assert_eq!(title_search(&root, "alphabet ab"), vec!["alphabet"]);
    }

    #[test]
    fn test_equal_length_terms_keep_input_order() {
        let mut root = Group::new("Root");
        root.add_entry(Entry::new("alpha beta"));
        root.add_entry(Entry::new("alpha"));

        // "-beta" then "alpha": the positive term runs last and replaces
        assert_eq!(title_search(&root, "-beta alpha"), vec!["alpha beta", "alpha"]);
    }

    #[test]
    fn test_negation_starts_from_root_entries() {
        let mut root = Group::new("Root");
        let mut sub = Group::new("Sub");
        sub.add_entry(Entry::new("nested"));
        root.add_group(sub);
        root.add_entry(Entry::new("top"));

        // Only negated terms: candidates are the root's own entries
        assert_eq!(title_search(&root, "-x -y"), vec!["top"]);
    }

    #[test]
    fn test_bare_dash_is_positive_empty_term() {
        let mut root = Group::new("Root");
        let mut sub = Group::new("Sub");
        sub.add_entry(Entry::new("nested"));
        root.add_group(sub);
        root.add_entry(Entry::new("top"));

        assert_eq!(title_search(&root, "- zz"), Vec::<String>::new());
        assert_eq!(title_search(&root, "-zz -"), vec!["top", "nested"]);
    }

    #[test]
    fn test_regex_skips_term_splitting() {
        let mut root = Group::new("Root");
        root.add_entry(Entry::new("a b"));
        root.add_entry(Entry::new("b"));

        let mut params = SearchParameters::for_field("a b", SearchFields::TITLES);
        params.regular_expression = true;
        assert_eq!(titles(&search_entries(&root, &params).unwrap()), vec!["a b"]);

        params.search_string = "[".to_string();
        assert!(matches!(search_entries(&root, &params), Err(RefError::InvalidRegex(_))));
    }

    #[test]
    fn test_aborted_traversal() {
        let mut root = Group::new("Root");
        root.add_entry(Entry::new("one"));
        root.add_entry(Entry::new("stop"));
        let tree = AbortingTree(root);

        let single = SearchParameters::for_field("one", SearchFields::TITLES);
        assert_eq!(search_entries(&tree, &single), Err(RefError::SearchAborted));

        let multi = SearchParameters::for_field("one -two", SearchFields::TITLES);
        assert_eq!(search_entries(&tree, &multi), Err(RefError::SearchAborted));
    }
}
