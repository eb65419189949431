//! Utility functions

mod common;
mod ids;

pub use common::{contains_phrase, split_search_terms, IgnoreCaseLiteral};
pub use ids::{generate_entry_id, uuid_to_hex};
