//! # fieldref
//!
//! Field reference resolution for password manager records.
//!
//! A text value of an entry (title, user name, URL, password, notes) may embed
//! placeholders of the form `{REF:<Wanted>@<Scan>:<SearchTerm>}`. Compiling the
//! text finds the entry the placeholder points at, reads the wanted field and
//! substitutes it, recursively, until nothing is left to resolve or the
//! iteration and depth limits are reached.
//!
//! ## Features
//!
//! - Read-only record tree (`Database`, `Group`, `Entry`) with depth-first traversal
//! - Single-term, regex and multi-term (`AND` / `-NOT`) entry search
//! - Per-call substitution cache that breaks reference cycles
//! - Guaranteed termination on self-referencing or cyclic data
//!
//! ## Example
//!
//! ```
//! use fieldref::{Database, Entry, Group, SprEngine};
//!
//! let mut root = Group::new("Root");
//! root.add_entry(Entry::new("A").with_username("admin001"));
//! root.add_entry(Entry::new("B").with_notes("Login: {REF:U@T:A}"));
//! let database = Database::new("Personal", root);
//!
//! let b = database.root_group().unwrap().entries[1].clone();
//! let text = SprEngine::new().compile(&b.notes, &b, &database);
//! assert_eq!(text, "Login: admin001");
//! ```

pub mod database;
pub mod error;
pub mod search;
pub mod spr;
pub mod utils;

// Re-export main types
pub use error::{RefError, Result};
pub use database::{CustomField, Database, Entry, EntryTree, Group, NodeAction, Traversal};
pub use search::{search_entries, SearchFields, SearchParameters};
pub use spr::{CompileStats, Compilation, EntryField, Reference, SprEngine};

/// Maximum nesting of reference resolution; deeper levels resolve to an empty string
pub const MAX_RECURSION_DEPTH: usize = 12;

/// Maximum scan/substitute passes per recursion level
pub const MAX_ITERATIONS: usize = 20;

/// Opening marker of a field reference
pub const REF_START: &str = "{REF:";

/// Closing marker of a field reference
pub const REF_END: &str = "}";
