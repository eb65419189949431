//! Record tree for fieldref
//!
//! An immutable snapshot of entries organized in groups:
//! - Entry and group models
//! - Depth-first traversal with early stop/abort
//! - JSON snapshot loading

pub mod models;
pub mod tree;

pub use models::*;
pub use tree::{EntryTree, NodeAction, Traversal};
