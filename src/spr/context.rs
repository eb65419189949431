//! Compilation context

use crate::database::{Entry, EntryTree};

/// Where a piece of text is being compiled
///
/// Derived per recursion level. The substitution cache is not part of it: one
/// cache is shared by every context of a top-level compilation.
pub struct SprContext<'a, T: ?Sized> {
    /// Tree searched by references
    pub tree: &'a T,
    /// Entry whose field is being expanded
    pub entry: &'a Entry,
    pub recursion_level: usize,
}

impl<'a, T: EntryTree + ?Sized> SprContext<'a, T> {
    pub fn new(tree: &'a T, entry: &'a Entry) -> Self {
        Self {
            tree,
            entry,
            recursion_level: 0,
        }
    }

    /// Context for compiling a field of `entry`, one level deeper
    pub fn derive(&self, entry: &'a Entry) -> Self {
        Self {
            tree: self.tree,
            entry,
            recursion_level: self.recursion_level + 1,
        }
    }
}

// `T` is only borrowed, no `T: Clone` bound
impl<T: ?Sized> Clone for SprContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for SprContext<'_, T> {}
