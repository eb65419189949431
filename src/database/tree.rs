//! Read-only traversal over a record tree

use super::models::{Entry, Group};

/// Visitor decision for the current entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    /// Keep walking
    Continue,
    /// Stop walking, the visitor has what it needs
    Stop,
    /// Stop walking, the result is unusable
    Abort,
}

/// How a traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Completed,
    Stopped,
    Aborted,
}

impl Traversal {
    pub fn is_aborted(self) -> bool {
        self == Traversal::Aborted
    }
}

/// Read-only view of a record tree as seen by the search resolver
pub trait EntryTree {
    /// Entries directly under the root, in order
    fn root_entries(&self) -> Vec<&Entry>;

    /// Visit every entry depth-first until the visitor stops or aborts
    fn traverse<'a>(&'a self, visitor: &mut dyn FnMut(&'a Entry) -> NodeAction) -> Traversal;
}

impl EntryTree for Group {
    fn root_entries(&self) -> Vec<&Entry> {
        self.entries.iter().collect()
    }

    fn traverse<'a>(&'a self, visitor: &mut dyn FnMut(&'a Entry) -> NodeAction) -> Traversal {
        self.walk(visitor)
    }
}
