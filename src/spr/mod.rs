//! Field reference compiler
//!
//! Expands `{REF:<Wanted>@<Scan>:<SearchTerm>}` placeholders embedded in entry
//! fields. Wanted and scan selectors:
//!
//! | Selector | Field        | Wanted | Scan |
//! |----------|--------------|--------|------|
//! | `T`      | title        | yes    | yes  |
//! | `U`      | user name    | yes    | yes  |
//! | `A`      | URL          | yes    | yes  |
//! | `P`      | password     | yes    | yes  |
//! | `N`      | notes        | yes    | yes  |
//! | `I`      | entry ID     | yes    | yes  |
//! | `O`      | custom field | no     | yes  |

pub mod cache;
pub mod context;
pub mod engine;
pub mod reference;

pub use cache::RefCache;
pub use context::SprContext;
pub use engine::{CompileStats, Compilation, SprEngine};
pub use reference::{find_reference, EntryField, Reference, TokenSpan};
