//! Error types for fieldref
//!
//! None of these reach the caller of `SprEngine::compile`: the compiler logs
//! them and leaves the offending reference in the text.

use thiserror::Error;

/// Main error type for reference parsing and entry search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefError {
    /// Token does not follow the `{REF:<W>@<S>:<term>}` grammar
    #[error("Malformed reference: {0}")]
    MalformedReference(String),

    /// Scan selector is not one of T, U, A, P, N, I, O
    #[error("Unknown scan field: {0}")]
    UnknownScanField(char),

    /// Search string could not be compiled as a regular expression
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(String),

    /// Tree traversal was aborted by the visitor
    #[error("Search aborted")]
    SearchAborted,

    /// Record snapshot could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<regex::Error> for RefError {
    fn from(err: regex::Error) -> Self {
        RefError::InvalidRegex(err.to_string())
    }
}

impl From<serde_json::Error> for RefError {
    fn from(err: serde_json::Error) -> Self {
        RefError::Json(err.to_string())
    }
}

/// Result type alias for reference operations
pub type Result<T> = std::result::Result<T, RefError>;
