//! Render Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Template was not loadable (either file or builtin).
    #[display("template not found: {_0}")]
    TemplateNotFound(#[error(not(source))] String),
    /// Template failed to compile or to render.
    #[display("invalid template: {_0}")]
    Template(#[error(not(source))] String),
    /// Index pages are only rendered for non-empty listings.
    #[display("nothing to render")]
    EmptyIndex,
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
