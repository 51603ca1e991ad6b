//! Error types for the [`mirror`](super) module.

use derive_more::{Display, Error};

/// A mirror error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for mirror operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The step of mirror assembly that failed, and for which distribution.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The distribution directory could not be created.
    #[display("failed to create directory for {_0}")]
    Directory(#[error(not(source))] String),
    /// An artifact could not be linked or copied into place.
    #[display("failed to place {_0}")]
    Place(#[error(not(source))] String),
    /// A distribution page could not be rendered.
    #[display("failed to render index for {_0}")]
    Render(#[error(not(source))] String),
    /// A distribution page could not be written.
    #[display("failed to write index for {_0}")]
    Write(#[error(not(source))] String),
    /// The root page could not be rendered or written.
    #[display("failed to write root index")]
    RootIndex,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
