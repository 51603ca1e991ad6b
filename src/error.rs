//! CLI Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A command error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command execution.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("failed to load configuration")]
    Config,
    #[display("at least one requirements file or package must be specified")]
    NothingToDownload,
    #[display("pip executable not found: {_0}")]
    PipNotFound(#[error(not(source))] String),
    #[display("failed to execute {_0}")]
    PipFailed(#[error(not(source))] String),
    #[display("cannot resolve {}", _0.display())]
    Path(#[error(not(source))] PathBuf),
    #[display("failed to load index templates")]
    Templates,
    #[display("cannot use {} as mirror directory", _0.display())]
    Mirror(#[error(not(source))] PathBuf),
    #[display("failed to process {}", _0.display())]
    Library(#[error(not(source))] PathBuf),
    #[display("failed to write output")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A failed download may be a network hiccup; everything else is local.
        matches!(self, ErrorKind::PipFailed(_))
    }
}
