//! Library Error Types
//!
//! Each submodule carries its own error kinds; the variants here record which
//! stage of a run failed, with the submodule's error kept as a child frame.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Resolving artifacts in the download directory failed.
    #[display("failed to resolve artifacts")]
    Scan,
    /// Writing or removing sidecar files failed.
    #[display("failed to update sidecars")]
    Sidecar,
    /// Building the mirror failed.
    #[display("failed to assemble mirror")]
    Mirror,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Scan | ErrorKind::Sidecar | ErrorKind::Mirror => false,
        }
    }
}
