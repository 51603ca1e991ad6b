//! Error types for the [`scan`](super) module.

use derive_more::{Display, Error};
use std::path::{Path, PathBuf};
use wheelhouse_metadata::error::{Error as MetadataError, ErrorKind as MetadataErrorKind};

/// A scan error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why an artifact (or the directory holding it) could not be resolved.
///
/// Every per-artifact variant names the artifact.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The sidecar exists but is unreadable or malformed.
    #[display("unusable sidecar for {}", _0.display())]
    Sidecar(#[error(not(source))] PathBuf),
    /// The archive could not be identified.
    #[display("{}: {kind}", path.display())]
    Metadata { path: PathBuf, kind: MetadataErrorKind },
    /// The artifact could not be read for hashing.
    #[display("failed to hash {}", _0.display())]
    Hash(#[error(not(source))] PathBuf),
    /// The directory could not be traversed.
    #[display("failed to walk {}", _0.display())]
    Walk(#[error(not(source))] PathBuf),
    /// The worker pool could not be started.
    #[display("failed to start worker pool")]
    Pool,
}

impl ErrorKind {
    /// Wrap a metadata error, keeping its category visible on the top frame.
    #[track_caller]
    pub fn metadata(err: MetadataError, path: &Path) -> Error {
        let kind = (*err).clone();
        err.raise(ErrorKind::Metadata { path: path.to_path_buf(), kind })
    }

    /// The artifact (or directory) the error is about.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ErrorKind::Sidecar(path) | ErrorKind::Hash(path) | ErrorKind::Walk(path) => Some(path),
            ErrorKind::Metadata { path, .. } => Some(path),
            ErrorKind::Pool => None,
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
