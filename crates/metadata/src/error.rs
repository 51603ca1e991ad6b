//! Metadata Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;
use wheelhouse_archive::error::{Error as ArchiveError, ErrorKind as ArchiveErrorKind};

/// A metadata error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The description document lacks a required field.
    #[display("invalid metadata: missing \"{_0}\" field")]
    InvalidMetadata(#[error(not(source))] &'static str),
    /// The file name does not follow the convention of its archive kind.
    #[display("invalid archive name: {_0}")]
    InvalidArchiveName(#[error(not(source))] String),
    /// No description member, and the file name could not stand in for one.
    #[display("failed to extract metadata from {_0}")]
    MetadataExtractionFailed(#[error(not(source))] String),
    /// No archive handler matches the file name.
    #[display("unknown extension: {}", _0.display())]
    UnknownExtension(#[error(not(source))] PathBuf),
    /// A required archive member is absent.
    #[display("member not found in archive: {_0}")]
    MemberNotFound(#[error(not(source))] String),
    /// The archive itself could not be read.
    #[display("archive error: {_0}")]
    Archive(ArchiveErrorKind),
}

impl ErrorKind {
    /// Convert an archive error into a metadata error, preserving the archive
    /// crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn archive(err: ArchiveError) -> Error {
        let kind = match &*err {
            ArchiveErrorKind::UnknownExtension(path) => ErrorKind::UnknownExtension(path.clone()),
            ArchiveErrorKind::MemberNotFound(member) => ErrorKind::MemberNotFound(member.clone()),
            other => ErrorKind::Archive(other.clone()),
        };
        err.raise(kind)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Archives on local disk don't change between attempts.
        false
    }
}
