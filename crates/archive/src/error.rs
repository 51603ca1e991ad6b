//! Archive Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Only [`MemberNotFound`](Self::MemberNotFound) is something a caller is
/// expected to recover from; everything else means the artifact is unusable.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No container handler matches the file name.
    #[display("unknown archive extension: {}", _0.display())]
    UnknownExtension(#[error(not(source))] PathBuf),
    /// The container was read successfully but holds no such member.
    #[display("archive member not found: {_0}")]
    MemberNotFound(#[error(not(source))] String),
    /// The container could not be opened or read from disk.
    #[display("could not read archive: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The container (or its compression layer) is corrupt.
    #[display("corrupt archive: {}", _0.display())]
    InvalidData(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns `true` for the one condition callers fall back from.
    pub fn is_member_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        assert_eq!(
            ErrorKind::UnknownExtension(PathBuf::from("readme.txt")).to_string(),
            "unknown archive extension: readme.txt"
        );
        assert_eq!(
            ErrorKind::MemberNotFound("pkg-1.0/PKG-INFO".to_string()).to_string(),
            "archive member not found: pkg-1.0/PKG-INFO"
        );
    }

    #[test]
    fn only_missing_member_is_recoverable() {
        assert!(ErrorKind::MemberNotFound("x".to_string()).is_member_not_found());
        assert!(!ErrorKind::Io(PathBuf::from("x.zip")).is_member_not_found());
        assert!(!ErrorKind::InvalidData(PathBuf::from("x.zip")).is_retryable());
    }
}
