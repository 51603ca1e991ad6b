//! Reads single members out of Python distribution archives.
//!
//! Four container kinds are recognised by file-name suffix. Source
//! distributions are tarballs (gzip or bzip2 compressed) or zip files; wheels
//! are zip files with their own naming convention, which is why they are kept
//! as a separate kind even though they are read the same way.

pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod tarball;
mod zipped;

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use std::path::Path;
use tracing::instrument;

/// A supported container format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Gzip-compressed tarball (`.tar.gz`)
    TarGz,
    /// Bzip2-compressed tarball (`.tar.bz2`)
    TarBz2,
    /// Zip source distribution (`.zip`)
    Zip,
    /// Built distribution (`.whl`)
    Wheel,
}

impl ArchiveKind {
    /// Longest suffix first, so that the most specific one wins.
    const ALL: [ArchiveKind; 4] = [ArchiveKind::TarBz2, ArchiveKind::TarGz, ArchiveKind::Zip, ArchiveKind::Wheel];

    /// Detect the container kind from a file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use wheelhouse_archive::ArchiveKind;
    ///
    /// assert_eq!(ArchiveKind::from_path("six-1.16.0.tar.gz").unwrap(), ArchiveKind::TarGz);
    /// assert_eq!(ArchiveKind::from_path("six-1.16.0-py2.py3-none-any.whl").unwrap(), ArchiveKind::Wheel);
    /// assert!(ArchiveKind::from_path("readme.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|kind| name.ends_with(kind.suffix()))
            .ok_or_raise(|| ErrorKind::UnknownExtension(path.to_path_buf()))
    }

    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            ArchiveKind::TarGz => ".tar.gz",
            ArchiveKind::TarBz2 => ".tar.bz2",
            ArchiveKind::Zip => ".zip",
            ArchiveKind::Wheel => ".whl",
        }
    }

    /// The file name with this kind's suffix removed.
    ///
    /// Returns the input unchanged if it does not carry the suffix.
    #[must_use]
    pub fn stem<'a>(&self, filename: &'a str) -> &'a str {
        filename.strip_suffix(self.suffix()).unwrap_or(filename)
    }

    /// Whether members are read from a tar stream or a zip directory.
    #[must_use]
    pub fn is_tarball(&self) -> bool {
        matches!(self, ArchiveKind::TarGz | ArchiveKind::TarBz2)
    }

    /// Read the text content of `member` from the archive at `path`.
    ///
    /// The member path must match exactly; no normalisation is applied.
    /// Content is decoded as UTF-8 with invalid sequences replaced.
    #[instrument(skip(self, path), fields(kind = ?self, path = %path.as_ref().display()))]
    pub fn read_member(&self, path: impl AsRef<Path>, member: &str) -> Result<String> {
        let path = path.as_ref();
        let bytes = match self.is_tarball() {
            true => tarball::read_member(path, member)?,
            false => zipped::read_member(path, member)?,
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Convenience wrapper: detect the kind from `path`, then read `member`.
pub fn read_member(path: impl AsRef<Path>, member: &str) -> Result<String> {
    let path = path.as_ref();
    ArchiveKind::from_path(path)?.read_member(path, member)
}
