use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::instrument;
use wheelhouse_metadata::PackageMetadata;

/// Appended to the full artifact file name, extension included.
pub const SIDECAR_SUFFIX: &str = ".metadata.json";

/// `<artifact>.metadata.json`
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wheelhouse_cache::sidecar_path;
///
/// assert_eq!(
///     sidecar_path("downloads/six-1.16.0.tar.gz"),
///     Path::new("downloads/six-1.16.0.tar.gz.metadata.json")
/// );
/// ```
pub fn sidecar_path(artifact: impl AsRef<Path>) -> PathBuf {
    let mut path: OsString = artifact.as_ref().as_os_str().to_owned();
    path.push(SIDECAR_SUFFIX);
    PathBuf::from(path)
}

/// Whether `path` is itself a sidecar rather than an artifact.
pub fn is_sidecar(path: impl AsRef<Path>) -> bool {
    path.as_ref().as_os_str().as_encoded_bytes().ends_with(SIDECAR_SUFFIX.as_bytes())
}

/// Read the sidecar for `artifact`.
///
/// A missing sidecar, or one without a package name, is `None`. Any other
/// failure (unreadable file, malformed JSON) is an error.
#[instrument(level = "debug", skip(artifact), fields(artifact = %artifact.as_ref().display()))]
pub fn read(artifact: impl AsRef<Path>) -> Result<Option<PackageMetadata>> {
    let path = sidecar_path(artifact);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err).or_raise(|| ErrorKind::Io(path.clone())),
    };
    let meta: PackageMetadata = serde_json::from_slice(&bytes).or_raise(|| ErrorKind::InvalidData(path.clone()))?;
    if meta.name().is_empty() {
        tracing::debug!(path = %path.display(), "sidecar has no name, ignoring");
        return Ok(None);
    }
    Ok(Some(meta))
}

/// Write (or replace) the sidecar for `artifact`, returning its path.
#[instrument(level = "debug", skip(artifact, meta), fields(artifact = %artifact.as_ref().display()))]
pub fn write(artifact: impl AsRef<Path>, meta: &PackageMetadata) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let mut json = serde_json::to_vec(meta).or_raise(|| ErrorKind::InvalidData(path.clone()))?;
    json.push(b'\n');
    fs::write(&path, json).or_raise(|| ErrorKind::Io(path.clone()))?;
    Ok(path)
}

/// Delete a sidecar file. `path` is the sidecar itself, not its artifact.
///
/// Returns `false` if there was nothing to delete.
pub fn remove(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == IoErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).or_raise(|| ErrorKind::Io(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("six-1.16.0.tar.gz.metadata.json", true)]
    #[case("/a/b/six-1.16.0-py2.py3-none-any.whl.metadata.json", true)]
    #[case("six-1.16.0.tar.gz", false)]
    #[case("metadata.json", false)]
    fn test_is_sidecar(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_sidecar(path), expected);
    }

    #[test]
    fn missing_sidecar_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read(dir.path().join("six-1.16.0.tar.gz")).unwrap(), None);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("Foo-1.0-py3-none-any.whl");
        let meta = PackageMetadata::new("Foo", "1.0")
            .with_homepage("https://example.com/Foo/repo")
            .with_trusted(false)
            .with_hash("0123456789abcdef".repeat(4));
        let written = write(&artifact, &meta).unwrap();
        assert_eq!(written, sidecar_path(&artifact));
        assert_eq!(read(&artifact).unwrap(), Some(meta));
    }

    #[test]
    fn nameless_sidecar_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("six-1.16.0.tar.gz");
        fs::write(sidecar_path(&artifact), r#"{"name":"","norm_name":"","version":"1.16.0"}"#).unwrap();
        assert_eq!(read(&artifact).unwrap(), None);
    }

    #[test]
    fn malformed_sidecar_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("six-1.16.0.tar.gz");
        fs::write(sidecar_path(&artifact), "{not json").unwrap();
        let err = read(&artifact).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidData(_)));
    }

    #[test]
    fn remove_reports_whether_anything_was_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("six-1.16.0.tar.gz");
        let path = write(&artifact, &PackageMetadata::new("six", "1.16.0")).unwrap();
        assert!(remove(&path).unwrap());
        assert!(!remove(&path).unwrap());
        assert_eq!(read(&artifact).unwrap(), None);
    }
}
