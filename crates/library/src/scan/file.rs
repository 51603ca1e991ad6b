use crate::Context;
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::scan::error::{ErrorKind, Result as ScanResult};
use exn::ResultExt;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::instrument;
use wheelhouse_metadata::PackageArtifact;

/// Indicates how much work was required to produce a [`Scan`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEffort {
    /// A sidecar supplied the metadata; the archive was not opened.
    Cached,
    /// The archive was opened, its metadata extracted and the file hashed.
    Extracted,
}

/// The result of resolving a single file.
#[derive(Debug, Clone)]
pub struct Scan {
    pub artifact: PackageArtifact,
    pub effort: ScanEffort,
}

/// Resolve a single artifact, preferring its sidecar over the archive.
///
/// 1. **Sidecar** - if `<path>.metadata.json` exists and names a package, it
///    is returned as-is: no extraction, no hashing.
/// 2. **Extraction** - otherwise the archive is read, its metadata parsed and
///    the whole file hashed with SHA-256.
///
/// A sidecar that exists but can't be read or decoded is an error rather
/// than a reason to re-extract.
pub fn scan_file(ctx: &Context, path: impl AsRef<Path>) -> LibraryResult<Scan> {
    scan_file_inner(ctx, path.as_ref()).or_raise(|| LibraryErrorKind::Scan)
}

#[instrument(level = "debug", skip(ctx, path), fields(path = %path.display()))]
pub(crate) fn scan_file_inner(ctx: &Context, path: &Path) -> ScanResult<Scan> {
    let cached = wheelhouse_cache::read(path).or_raise(|| ErrorKind::Sidecar(path.to_path_buf()))?;
    if let Some(metadata) = cached {
        tracing::trace!("metadata taken from sidecar");
        return Ok(Scan {
            artifact: PackageArtifact::new(path, metadata),
            effort: ScanEffort::Cached,
        });
    }
    let metadata = ctx.extractor().extract(path).map_err(|err| ErrorKind::metadata(err, path))?;
    let hash = hash_file(path).or_raise(|| ErrorKind::Hash(path.to_path_buf()))?;
    tracing::debug!(name = metadata.name(), version = metadata.version(), "resolved");
    Ok(Scan {
        artifact: PackageArtifact::new(path, metadata.with_hash(hash)),
        effort: ScanEffort::Extracted,
    })
}

/// Lowercase hex SHA-256 of the file's contents, streamed.
pub fn hash_file(path: impl AsRef<Path>) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
