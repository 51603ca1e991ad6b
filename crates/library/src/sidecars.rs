use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::order::Collate;
use crate::reconcile::reconcile_all;
use crate::scan::{ScanFailure, scan};
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct SidecarReport {
    /// Sidecars deleted before resolving.
    pub removed: usize,
    /// Sidecars created.
    pub written: usize,
    /// Artifacts skipped under [`ErrorPolicy::Continue`](crate::ErrorPolicy::Continue).
    pub failures: Vec<ScanFailure>,
}

/// Write a sidecar for every artifact below `dir` that lacks one.
///
/// Artifacts are resolved and reconciled first, so sidecars record the
/// reconciled display name. With `overwrite`, every existing sidecar is
/// deleted beforehand and all of them are regenerated.
#[instrument(skip(ctx, dir, collator), fields(dir = %dir.as_ref().display()))]
pub fn write_sidecars(
    ctx: &Context,
    dir: impl AsRef<Path>,
    overwrite: bool,
    collator: &mut impl Collate,
) -> Result<SidecarReport> {
    let dir = dir.as_ref();
    let mut report = SidecarReport::default();
    if overwrite {
        report.removed = remove_sidecars(dir)?;
    }
    let scanned = scan(ctx, dir)?;
    report.failures = scanned.failures;
    for artifact in reconcile_all(scanned.artifacts, collator).iter().flat_map(|group| &group.items) {
        let sidecar = wheelhouse_cache::sidecar_path(artifact.path());
        if sidecar.try_exists().or_raise(|| ErrorKind::Sidecar)? {
            continue;
        }
        wheelhouse_cache::write(artifact.path(), artifact.metadata()).or_raise(|| ErrorKind::Sidecar)?;
        report.written += 1;
    }
    tracing::info!(removed = report.removed, written = report.written, "sidecars updated");
    Ok(report)
}

/// Delete every sidecar below `dir`, returning how many were removed.
pub fn remove_sidecars(dir: impl AsRef<Path>) -> Result<usize> {
    let mut removed = 0;
    for entry in WalkDir::new(dir.as_ref()) {
        let entry = entry.or_raise(|| ErrorKind::Sidecar)?;
        if entry.file_type().is_dir() || !wheelhouse_cache::is_sidecar(entry.path()) {
            continue;
        }
        if wheelhouse_cache::remove(entry.path()).or_raise(|| ErrorKind::Sidecar)? {
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorPolicy;
    use crate::order::Lexical;
    use std::fs;
    use wheelhouse_archive::fixtures;

    fn populate(dir: &Path) {
        let text = fixtures::metadata_text("Foo", "1.0", None);
        fixtures::write_tarball(dir, "Foo-1.0.tar.gz", &[("Foo-1.0/PKG-INFO", &text)]).unwrap();
        // Declared name disagrees with the file name and the homepage can't help.
        let text = fixtures::metadata_text("foo", "1.1", Some("https://example.com/"));
        fixtures::write_zip(dir, "Foo-1.1-py3-none-any.whl", &[("Foo-1.1.dist-info/METADATA", &text)]).unwrap();
    }

    fn read(dir: &Path, filename: &str) -> wheelhouse_metadata::PackageMetadata {
        wheelhouse_cache::read(dir.join(filename)).unwrap().unwrap()
    }

    #[test]
    fn test_writes_reconciled_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let report = write_sidecars(&Context::default(), dir.path(), false, &mut Lexical).unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.removed, 0);

        let wheel = read(dir.path(), "Foo-1.1-py3-none-any.whl");
        assert_eq!(wheel.name(), "Foo");
        assert!(!wheel.is_trusted());
        assert!(wheel.hash().is_some());
    }

    #[test]
    fn test_existing_sidecars_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let sidecar = wheelhouse_cache::sidecar_path(dir.path().join("Foo-1.0.tar.gz"));
        let custom = wheelhouse_metadata::PackageMetadata::new("Custom", "1.0");
        wheelhouse_cache::write(dir.path().join("Foo-1.0.tar.gz"), &custom).unwrap();
        let before = fs::read(&sidecar).unwrap();

        let report = write_sidecars(&Context::default(), dir.path(), false, &mut Lexical).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(fs::read(&sidecar).unwrap(), before);
    }

    #[test]
    fn test_overwrite_regenerates_everything() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let custom = wheelhouse_metadata::PackageMetadata::new("Custom", "1.0");
        wheelhouse_cache::write(dir.path().join("Foo-1.0.tar.gz"), &custom).unwrap();

        let report = write_sidecars(&Context::default(), dir.path(), true, &mut Lexical).unwrap();
        assert_eq!(report.removed, 1);
        assert_eq!(report.written, 2);
        assert_eq!(read(dir.path(), "Foo-1.0.tar.gz").name(), "Foo");
    }

    #[test]
    fn test_failures_are_reported_when_continuing() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        let ctx = Context::default().with_policy(ErrorPolicy::Continue);
        let report = write_sidecars(&ctx, dir.path(), false, &mut Lexical).unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.failures.len(), 1);
        assert!(!wheelhouse_cache::sidecar_path(dir.path().join("notes.txt")).exists());
    }

    #[test]
    fn test_failures_abort_by_default() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        let err = write_sidecars(&Context::default(), dir.path(), false, &mut Lexical).unwrap_err();
        assert_eq!(*err, ErrorKind::Scan);
        assert!(!wheelhouse_cache::sidecar_path(dir.path().join("Foo-1.0.tar.gz")).exists());
    }
}
