use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::scan::error::{Error as ScanError, ErrorKind, Result as ScanResult};
use crate::scan::file::{Scan, ScanEffort, scan_file_inner};
use crate::{Context, ErrorPolicy};
use exn::ResultExt;
use rayon::ThreadPoolBuilder;
use rayon::iter::{FromParallelIterator, IntoParallelRefIterator, ParallelIterator};
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::WalkDir;
use wheelhouse_metadata::PackageArtifact;

/// An artifact skipped under [`ErrorPolicy::Continue`].
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: ScanError,
}

/// Everything resolved from one directory, in traversal order.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub artifacts: Vec<PackageArtifact>,
    pub failures: Vec<ScanFailure>,
    /// How many artifacts were answered by their sidecar.
    pub cached: usize,
}
impl ScanReport {
    fn push(&mut self, scan: Scan) {
        if scan.effort == ScanEffort::Cached {
            self.cached += 1;
        }
        self.artifacts.push(scan.artifact);
    }
}

/// Every artifact candidate below `dir`, in file-name order.
///
/// Directories and sidecars are skipped; anything else is a candidate, so a
/// stray file later fails with an unknown-extension error rather than being
/// silently ignored.
pub fn discover(dir: impl AsRef<Path>) -> LibraryResult<Vec<PathBuf>> {
    discover_inner(dir.as_ref()).or_raise(|| LibraryErrorKind::Scan)
}

fn discover_inner(dir: &Path) -> ScanResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.or_raise(|| ErrorKind::Walk(dir.to_path_buf()))?;
        if entry.file_type().is_dir() || wheelhouse_cache::is_sidecar(entry.path()) {
            continue;
        }
        paths.push(entry.into_path());
    }
    Ok(paths)
}

/// Resolve every artifact below `dir`.
///
/// Artifacts are resolved on up to [`Context::jobs`] threads; the report
/// keeps traversal order regardless. Under [`ErrorPolicy::FailFast`] the first
/// failure aborts the run, under [`ErrorPolicy::Continue`] it is logged and
/// recorded in [`ScanReport::failures`].
#[instrument(skip(ctx, dir), fields(dir = %dir.as_ref().display(), jobs = ctx.jobs()))]
pub fn scan(ctx: &Context, dir: impl AsRef<Path>) -> LibraryResult<ScanReport> {
    scan_inner(ctx, dir.as_ref()).or_raise(|| LibraryErrorKind::Scan)
}

fn scan_inner(ctx: &Context, dir: &Path) -> ScanResult<ScanReport> {
    let paths = discover_inner(dir)?;
    tracing::debug!(candidates = paths.len(), "discovered artifacts");
    let mut report = ScanReport::default();
    match ctx.policy() {
        ErrorPolicy::FailFast => {
            let scans: ScanResult<Vec<Scan>> = resolve_all(ctx, &paths)?;
            scans?.into_iter().for_each(|scan| report.push(scan));
        },
        ErrorPolicy::Continue => {
            let results: Vec<ScanResult<Scan>> = resolve_all(ctx, &paths)?;
            for (path, result) in paths.into_iter().zip(results) {
                match result {
                    Ok(scan) => report.push(scan),
                    Err(error) => {
                        let kind: &ErrorKind = &error;
                        tracing::warn!(path = %path.display(), error = %kind, "skipping artifact");
                        report.failures.push(ScanFailure { path, error });
                    },
                }
            }
        },
    }
    tracing::info!(
        resolved = report.artifacts.len(),
        cached = report.cached,
        failed = report.failures.len(),
        "scan complete"
    );
    Ok(report)
}

/// Resolve `paths`, collecting into `C` in input order.
fn resolve_all<C>(ctx: &Context, paths: &[PathBuf]) -> ScanResult<C>
where
    C: FromIterator<ScanResult<Scan>> + FromParallelIterator<ScanResult<Scan>> + Send,
{
    let resolve = |path: &PathBuf| scan_file_inner(ctx, path);
    if ctx.jobs() <= 1 {
        return Ok(paths.iter().map(resolve).collect());
    }
    let pool = ThreadPoolBuilder::new().num_threads(ctx.jobs()).build().or_raise(|| ErrorKind::Pool)?;
    Ok(pool.install(|| paths.par_iter().map(resolve).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use wheelhouse_archive::fixtures;
    use wheelhouse_metadata::error::ErrorKind as MetadataErrorKind;

    fn populate(dir: &Path) {
        let nested = dir.join("nested");
        fs::create_dir_all(&nested).unwrap();
        for (name, version) in [("six", "1.16.0"), ("attrs", "23.1.0")] {
            let stem = format!("{name}-{version}");
            let text = fixtures::metadata_text(name, version, None);
            fixtures::write_tarball(dir, &format!("{stem}.tar.gz"), &[(&format!("{stem}/PKG-INFO"), &text)]).unwrap();
        }
        let text = fixtures::metadata_text("zipp", "3.17.0", None);
        fixtures::write_zip(&nested, "zipp-3.17.0-py3-none-any.whl", &[("zipp-3.17.0.dist-info/METADATA", &text)])
            .unwrap();
    }

    fn names(report: &ScanReport) -> Vec<&str> {
        report.artifacts.iter().map(|a| a.metadata().name()).collect()
    }

    #[test]
    fn test_discover_skips_directories_and_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        fs::write(dir.path().join("six-1.16.0.tar.gz.metadata.json"), "{}").unwrap();
        let paths = discover(dir.path()).unwrap();
        let relative: Vec<_> = paths.iter().map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf()).collect();
        assert_eq!(
            relative,
            [
                PathBuf::from("attrs-23.1.0.tar.gz"),
                PathBuf::from("nested/zipp-3.17.0-py3-none-any.whl"),
                PathBuf::from("six-1.16.0.tar.gz"),
            ]
        );
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    fn test_scan_keeps_traversal_order(#[case] jobs: usize) {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let report = scan(&Context::default().with_jobs(jobs), dir.path()).unwrap();
        assert_eq!(names(&report), ["attrs", "zipp", "six"]);
        assert_eq!(report.cached, 0);
        assert!(report.failures.is_empty());
        assert!(report.artifacts.iter().all(|a| a.metadata().hash().is_some()));
    }

    #[test]
    fn test_scan_fails_fast_on_stray_files() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        fs::write(dir.path().join("readme.txt"), "hello").unwrap();
        let err = scan_inner(&Context::default(), dir.path()).unwrap_err();
        match &*err {
            ErrorKind::Metadata { path, kind } => {
                assert_eq!(path, &dir.path().join("readme.txt"));
                assert!(matches!(kind, MetadataErrorKind::UnknownExtension(_)));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    fn test_scan_can_continue_past_failures(#[case] jobs: usize) {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        fs::write(dir.path().join("readme.txt"), "hello").unwrap();
        let ctx = Context::default().with_jobs(jobs).with_policy(ErrorPolicy::Continue);
        let report = scan(&ctx, dir.path()).unwrap();
        assert_eq!(names(&report), ["attrs", "zipp", "six"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, dir.path().join("readme.txt"));
    }

    #[test]
    fn test_scan_counts_sidecar_hits() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let first = scan(&Context::default(), dir.path()).unwrap();
        for artifact in &first.artifacts {
            wheelhouse_cache::write(artifact.path(), artifact.metadata()).unwrap();
        }
        let second = scan(&Context::default(), dir.path()).unwrap();
        assert_eq!(second.cached, 3);
        assert_eq!(second.artifacts, first.artifacts);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_inner(&Context::default(), &dir.path().join("missing")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Walk(_)));
    }
}
