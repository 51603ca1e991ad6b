//! Lay resolved artifacts out as a "simple" package index.
//!
//! ```text
//! <mirror>/index.html
//! <mirror>/<normalized-name>/index.html
//! <mirror>/<normalized-name>/<artifact-filename>
//! ```

pub mod error;

use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::group::group_by_normalized_name;
use crate::mirror::error::{ErrorKind, Result as MirrorResult};
use crate::order::{Collate, Direction, sort_by_version};
use crate::reconcile::reconcile_names;
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tracing::instrument;
use wheelhouse_metadata::PackageArtifact;
use wheelhouse_render::{FileLink, IndexRenderer, ProjectLink};
use wheelhouse_storage::{MirrorStore, Placement};

pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Default)]
pub struct MirrorReport {
    /// Distribution directories written.
    pub projects: usize,
    /// Artifacts placed.
    pub files: usize,
    /// Location of the root page; `None` when there was nothing to index.
    pub root_index: Option<PathBuf>,
}

/// Place every artifact and write the index pages.
///
/// Artifacts are grouped by normalized name. Each group gets its directory,
/// has its untrusted names reconciled, is sorted by ascending version, placed,
/// and indexed. The root page lists the first artifact of every group and is
/// only written if there is at least one group.
#[instrument(skip_all, fields(mirror = %store.root().display(), artifacts = artifacts.len(), ?placement))]
pub fn assemble(
    artifacts: Vec<PackageArtifact>,
    store: &MirrorStore,
    placement: Placement,
    renderer: &impl IndexRenderer,
    collator: &mut impl Collate,
) -> LibraryResult<MirrorReport> {
    assemble_inner(artifacts, store, placement, renderer, collator).or_raise(|| LibraryErrorKind::Mirror)
}

fn assemble_inner(
    artifacts: Vec<PackageArtifact>,
    store: &MirrorStore,
    placement: Placement,
    renderer: &impl IndexRenderer,
    collator: &mut impl Collate,
) -> MirrorResult<MirrorReport> {
    let mut report = MirrorReport::default();
    let mut projects = Vec::new();
    for mut group in group_by_normalized_name(artifacts, collator) {
        let key = group.key;
        store.ensure_dir(&key).or_raise(|| ErrorKind::Directory(key.clone()))?;
        reconcile_names(&mut group.items);
        sort_by_version(&mut group.items, |a| a.metadata().version(), Direction::Ascending);

        for artifact in &group.items {
            let dest = Path::new(&key).join(artifact.filename());
            store
                .place(artifact.path(), &dest, placement)
                .or_raise(|| ErrorKind::Place(artifact.filename().to_string()))?;
        }
        let files: Vec<FileLink> = group
            .items
            .iter()
            .map(|artifact| FileLink {
                filename: artifact.filename().to_string(),
                hash: artifact.metadata().hash().map(str::to_string),
                name: artifact.metadata().name().to_string(),
            })
            .collect();
        let html = renderer.render_package(&files).or_raise(|| ErrorKind::Render(key.clone()))?;
        store
            .write(Path::new(&key).join(INDEX_FILE), html.as_bytes())
            .or_raise(|| ErrorKind::Write(key.clone()))?;
        tracing::debug!(project = %key, files = files.len(), "project indexed");

        report.projects += 1;
        report.files += files.len();
        if let Some(first) = files.into_iter().next() {
            projects.push(ProjectLink {
                normalized_name: key,
                name: first.name,
            });
        }
    }

    if !projects.is_empty() {
        let html = renderer.render_root(&projects).or_raise(|| ErrorKind::RootIndex)?;
        let path = store.write(INDEX_FILE, html.as_bytes()).or_raise(|| ErrorKind::RootIndex)?;
        report.root_index = Some(path);
    }
    tracing::info!(projects = report.projects, files = report.files, "mirror assembled");
    Ok(report)
}
