use crate::error::{ErrorKind, Result};
use crate::path::{relative as relative_path, validate as validate_path};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// How an artifact from the download directory ends up inside the mirror.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Relative symlink pointing back at the downloaded file.
    #[default]
    Symlink,
    /// Independent byte copy.
    Copy,
}

/// The mirror directory.
///
/// All paths handed to a store are relative to its root and validated before
/// use.
///
/// # Examples
///
/// ```no_run
/// use wheelhouse_storage::{MirrorStore, Placement};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MirrorStore::new("/srv/mirror")?;
/// store.ensure_dir("six")?;
/// store.place("/srv/downloads/six-1.16.0.tar.gz", "six/six-1.16.0.tar.gz", Placement::Symlink)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct MirrorStore {
    root: PathBuf,
}
impl MirrorStore {
    /// Open (creating if needed) the mirror rooted at the absolute path `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            fs::create_dir_all(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a mirror-relative path.
    pub fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    /// Create a directory (and its parents) inside the mirror. Existing
    /// directories are fine.
    pub fn ensure_dir(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let abs_path = self.absolute_path(path.as_ref())?;
        fs::create_dir_all(&abs_path).map_err(|e| Self::map_io_error(e, &abs_path))?;
        Ok(abs_path)
    }

    /// Place the file at `source` (absolute) at `dest` (mirror-relative).
    ///
    /// A symlink that already exists at `dest` is left alone, whatever it
    /// points to. A copy always overwrites.
    #[instrument(level = "debug", skip(self, source, dest), fields(
        source = %source.as_ref().display(),
        dest = %dest.as_ref().display(),
    ))]
    pub fn place(&self, source: impl AsRef<Path>, dest: impl AsRef<Path>, placement: Placement) -> Result<PathBuf> {
        let source = source.as_ref();
        let abs_dest = self.absolute_path(dest.as_ref())?;
        match placement {
            Placement::Symlink => self.link(source, &abs_dest)?,
            Placement::Copy => self.copy(source, &abs_dest)?,
        }
        Ok(abs_dest)
    }

    fn link(&self, source: &Path, abs_dest: &Path) -> Result<()> {
        let parent = abs_dest.parent().unwrap_or(&self.root);
        let target = relative_path(parent, source)?;
        match symlink(&target, abs_dest) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == IoErrorKind::AlreadyExists => {
                tracing::debug!(dest = %abs_dest.display(), "link already exists");
                Ok(())
            },
            Err(err) => Err(exn::Exn::from(Self::map_io_error(err, abs_dest))),
        }
    }

    /// A symlink left at `abs_dest` by an earlier run is replaced, never
    /// written through.
    fn copy(&self, source: &Path, abs_dest: &Path) -> Result<()> {
        let copy_failed = || ErrorKind::CopyFailed {
            from: source.to_path_buf(),
            to: abs_dest.to_path_buf(),
        };
        match fs::symlink_metadata(abs_dest) {
            Ok(meta) if meta.file_type().is_symlink() => {
                tracing::debug!(dest = %abs_dest.display(), "replacing link with copy");
                fs::remove_file(abs_dest).or_raise(copy_failed)?;
            },
            Ok(_) => {},
            Err(err) if err.kind() == IoErrorKind::NotFound => {},
            Err(err) => return Err(err).or_raise(copy_failed),
        }
        fs::copy(source, abs_dest).or_raise(copy_failed)?;
        Ok(())
    }

    /// Write a file inside the mirror, replacing any previous content.
    pub fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<PathBuf> {
        let abs_path = self.absolute_path(path.as_ref())?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::map_io_error(e, parent))?;
        }
        fs::write(&abs_path, data).map_err(|e| Self::map_io_error(e, &abs_path))?;
        Ok(abs_path)
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            IoErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            IoErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
