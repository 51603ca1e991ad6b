//! Path validation and relative link computation.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates a mirror-relative path.
/// Ensures that paths don't escape the mirror root (no `..` traversal).
///
/// > **Note:** This does **not** normalize backslashes, non-UTF8 bytes, or
/// >           platform-specific weirdness. Null bytes are explicitly rejected.
///
/// # Returns
/// Returns the normalized path if valid, or [`InvalidPath`](crate::error::ErrorKind::InvalidPath)
/// if invalid.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wheelhouse_storage::validate_path;
/// // Valid paths
/// assert!(validate_path("requests/index.html").is_ok());
/// assert!(validate_path("six/../six/six-1.16.0.tar.gz").is_ok()); // (never leaves mirror root)
/// // Invalid paths
/// assert!(validate_path("../etc/passwd").is_err());
/// assert!(validate_path("six/../../b").is_err());
/// assert!(validate_path("a\0b").is_err());
/// // Paths get resolved
/// assert_eq!(
///     validate_path("wrong/../still-wrong/.././six//./index.html/").unwrap(),
///     Path::new("six/index.html")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) => {
                // Null bytes pass through Path::components() on Unix but cause
                // truncation in C-based syscalls.
                if s.as_encoded_bytes().contains(&0) {
                    exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(ErrorKind::InvalidPath(path.to_path_buf())),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
                }
            },
        }
    }
    match components.is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.to_path_buf())),
        false => Ok(components.into_iter().collect()),
    }
}

/// The path to `target` as seen from inside the directory `from`.
///
/// Both paths must be absolute; the computation is purely lexical, so callers
/// resolve symlinked prefixes themselves if they care.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wheelhouse_storage::relative_path;
///
/// assert_eq!(
///     relative_path("/srv/mirror/six", "/srv/downloads/six-1.16.0.tar.gz").unwrap(),
///     Path::new("../../downloads/six-1.16.0.tar.gz")
/// );
/// ```
pub fn relative(from: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<PathBuf> {
    let (from, target) = (from.as_ref(), target.as_ref());
    for path in [from, target] {
        if !path.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
        }
    }
    let from = lexical(from);
    let target = lexical(target);
    let shared = from.iter().zip(target.iter()).take_while(|(a, b)| a == b).count();
    let mut relative = PathBuf::new();
    for _ in shared..from.len() {
        relative.push(Component::ParentDir);
    }
    for component in &target[shared..] {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir);
    }
    Ok(relative)
}

/// Absolute path components with `.` dropped and `..` applied.
fn lexical(path: &Path) -> Vec<Component<'_>> {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            },
            other => components.push(other),
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_paths() {
        assert_eq!(validate(Path::new("six/six-1.16.0.tar.gz")).unwrap(), Path::new("six/six-1.16.0.tar.gz"));
        assert_eq!(validate(Path::new("index.html")).unwrap(), Path::new("index.html"));
    }

    #[test]
    fn test_path_normalization() {
        assert_eq!(validate(Path::new("a//b//c")).unwrap(), Path::new("a/b/c"));
        assert_eq!(validate(Path::new("a/./b/./c")).unwrap(), Path::new("a/b/c"));
        assert_eq!(validate(Path::new("a/b/..")).unwrap(), Path::new("a"));
        assert_eq!(validate(Path::new("six/")).unwrap(), Path::new("six"));
    }

    #[test]
    fn test_traversal_attempts() {
        assert!(validate(Path::new("../etc/passwd")).is_err());
        assert!(validate(Path::new("a/../../b")).is_err());
        assert!(validate(Path::new("..")).is_err());
    }

    #[test]
    fn test_invalid_and_empty() {
        assert!(validate(Path::new("a\0b")).is_err());
        assert!(validate(Path::new("")).is_err());
        assert!(validate(Path::new("./.")).is_err());
        assert!(validate(Path::new("//")).is_err());
    }

    #[rstest]
    #[case("/srv/mirror/six", "/srv/downloads/six-1.16.0.tar.gz", "../../downloads/six-1.16.0.tar.gz")]
    #[case("/srv/mirror/six", "/srv/mirror/six/six-1.16.0.tar.gz", "six-1.16.0.tar.gz")]
    #[case("/data/mirror/six", "/data/mirror/downloads/nested/a.whl", "../downloads/nested/a.whl")]
    #[case("/a/b", "/a/b", ".")]
    #[case("/a/./b/../c", "/a/x", "../x")]
    #[case("/", "/srv/a.zip", "srv/a.zip")]
    fn test_relative(#[case] from: &str, #[case] target: &str, #[case] expected: &str) {
        assert_eq!(relative(from, target).unwrap(), Path::new(expected));
    }

    #[test]
    fn relative_requires_absolute_paths() {
        assert!(relative("mirror/six", "/srv/a.zip").is_err());
        assert!(relative("/srv/mirror", "a.zip").is_err());
    }
}
