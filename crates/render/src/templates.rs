use crate::assets::Builtins;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs;
use std::path::Path;

pub(crate) const ROOT_TEMPLATE: &str = "root.html";
pub(crate) const PACKAGE_TEMPLATE: &str = "package.html";

/// Source text for the two index pages.
///
/// Starts out with the embedded builtins; either page can be replaced with a
/// file on disk. Files are read immediately so that a bad path fails at
/// startup rather than halfway through building a mirror.
///
/// # Example
///
/// ```no_run
/// use wheelhouse_render::Templates;
/// # use wheelhouse_render::error::Result;
///
/// # fn get_templates() -> Result<Templates> {
/// let templates = Templates::builtin()?.with_package_file("/etc/wheelhouse/package.html")?;
/// # Ok(templates)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Templates {
    pub(crate) root: String,
    pub(crate) package: String,
}
impl Templates {
    pub fn builtin() -> Result<Self> {
        Ok(Self { root: load_builtin(ROOT_TEMPLATE)?, package: load_builtin(PACKAGE_TEMPLATE)? })
    }

    /// Replace the root index template with the content of `path`.
    pub fn with_root_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.root = load_file(path.as_ref())?;
        Ok(self)
    }

    /// Replace the per-distribution index template with the content of `path`.
    pub fn with_package_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.package = load_file(path.as_ref())?;
        Ok(self)
    }

    /// Replace the root index template with raw template text.
    pub fn with_root_content(mut self, content: impl Into<String>) -> Self {
        self.root = content.into();
        self
    }

    /// Replace the per-distribution index template with raw template text.
    pub fn with_package_content(mut self, content: impl Into<String>) -> Self {
        self.package = content.into();
        self
    }
}

fn load_builtin(name: &str) -> Result<String> {
    let data = Builtins::load(name)?;
    String::from_utf8(data.into_owned()).or_raise(|| ErrorKind::Template(Builtins::identifier(name)))
}

fn load_file(path: &Path) -> Result<String> {
    if !path.exists() {
        exn::bail!(ErrorKind::TemplateNotFound(path.display().to_string()));
    }
    fs::read_to_string(path).or_raise(|| ErrorKind::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_override_is_read_eagerly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("root.html");
        fs::write(&path, "custom {{ projects }}").unwrap();
        let templates = Templates::builtin().unwrap().with_root_file(&path).unwrap();
        assert_eq!(templates.root, "custom {{ projects }}");
        assert!(templates.package.contains("Links for"));
    }

    #[test]
    fn missing_override_fails() {
        let err = Templates::builtin().unwrap().with_package_file("/definitely/not/here.html").unwrap_err();
        assert!(matches!(&*err, ErrorKind::TemplateNotFound(_)));
    }
}
