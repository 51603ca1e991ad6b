//! HTML index pages for the package mirror.
//!
//! Two pages make up a "simple" package index that `pip --index-url` can
//! consume: a root page linking to every distribution, and one page per
//! distribution linking to its files. Rendering is a pure function of the
//! listings passed in; callers sort them beforehand.

mod assets;
pub mod error;
mod html;
mod templates;

use crate::error::Result;
pub use crate::html::HtmlRenderer;
pub use crate::templates::Templates;
use serde::Serialize;

/// One distribution on the root page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLink {
    /// Directory name under the mirror root.
    pub normalized_name: String,
    /// Link text.
    pub name: String,
}

/// One file on a distribution page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLink {
    pub filename: String,
    /// Hex SHA-256, appended to the link as `#sha256=` when known.
    pub hash: Option<String>,
    pub name: String,
}

/// Turns listings into index documents.
pub trait IndexRenderer {
    /// Render the root page. `projects` must not be empty.
    fn render_root(&self, projects: &[ProjectLink]) -> Result<String>;

    /// Render one distribution's page, titled after the first file's name.
    /// `files` must not be empty.
    fn render_package(&self, files: &[FileLink]) -> Result<String>;
}
