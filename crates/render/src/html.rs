use crate::error::{Error, ErrorKind, Result};
use crate::templates::{PACKAGE_TEMPLATE, ROOT_TEMPLATE};
use crate::{FileLink, IndexRenderer, ProjectLink, Templates};
use exn::{OptionExt, ResultExt};
use serde::Serialize;
use std::fmt::Write;
use tracing::instrument;
use upon::{Engine, Template, Value, fmt as upon_fmt};

/// [`IndexRenderer`] backed by [upon] templates.
///
/// Both templates are compiled at construction. Every interpolated value is
/// HTML-escaped unless the template opts out with an explicit formatter.
#[derive(Debug)]
pub struct HtmlRenderer {
    engine: Engine<'static>,
    root: Template<'static>,
    package: Template<'static>,
}
impl HtmlRenderer {
    pub fn new(templates: Templates) -> Result<Self> {
        let mut engine = Engine::new();
        engine.set_default_formatter(&escape_html);
        let root = engine.compile(templates.root).or_raise(|| ErrorKind::Template(ROOT_TEMPLATE.to_string()))?;
        let package =
            engine.compile(templates.package).or_raise(|| ErrorKind::Template(PACKAGE_TEMPLATE.to_string()))?;
        Ok(Self { engine, root, package })
    }

    /// Renderer using the embedded templates.
    pub fn builtin() -> Result<Self> {
        Self::new(Templates::builtin()?)
    }
}
impl TryFrom<Templates> for HtmlRenderer {
    type Error = Error;
    fn try_from(templates: Templates) -> std::result::Result<Self, Self::Error> {
        HtmlRenderer::new(templates)
    }
}

/// Default formatter: strings are HTML-escaped, anything else is written as
/// upon would.
fn escape_html(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
    let Value::String(s) = value else {
        return upon_fmt::default(f, value);
    };
    for c in s.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&#x27;")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct RootContext<'a> {
    projects: &'a [ProjectLink],
}

#[derive(Serialize)]
struct PackageContext<'a> {
    name: &'a str,
    files: &'a [FileLink],
}

impl IndexRenderer for HtmlRenderer {
    #[instrument(level = "debug", skip_all, fields(projects = projects.len()))]
    fn render_root(&self, projects: &[ProjectLink]) -> Result<String> {
        if projects.is_empty() {
            exn::bail!(ErrorKind::EmptyIndex);
        }
        self.root
            .render(&self.engine, RootContext { projects })
            .to_string()
            .or_raise(|| ErrorKind::Template(ROOT_TEMPLATE.to_string()))
    }

    #[instrument(level = "debug", skip_all, fields(files = files.len()))]
    fn render_package(&self, files: &[FileLink]) -> Result<String> {
        let first = files.first().ok_or_raise(|| ErrorKind::EmptyIndex)?;
        self.package
            .render(&self.engine, PackageContext { name: &first.name, files })
            .to_string()
            .or_raise(|| ErrorKind::Template(PACKAGE_TEMPLATE.to_string()))
    }
}
