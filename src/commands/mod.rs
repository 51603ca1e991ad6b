pub mod create;
pub mod download;
pub mod list;
pub mod metadata;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use wheelhouse_config::{Config, ErrorPolicy, TemplateConfig};
use wheelhouse_library::Context;
use wheelhouse_library::scan::ScanFailure;
use wheelhouse_render::{HtmlRenderer, Templates};

/// Resolution settings: command-line flags over configuration.
pub fn context(cli: &Cli, config: &Config) -> Context {
    let policy = match cli.keep_going {
        true => ErrorPolicy::Continue,
        false => config.on_error,
    };
    Context::default().with_jobs(cli.jobs.unwrap_or(config.jobs)).with_policy(policy)
}

/// The built-in templates with any configured overrides applied.
pub fn renderer(templates: &TemplateConfig) -> Result<HtmlRenderer> {
    let mut loaded = Templates::builtin().or_raise(|| ErrorKind::Templates)?;
    if let Some(path) = &templates.root {
        loaded = loaded.with_root_file(path).or_raise(|| ErrorKind::Templates)?;
    }
    if let Some(path) = &templates.package {
        loaded = loaded.with_package_file(path).or_raise(|| ErrorKind::Templates)?;
    }
    HtmlRenderer::new(loaded).or_raise(|| ErrorKind::Templates)
}

pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).or_raise(|| ErrorKind::Path(path.to_path_buf()))
}

pub fn report_failures(failures: &[ScanFailure]) {
    if !failures.is_empty() {
        tracing::warn!(skipped = failures.len(), "some archives could not be read and were skipped");
    }
}
