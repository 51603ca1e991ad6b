use crate::PackageMetadata;
use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use regex::Regex;
use tracing::instrument;

const NAME_PATTERN: &str = r"(?m)^Name: (.*)$";
const VERSION_PATTERN: &str = r"(?m)^Version: (.*)$";
const HOMEPAGE_PATTERN: &str = r"(?m)^(?:Home-[pP]age:|Project-URL: [Hh]ome-?[pP]age,) (.*)$";

/// Reads the core-metadata fields (`PKG-INFO`, `METADATA`) the mirror needs.
///
/// Compiled once and shared by reference; [`Regex`] is `Sync`, so one parser
/// serves every worker thread.
#[derive(Debug, Clone)]
pub struct MetadataParser {
    name: Regex,
    version: Regex,
    homepage: Regex,
}

impl Default for MetadataParser {
    fn default() -> Self {
        Self {
            name: Regex::new(NAME_PATTERN).expect("name pattern is valid"),
            version: Regex::new(VERSION_PATTERN).expect("version pattern is valid"),
            homepage: Regex::new(HOMEPAGE_PATTERN).expect("homepage pattern is valid"),
        }
    }
}

impl MetadataParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a description document into a trusted record.
    ///
    /// `Name` and `Version` are required. The first homepage-like line wins;
    /// none at all gives an empty homepage.
    #[instrument(level = "trace", skip(self, text), fields(text_size = text.len()))]
    pub fn parse(&self, text: &str) -> Result<PackageMetadata> {
        let name = first_capture(&self.name, text).ok_or_raise(|| ErrorKind::InvalidMetadata("Name"))?;
        let version = first_capture(&self.version, text).ok_or_raise(|| ErrorKind::InvalidMetadata("Version"))?;
        let homepage = first_capture(&self.homepage, text).unwrap_or_default();
        Ok(PackageMetadata::new(name, version).with_homepage(homepage))
    }
}

fn first_capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex.captures(text).and_then(|captures| captures.get(1)).map(|value| value.as_str().trim())
}
