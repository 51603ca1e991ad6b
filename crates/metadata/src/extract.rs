use crate::error::{ErrorKind, Result};
use crate::{MetadataParser, PackageMetadata};
use exn::OptionExt;
use std::path::Path;
use tracing::instrument;
use url::Url;
use wheelhouse_archive::ArchiveKind;

/// Name of the description member at the root of a source distribution.
const SDIST_METADATA_FILE: &str = "PKG-INFO";

/// Recovers a [`PackageMetadata`] record from a distribution file.
///
/// Hashing and sidecar handling belong to the caller; this only looks inside
/// the archive (and at its file name).
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    parser: MetadataParser,
}

impl Extractor {
    pub fn new(parser: MetadataParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &MetadataParser {
        &self.parser
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn extract(&self, path: impl AsRef<Path>) -> Result<PackageMetadata> {
        let path = path.as_ref();
        let kind = ArchiveKind::from_path(path).map_err(ErrorKind::archive)?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_raise(|| ErrorKind::InvalidArchiveName(path.display().to_string()))?;
        match kind {
            ArchiveKind::Wheel => self.extract_wheel(path, filename),
            ArchiveKind::TarGz | ArchiveKind::TarBz2 | ArchiveKind::Zip => self.extract_sdist(path, kind, filename),
        }
    }

    /// `<stem>/PKG-INFO`, falling back to `<name>-<version>` read off the stem.
    fn extract_sdist(&self, path: &Path, kind: ArchiveKind, filename: &str) -> Result<PackageMetadata> {
        let stem = kind.stem(filename);
        let member = format!("{stem}/{SDIST_METADATA_FILE}");
        match kind.read_member(path, &member) {
            Ok(text) => self.parser.parse(&text),
            Err(err) if err.is_member_not_found() => {
                let (name, version) = stem
                    .rsplit_once('-')
                    .ok_or_raise(|| ErrorKind::MetadataExtractionFailed(filename.to_string()))?;
                tracing::debug!(filename, name, version, "no PKG-INFO, identity taken from file name");
                Ok(PackageMetadata::new(name, version))
            },
            Err(err) => Err(ErrorKind::archive(err)),
        }
    }

    /// `<distribution>-<version>.dist-info/METADATA`, with a homepage-based
    /// correction when the declared name does not prefix the file name.
    fn extract_wheel(&self, path: &Path, filename: &str) -> Result<PackageMetadata> {
        let mut components = filename.splitn(3, '-');
        let (Some(distribution), Some(version), Some(_)) = (components.next(), components.next(), components.next())
        else {
            exn::bail!(ErrorKind::InvalidArchiveName(filename.to_string()));
        };
        let member = format!("{distribution}-{version}.dist-info/METADATA");
        let text = ArchiveKind::Wheel.read_member(path, &member).map_err(ErrorKind::archive)?;
        let mut meta = self.parser.parse(&text)?;
        if filename.starts_with(meta.name()) {
            return Ok(meta);
        }

        meta = meta.with_trusted(false);
        match homepage_candidate(meta.homepage()) {
            Some(candidate) if filename.starts_with(&candidate) => {
                tracing::info!(filename, declared = meta.name(), adopted = %candidate, "wheel name taken from homepage");
                meta.adopt_name(candidate);
            },
            _ => {
                tracing::warn!(
                    filename,
                    declared = meta.name(),
                    homepage = meta.homepage(),
                    "wheel name does not match file name, keeping untrusted name"
                );
            },
        }
        Ok(meta)
    }
}

/// The homepage path up to (not including) its last `/`, leading slash removed.
///
/// `https://example.com/Foo/repo` gives `Foo`. A URL with a single path
/// segment, an empty candidate (`https://example.com//repo`), or one that
/// fails to parse, gives nothing.
fn homepage_candidate(homepage: &str) -> Option<String> {
    if homepage.is_empty() {
        return None;
    }
    let url = match Url::parse(homepage) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(homepage, error = %err, "homepage is not a valid URL");
            return None;
        },
    };
    let (candidate, _) = url.path().strip_prefix('/')?.rsplit_once('/')?;
    (!candidate.is_empty()).then(|| candidate.to_string())
}
