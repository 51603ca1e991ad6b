use crate::normalize;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Identity of a single distribution file.
///
/// Serialized as the sidecar record, so field names follow the sidecar's JSON
/// keys (`norm_name`, `sha256`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    name: String,
    #[serde(rename = "norm_name")]
    normalized_name: String,
    version: String,
    #[serde(default)]
    homepage: String,
    #[serde(default)]
    trusted: bool,
    #[serde(
        rename = "sha256",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    hash: Option<String>,
}

impl PackageMetadata {
    /// A trusted record with no homepage and no hash.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            normalized_name: normalize(&name),
            name,
            version: version.into(),
            homepage: String::new(),
            trusted: true,
            hash: None,
        }
    }

    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = homepage.into();
        self
    }

    #[must_use]
    pub fn with_trusted(mut self, trusted: bool) -> Self {
        self.trusted = trusted;
        self
    }

    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The grouping key: [`normalize`]d [`name`](Self::name).
    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Declared project URL, empty if none was declared.
    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    /// `false` when the name was guessed by the wheel heuristic.
    pub fn is_trusted(&self) -> bool {
        self.trusted
    }

    /// Lowercase hex SHA-256 of the artifact. `None` for sidecars written
    /// before hashes were recorded.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Replace the display name, leaving the normalized name (the grouping
    /// key) untouched.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the name and recompute the normalized name from it.
    pub(crate) fn adopt_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.normalized_name = normalize(&self.name);
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|hash| !hash.is_empty()))
}

/// One distribution file on disk and the identity resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArtifact {
    path: PathBuf,
    filename: String,
    metadata: PackageMetadata,
}

impl PackageArtifact {
    pub fn new(path: impl Into<PathBuf>, metadata: PackageMetadata) -> Self {
        let path = path.into();
        let filename = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
        Self { path, filename, metadata }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of [`path`](Self::path).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut PackageMetadata {
        &mut self.metadata
    }

    pub fn into_metadata(self) -> PackageMetadata {
        self.metadata
    }
}
