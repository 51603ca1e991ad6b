//! Layered configuration.
//!
//! Values are merged in order, later sources winning:
//!
//! 1. built-in defaults,
//! 2. `config.toml`, `config.yaml` and `config.json` in the platform config
//!    directory (or a single file given explicitly),
//! 3. `WHEELHOUSE_*` environment variables, with `__` separating nested keys
//!    (`WHEELHOUSE_PIP__INDEX_URL`).
//!
//! Command-line flags are applied on top by the binary.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
pub use wheelhouse_library::ErrorPolicy;
pub use wheelhouse_storage::Placement;

pub const ENV_PREFIX: &str = "WHEELHOUSE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where downloaded distributions live.
    pub download_dir: PathBuf,
    /// Root of the generated index.
    pub mirror_dir: PathBuf,
    pub placement: Placement,
    /// Threads used to resolve artifacts.
    pub jobs: usize,
    pub on_error: ErrorPolicy,
    pub templates: TemplateConfig,
    pub pip: PipConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("."),
            mirror_dir: PathBuf::from("."),
            placement: Placement::default(),
            jobs: 1,
            on_error: ErrorPolicy::default(),
            templates: TemplateConfig::default(),
            pip: PipConfig::default(),
        }
    }
}

/// Files replacing the built-in index templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub root: Option<PathBuf>,
    pub package: Option<PathBuf>,
}

/// Defaults for `pip download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipConfig {
    /// Executable name (looked up on `PATH`) or path.
    pub executable: String,
    pub index_url: Option<String>,
    /// `[user:passwd@]proxy.server:port`
    pub proxy: Option<String>,
    /// Accept wheels instead of forcing source distributions.
    pub allow_binary: bool,
    pub platforms: Vec<String>,
    pub python_version: Option<String>,
    pub implementation: Option<String>,
    pub abis: Vec<String>,
    pub no_build_isolation: bool,
}
impl Default for PipConfig {
    fn default() -> Self {
        Self {
            executable: "pip3".to_string(),
            index_url: None,
            proxy: None,
            allow_binary: false,
            platforms: Vec::new(),
            python_version: None,
            implementation: None,
            abis: Vec::new(),
            no_build_isolation: false,
        }
    }
}

impl Config {
    /// Load from the default locations, or from `explicit` alone if given.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let figment = match explicit {
            Some(path) => Self::figment_with_file(path)?,
            None => Self::figment(config_dir().as_deref()),
        };
        Self::extract(figment)
    }

    /// Defaults, every config file found in `dir`, then the environment.
    /// Absent files (or an absent `dir`) are skipped.
    pub fn figment(dir: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = dir {
            tracing::debug!(dir = %dir.display(), "looking for configuration files");
            for name in ["config.toml", "config.yaml", "config.json"] {
                let path = dir.join(name);
                if !path.is_file() {
                    continue;
                }
                figment = match name {
                    "config.toml" => figment.merge(Toml::file_exact(path)),
                    "config.yaml" => figment.merge(Yaml::file_exact(path)),
                    _ => figment.merge(Json::file_exact(path)),
                };
            }
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Defaults, the file at `path`, then the environment.
    pub fn figment_with_file(path: &Path) -> Result<Figment> {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let figment = merge_file(Figment::from(Serialized::defaults(Config::default())), path)?;
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn extract(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            exn::bail!(ErrorKind::InvalidValue("jobs"));
        }
        if self.pip.executable.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidValue("pip.executable"));
        }
        Ok(())
    }
}

/// Platform config directory, e.g. `~/.config/wheelhouse` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wheelhouse").map(|dirs| dirs.config_dir().to_path_buf())
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    let figment = match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(figment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::extract(Figment::from(Serialized::defaults(Config::default()))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.placement, Placement::Symlink);
        assert_eq!(config.on_error, ErrorPolicy::FailFast);
        assert_eq!(config.pip.executable, "pip3");
    }

    #[rstest]
    #[case("config.toml", "mirror_dir = \"/srv/mirror\"\nplacement = \"copy\"\non_error = \"continue\"\n[pip]\nindex_url = \"https://pypi.example/simple\"\n")]
    #[case("config.yaml", "mirror_dir: /srv/mirror\nplacement: copy\non_error: continue\npip:\n  index_url: https://pypi.example/simple\n")]
    #[case("config.json", r#"{"mirror_dir": "/srv/mirror", "placement": "copy", "on_error": "continue", "pip": {"index_url": "https://pypi.example/simple"}}"#)]
    fn test_file_formats(#[case] name: &str, #[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.mirror_dir, PathBuf::from("/srv/mirror"));
        assert_eq!(config.placement, Placement::Copy);
        assert_eq!(config.on_error, ErrorPolicy::Continue);
        assert_eq!(config.pip.index_url.as_deref(), Some("https://pypi.example/simple"));
        // Untouched values keep their defaults.
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert_eq!(config.pip.executable, "pip3");
    }

    #[test]
    fn test_directory_files_are_layered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "jobs = 2\nmirror_dir = \"/from/toml\"\n").unwrap();
        fs::write(dir.path().join("config.json"), r#"{"jobs": 8}"#).unwrap();
        let config = Config::extract(Config::figment(Some(dir.path()))).unwrap();
        assert_eq!(config.jobs, 8);
        assert_eq!(config.mirror_dir, PathBuf::from("/from/toml"));
    }

    #[rstest]
    #[case::empty_directory(true)]
    #[case::missing_directory(false)]
    fn test_directory_without_files_gives_defaults(#[case] create: bool) {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("wheelhouse");
        if create {
            fs::create_dir(&dir).unwrap();
        }
        let config = Config::extract(Config::figment(Some(&dir))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_single_directory_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "jobs: 5
").unwrap();
        let config = Config::extract(Config::figment(Some(dir.path()))).unwrap();
        assert_eq!(config.jobs, 5);
    }

    #[test]
    fn test_environment_wins() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "jobs = 2\n[pip]\nexecutable = \"pip\"\n")?;
            jail.set_env("WHEELHOUSE_JOBS", "6");
            jail.set_env("WHEELHOUSE_PIP__EXECUTABLE", "/opt/python/bin/pip");
            let config = Config::load(Some(Path::new("config.toml"))).unwrap();
            assert_eq!(config.jobs, 6);
            assert_eq!(config.pip.executable, "/opt/python/bin/pip");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/wheelhouse.toml"))).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(PathBuf::from("/nonexistent/wheelhouse.toml")));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "jobs=2").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedFormat(_)));
    }

    #[rstest]
    #[case("jobs = 0\n", ErrorKind::InvalidValue("jobs"))]
    #[case("[pip]\nexecutable = \" \"\n", ErrorKind::InvalidValue("pip.executable"))]
    #[case("placement = \"hardlink\"\n", ErrorKind::Invalid)]
    fn test_invalid_values(#[case] content: &str, #[case] expected: ErrorKind) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(*err, expected);
    }
}
