//! Downloading distributions by running `pip download`.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::instrument;

/// One `pip download` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadRequest {
    pub dest: PathBuf,
    pub index_url: Option<String>,
    pub proxy: Option<String>,
    pub allow_binary: bool,
    pub platforms: Vec<String>,
    pub python_version: Option<String>,
    pub implementation: Option<String>,
    pub abis: Vec<String>,
    pub no_build_isolation: bool,
    pub requirements: Vec<PathBuf>,
    pub packages: Vec<String>,
}

impl DownloadRequest {
    /// Source distributions only, unless binaries are allowed; any target
    /// constraint (platform, Python version, implementation, ABI) switches
    /// pip to binaries only, as pip requires.
    pub fn args(&self) -> Result<Vec<OsString>> {
        if self.packages.is_empty() && self.requirements.is_empty() {
            exn::bail!(ErrorKind::NothingToDownload);
        }
        let mut args: Vec<OsString> = vec!["download".into(), "-d".into(), self.dest.clone().into()];
        if let Some(url) = &self.index_url {
            args.extend(["--index-url".into(), url.into()]);
        }
        if let Some(proxy) = &self.proxy {
            args.extend(["--proxy".into(), proxy.into()]);
        }
        if !self.allow_binary {
            args.extend(["--no-binary".into(), ":all:".into()]);
        }
        let constrained = !self.platforms.is_empty()
            || self.python_version.is_some()
            || self.implementation.is_some()
            || !self.abis.is_empty();
        if constrained {
            args.extend(["--only-binary".into(), ":all:".into()]);
        }
        for platform in &self.platforms {
            args.extend(["--platform".into(), platform.into()]);
        }
        if let Some(version) = &self.python_version {
            args.extend(["--python-version".into(), version.into()]);
        }
        if let Some(implementation) = &self.implementation {
            args.extend(["--implementation".into(), implementation.into()]);
        }
        if self.no_build_isolation {
            args.push("--no-build-isolation".into());
        }
        for abi in &self.abis {
            args.extend(["--abi".into(), abi.into()]);
        }
        for requirements in &self.requirements {
            args.extend(["-r".into(), requirements.clone().into()]);
        }
        args.extend(self.packages.iter().map(OsString::from));
        Ok(args)
    }
}

/// A pip executable found on disk.
#[derive(Debug, Clone)]
pub struct Pip {
    executable: PathBuf,
}
impl Pip {
    /// Find `name` on `PATH`, or use it as-is if it is a path.
    pub fn locate(name: &str) -> Result<Self> {
        let executable = which::which(name).or_raise(|| ErrorKind::PipNotFound(name.to_string()))?;
        tracing::debug!(executable = %executable.display(), "found pip");
        Ok(Self { executable })
    }

    /// Run pip with inherited stdio and wait for it.
    #[instrument(skip_all, fields(dest = %request.dest.display()))]
    pub fn download(&self, request: &DownloadRequest) -> Result<()> {
        let args = request.args()?;
        let rendered = format!(
            "{} {}",
            self.executable.display(),
            args.iter().map(|arg| arg.to_string_lossy()).collect::<Vec<_>>().join(" ")
        );
        tracing::info!(command = %rendered, "running pip");
        let status = Command::new(&self.executable)
            .args(&args)
            .status()
            .or_raise(|| ErrorKind::PipFailed(rendered.clone()))?;
        if !status.success() {
            tracing::error!(%status, "pip failed");
            exn::bail!(ErrorKind::PipFailed(rendered));
        }
        Ok(())
    }
}
