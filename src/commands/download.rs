use crate::cli::DownloadArgs;
use crate::commands::report_failures;
use crate::error::{ErrorKind, Result};
use crate::pip::{DownloadRequest, Pip};
use exn::ResultExt;
use wheelhouse_config::{Config, PipConfig};
use wheelhouse_library::order::UnicodeCollator;
use wheelhouse_library::{Context, write_sidecars};

pub fn run(ctx: &Context, config: &Config, args: DownloadArgs) -> Result<()> {
    let executable = args.pip.clone().unwrap_or_else(|| config.pip.executable.clone());
    let request = request(config, &config.pip, args);
    // Fail on an empty request before looking for pip.
    request.args()?;
    Pip::locate(&executable)?.download(&request)?;

    let report = write_sidecars(ctx, &request.dest, false, &mut UnicodeCollator::new())
        .or_raise(|| ErrorKind::Library(request.dest.clone()))?;
    report_failures(&report.failures);
    Ok(())
}

/// Flags over configured pip defaults. Lists given on the command line
/// replace the configured ones.
fn request(config: &Config, pip: &PipConfig, args: DownloadArgs) -> DownloadRequest {
    let or_configured = |given: Vec<String>, configured: &[String]| match given.is_empty() {
        true => configured.to_vec(),
        false => given,
    };
    DownloadRequest {
        dest: args.download_dir.unwrap_or_else(|| config.download_dir.clone()),
        index_url: args.index_url.or_else(|| pip.index_url.clone()),
        proxy: args.proxy.or_else(|| pip.proxy.clone()),
        allow_binary: args.allow_binary || pip.allow_binary,
        platforms: or_configured(args.platforms, &pip.platforms),
        python_version: args.python_version.or_else(|| pip.python_version.clone()),
        implementation: args.implementation.or_else(|| pip.implementation.clone()),
        abis: or_configured(args.abis, &pip.abis),
        no_build_isolation: args.no_build_isolation || pip.no_build_isolation,
        requirements: args.requirements,
        packages: args.packages,
    }
}
