use crate::cli::WriteMetadataArgs;
use crate::commands::report_failures;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use wheelhouse_config::Config;
use wheelhouse_library::order::UnicodeCollator;
use wheelhouse_library::{Context, write_sidecars};

pub fn run(ctx: &Context, config: &Config, args: WriteMetadataArgs) -> Result<()> {
    let dir = args.download_dir.unwrap_or_else(|| config.download_dir.clone());
    let report = write_sidecars(ctx, &dir, args.overwrite, &mut UnicodeCollator::new())
        .or_raise(|| ErrorKind::Library(dir.clone()))?;
    report_failures(&report.failures);
    Ok(())
}
