use crate::cli::CreateArgs;
use crate::commands::{absolute, renderer, report_failures};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use wheelhouse_config::{Config, Placement};
use wheelhouse_library::Context;
use wheelhouse_library::mirror::assemble;
use wheelhouse_library::order::UnicodeCollator;
use wheelhouse_library::scan::scan;
use wheelhouse_storage::MirrorStore;

pub fn run(ctx: &Context, config: &Config, args: CreateArgs) -> Result<()> {
    let download_dir = absolute(args.download_dir.as_deref().unwrap_or(&config.download_dir))?;
    let mirror_dir = absolute(args.mirror_dir.as_deref().unwrap_or(&config.mirror_dir))?;
    let placement = match args.copy {
        true => Placement::Copy,
        false => config.placement,
    };
    let renderer = renderer(&config.templates)?;

    let report = scan(ctx, &download_dir).or_raise(|| ErrorKind::Library(download_dir.clone()))?;
    report_failures(&report.failures);
    let store = MirrorStore::new(&mirror_dir).or_raise(|| ErrorKind::Mirror(mirror_dir.clone()))?;
    let mirror = assemble(report.artifacts, &store, placement, &renderer, &mut UnicodeCollator::new())
        .or_raise(|| ErrorKind::Library(mirror_dir.clone()))?;
    match mirror.root_index {
        Some(index) => tracing::info!(projects = mirror.projects, index = %index.display(), "mirror ready"),
        None => tracing::warn!(dir = %download_dir.display(), "no packages found, mirror left empty"),
    }
    Ok(())
}
