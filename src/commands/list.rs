use crate::cli::ListArgs;
use crate::commands::report_failures;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::{self, Write};
use wheelhouse_config::Config;
use wheelhouse_library::order::UnicodeCollator;
use wheelhouse_library::{Context, ListOptions, Listing, list, scan::scan};

pub fn run(ctx: &Context, config: &Config, args: ListArgs) -> Result<()> {
    let dir = args.download_dir.unwrap_or_else(|| config.download_dir.clone());
    let report = scan(ctx, &dir).or_raise(|| ErrorKind::Library(dir.clone()))?;
    report_failures(&report.failures);
    let options = ListOptions {
        name: args.name,
        use_normalized_name: args.use_norm_name,
    };
    let listings = list(report.artifacts, &options, &mut UnicodeCollator::new());
    // A single name always shows its versions.
    let name_only = args.name_only && options.name.is_none();
    let mut stdout = io::stdout().lock();
    write_listings(&mut stdout, &listings, args.json, name_only).or_raise(|| ErrorKind::Output)
}

fn write_listings(out: &mut impl Write, listings: &[Listing], json: bool, name_only: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, listings)?;
        return writeln!(out);
    }
    for listing in listings {
        writeln!(out, "{}", listing.name)?;
        if name_only {
            continue;
        }
        for version in &listing.versions {
            writeln!(out, "  {version}")?;
        }
    }
    Ok(())
}
