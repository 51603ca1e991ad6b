use crate::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Filter directive for the verbosity flags. `RUST_LOG` replaces it entirely.
fn directive(verbose: u8, quiet: bool) -> String {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    format!("warn,wheelhouse={level}")
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// command output.
pub fn setup_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(cli.verbose, cli.quiet)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose > 1);
    let installed = if cli.json_logs {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.compact().without_time().try_init()
    };
    if let Err(err) = installed {
        eprintln!("failed to install logger: {err}");
    }
}
