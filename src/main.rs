mod cli;
mod commands;
mod error;
mod logging;
mod pip;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use std::process::ExitCode;
use wheelhouse_config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(&cli);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            if err.is_retryable() {
                eprintln!("This may succeed if retried.");
            }
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let ctx = commands::context(&cli, &config);
    tracing::debug!(jobs = ctx.jobs(), policy = ?ctx.policy(), "configuration loaded");
    match cli.command {
        Command::Download(args) => commands::download::run(&ctx, &config, args),
        Command::List(args) => commands::list::run(&ctx, &config, args),
        Command::Create(args) => commands::create::run(&ctx, &config, args),
        Command::WriteMetadata(args) => commands::metadata::run(&ctx, &config, args),
    }
}
