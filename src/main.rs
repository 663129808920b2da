mod cli;
mod execute;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use crate::cli::CLI;

/// Environment variable holding the log filter, e.g. `VGO_LOG=vgo=debug`.
const LOG_ENV: &str = "VGO_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "vgo=debug" } else { "vgo=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn main() {
    let cli = match CLI::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors exit 1 like every other failure.
            let _ = e.print();
            std::process::exit(1);
        }
    };
    init_logging(cli.verbose);
    if let Err(e) = execute::execute(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
