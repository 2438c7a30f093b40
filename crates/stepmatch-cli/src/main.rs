//! Command-line front end for the `stepmatch` library.
//!
//! Matches step calls against definitions, fills definitions with values and
//! resolves step variables. Output goes to stdout; diagnostics go to stderr
//! through `tracing`.

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::logging::init_logging;

/// Exit status for malformed input or configuration.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config.apply_overrides(cli.log_level),
        Err(e) => {
            init_logging(&CliConfig::default());
            error!(error = %e, "invalid configuration");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    init_logging(&config);

    let mut stdout = io::stdout().lock();
    match commands::run(cli, &mut stdout) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
