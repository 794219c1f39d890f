//! `picky`: check the packages pip and conda report as installed against
//! the project's requirements files and lock file.
//!
//! Exit status is 0 when everything matches, 1 when differences were found
//! and 2 when no package manager could be used or an error occurred.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod export;
mod handler;
mod logging;
mod reconcile;
#[cfg(all(test, unix))]
mod testing;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.log_level);

    match commands::run_command(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(2)
        }
    }
}
