//! CTL2ENVI CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, run the conversion, and
//! exit with a non-zero status and a one-line message on failure.
//! For programmatic use, prefer the library API (`ctl2envi::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", cli::runner::error_line(&e));
            ExitCode::FAILURE
        }
    }
}
