//! Command-line entry point: parse arguments, run, map failure to exit status 1

use std::process::ExitCode;

use babynames::cli::Cli;
use babynames::output;
use clap::Parser;

fn main() -> ExitCode {
    match Cli::parse().execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}
