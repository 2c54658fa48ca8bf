//! Binary entry point for nmea0183-checksum.

use std::process::ExitCode;

use clap::Parser;
use nmea0183_checksum::cli::{Cli, execute};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_logging();

    match execute(&cli) {
        Ok(outcome) => {
            eprintln!("{}", outcome.summary);

            if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
