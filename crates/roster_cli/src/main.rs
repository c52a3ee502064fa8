//! Demo entry point for the Roster registry.
//!
//! # Responsibility
//! - Bootstrap optional file logging from the environment.
//! - Print the sample scenario report to stdout.

use roster_core::{init_logging, LogSettings};
use std::process::ExitCode;

fn main() -> ExitCode {
    match LogSettings::from_env() {
        Ok(Some(settings)) => {
            if let Err(err) = init_logging(&settings) {
                eprintln!("logging disabled: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    println!("roster_core version={}", roster_core::core_version());

    let stdout = std::io::stdout();
    match roster_cli::run_demo(&mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("failed to write report: {err}");
            ExitCode::FAILURE
        }
    }
}
