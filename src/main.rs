//! cmvp-tui - NIST CMVP module browser
//!
//! Entry point for the CLI application.

use clap::Parser;
use cmvp_tui::{cli::Cli, error::ExitCode};

fn main() {
    let cli = Cli::parse();

    match cmvp_tui::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
