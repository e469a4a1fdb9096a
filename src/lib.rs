//! cmvp-tui - NIST CMVP module browser
//!
//! A terminal application for browsing the NIST Cryptographic Module
//! Validation Program dataset: validated, historical, and in-process
//! cryptographic modules, presented as a filterable list with a per-module
//! detail view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod tui;

use cli::Cli;
use config::Config;
use error::ExitCode;
use tui::{run_tui, App, TuiError};

/// Run the application: load config, set up signal handling, and hand the
/// terminal to the TUI until the user quits.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load().merged_with(&cli);
    log::debug!("Effective config: {config:?}");

    // External SIGINT/SIGTERM set a flag the event loop checks each pass;
    // in raw mode Ctrl+C arrives as a key event and is handled by the app.
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;

    let client = api::Client::with_base_url(
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    let theme = config.theme.resolve();
    let mut app = App::new();

    match run_tui(&mut app, client, &theme, Some(shutdown)) {
        Ok(()) => Ok(ExitCode::Success),
        Err(TuiError::Interrupted) => Ok(ExitCode::Interrupted),
        Err(err) => Err(err.into()),
    }
}
