//! Command-line interface definitions.
//!
//! The browser has a single operation, so there are no subcommands: flags
//! tune verbosity, the API endpoint, and the color theme.
//!
//! # Example
//!
//! ```bash
//! # Browse the published dataset
//! cmvp-tui
//!
//! # Point at a mirror, force the light theme
//! cmvp-tui --base-url http://localhost:8080/api --theme light
//!
//! # Verbose mode for debugging
//! cmvp-tui -vv
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::tui::Theme;

/// Interactive TUI browser for the NIST CMVP validated modules dataset.
///
/// Loads the active, historical, and in-process module lists and presents
/// them as a filterable list with a per-module detail view.
#[derive(Debug, Parser)]
#[command(name = "cmvp-tui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Base URL of the CMVP JSON API
    #[arg(long, value_name = "URL", env = "CMVP_API_URL")]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// TUI color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
}

/// Theme selection, shared between the CLI and the config file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeArg {
    /// Detect from the terminal environment
    #[default]
    Auto,
    Dark,
    Light,
}

impl ThemeArg {
    /// Resolve to a concrete palette.
    #[must_use]
    pub fn resolve(self) -> Theme {
        match self {
            Self::Auto => Theme::auto(),
            Self::Dark => Theme::dark(),
            Self::Light => Theme::light(),
        }
    }
}
