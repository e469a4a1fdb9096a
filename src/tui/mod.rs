//! Terminal User Interface module.
//!
//! The interactive browser for the CMVP dataset, built on ratatui with the
//! crossterm backend.
//!
//! # Architecture
//!
//! The TUI follows a unidirectional data flow:
//! 1. Input, resizes, ticks, and fetch results become [`app::Event`] values
//! 2. A single transition function ([`app::App::update`]) consumes them
//! 3. Transitions return [`app::Effect`]s; all I/O stays in [`run`]
//! 4. [`ui::render`] draws the current state, a pure function of it
//!
//! The module consists of:
//! - [`app`]: the application state machine
//! - [`list`]: the reusable scrollable/filterable list surface
//! - [`theme`]: the immutable color palette
//! - [`ui`]: ratatui rendering
//! - [`run`]: terminal lifecycle and the event loop

pub mod app;
pub mod list;
pub mod run;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use app::{App, Effect, Event, View};
pub use list::{substring_filter, FilterState, ListSurface, RowItem};
pub use run::{run_tui, TuiError, TuiResult};
pub use theme::Theme;
