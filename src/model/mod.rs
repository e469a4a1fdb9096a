//! Data entities shared across the API and TUI layers.

pub mod module;

pub use module::{Module, ModuleStatus};
