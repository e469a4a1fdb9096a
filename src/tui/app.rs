//! Application state machine.
//!
//! # Overview
//!
//! `App` is the single mutable model behind the TUI. It owns:
//! - the loading / failed / ready display state
//! - the full module set and the list surface over it
//! - the current view (List or Detail) and the detail sub-view toggle
//!
//! # Architecture
//!
//! All state transitions go through [`App::update`], which consumes one
//! [`Event`] at a time and returns the side effects the run loop must
//! perform. Events arrive from a single serialized queue, so no transition
//! ever races another; the fetch result and spinner ticks may interleave in
//! any order and the machine stays correct (ticks after load are ignored).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::list::ListSurface;
use crate::model::Module;

/// Busy-indicator animation frames.
pub const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Horizontal and vertical padding around the list surface.
const LIST_PADDING_X: u16 = 4;
const LIST_PADDING_Y: u16 = 4;

/// Current view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Scrollable, filterable module list.
    #[default]
    List,
    /// Detail screen for one selected module.
    Detail,
}

/// One message consumed by the state machine.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key press from the terminal.
    Key(KeyEvent),
    /// Terminal was resized to (width, height).
    Resize(u16, u16),
    /// Busy-indicator animation tick.
    Tick,
    /// The background fetch completed successfully.
    ModulesLoaded(Vec<Module>),
    /// The background fetch failed. Fatal to the session; only quit remains.
    LoadFailed(String),
}

/// Side effect requested by a transition. All I/O stays in the run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Tear down the terminal and exit the process.
    Quit,
}

/// The TUI application state. One instance per process lifetime.
#[derive(Debug, Clone)]
pub struct App {
    view: View,
    loading: bool,
    error: Option<String>,
    modules: Vec<Module>,
    list: Option<ListSurface<Module>>,
    selected: Option<Module>,
    show_algo_details: bool,
    width: u16,
    height: u16,
    spinner_frame: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create the initial state: loading, List view, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: View::List,
            loading: true,
            error: None,
            modules: Vec::new(),
            list: None,
            selected: None,
            show_algo_details: false,
            width: 80,
            height: 24,
            spinner_frame: 0,
        }
    }

    // ==================== Accessors ====================

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The full module set, ignoring any filter.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn list(&self) -> Option<&ListSurface<Module>> {
        self.list.as_ref()
    }

    /// The module shown in the Detail view. Only meaningful there.
    #[must_use]
    pub fn selected(&self) -> Option<&Module> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn show_algo_details(&self) -> bool {
        self.show_algo_details
    }

    /// Current busy-indicator glyph.
    #[must_use]
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    // ==================== Transition function ====================

    /// Consume one event and return the effect the run loop must perform.
    pub fn update(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::ModulesLoaded(modules) => {
                self.on_loaded(modules);
                None
            }
            Event::LoadFailed(message) => {
                log::error!("Load failed: {message}");
                self.loading = false;
                self.error = Some(message);
                None
            }
            Event::Resize(width, height) => {
                self.width = width;
                self.height = height;
                if let Some(list) = &mut self.list {
                    list.set_size(
                        width.saturating_sub(LIST_PADDING_X),
                        height.saturating_sub(LIST_PADDING_Y),
                    );
                }
                None
            }
            Event::Tick => {
                // Ticks only animate the busy indicator; ignored once loaded.
                if self.loading {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                }
                None
            }
            Event::Key(key) => self.on_key(key),
        }
    }

    fn on_loaded(&mut self, modules: Vec<Module>) {
        log::info!("Loaded {} CMVP modules", modules.len());
        self.loading = false;
        self.list = Some(ListSurface::new(
            "NIST CMVP Modules",
            modules.clone(),
            self.width.saturating_sub(LIST_PADDING_X),
            self.height.saturating_sub(LIST_PADDING_Y),
        ));
        self.modules = modules;
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<Effect> {
        // While the list surface is accepting filter text it owns the
        // keyboard; none of our own bindings apply.
        if self.view == View::List && self.list.as_ref().is_some_and(ListSurface::is_filtering) {
            if let Some(list) = &mut self.list {
                list.handle_key(key);
            }
            return None;
        }

        let is_ctrl_c = key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL);
        if is_ctrl_c || key.code == KeyCode::Char('q') {
            if self.view == View::Detail {
                self.back_to_list();
                return None;
            }
            log::debug!("Quit requested");
            return Some(Effect::Quit);
        }

        match key.code {
            KeyCode::Enter => {
                if self.view == View::List && !self.loading && self.error.is_none() {
                    let item = self
                        .list
                        .as_ref()
                        .and_then(ListSurface::selected_item)
                        .cloned();
                    if let Some(module) = item {
                        log::debug!("View transition: List -> Detail ({})", module.module_name);
                        self.selected = Some(module);
                        self.view = View::Detail;
                    }
                }
                None
            }
            KeyCode::Esc | KeyCode::Backspace => {
                if self.view == View::Detail {
                    self.back_to_list();
                } else {
                    self.forward_to_list(key);
                }
                None
            }
            KeyCode::Char('d') if self.view == View::Detail => {
                self.show_algo_details = !self.show_algo_details;
                None
            }
            _ => {
                self.forward_to_list(key);
                None
            }
        }
    }

    fn back_to_list(&mut self) {
        log::debug!("View transition: Detail -> List");
        self.selected = None;
        self.view = View::List;
    }

    fn forward_to_list(&mut self, key: KeyEvent) {
        if self.view == View::List && !self.loading && self.error.is_none() {
            if let Some(list) = &mut self.list {
                list.handle_key(key);
            }
        }
    }
}
