//! TUI main loop.
//!
//! Handles terminal setup, the event loop, and cleanup on exit. The terminal
//! is put into raw mode on the alternate screen with mouse capture enabled,
//! and all of it is reverted on exit, including on panic.
//!
//! Concurrency model: the dataset fetch runs on one background thread and
//! delivers its result as an [`Event`] over an mpsc channel; keyboard input,
//! resizes, and spinner ticks are converted into the same event stream by
//! the main loop. The state machine consumes events one at a time, so no
//! state is ever mutated by two handlers concurrently.

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture, Event as CtEvent, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use thiserror::Error;

use super::app::{App, Effect, Event};
use super::theme::Theme;
use super::ui;
use crate::api::Client;

/// Input poll timeout; keeps the spinner animation responsive.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Busy-indicator frame interval.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal operations.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The TUI was interrupted by a shutdown signal.
    #[error("interrupted by shutdown signal")]
    Interrupted,
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Type alias for the terminal backend.
type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive TUI until the user quits or an error occurs.
///
/// Dispatches the dataset fetch on a background thread immediately, so the
/// busy indicator animates while the network round trips complete.
///
/// The terminal is always restored to its original state, even on panic.
/// Returns `TuiError::Interrupted` when the external shutdown flag was set.
pub fn run_tui(
    app: &mut App,
    client: Client,
    theme: &Theme,
    shutdown_flag: Option<Arc<AtomicBool>>,
) -> TuiResult<()> {
    // Restore the terminal before any panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_tui_inner(app, client, theme, shutdown_flag);

    let _ = panic::take_hook();

    result
}

fn run_tui_inner(
    app: &mut App,
    client: Client,
    theme: &Theme,
    shutdown_flag: Option<Arc<AtomicBool>>,
) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;

    let size = terminal.size()?;
    app.update(Event::Resize(size.width, size.height));

    let (tx, rx) = mpsc::channel::<Event>();
    spawn_fetch(client, tx);

    let mut last_tick = Instant::now();
    let mut interrupted = false;

    loop {
        if let Some(flag) = &shutdown_flag {
            if flag.load(Ordering::SeqCst) {
                log::info!("Shutdown signal received, exiting TUI");
                interrupted = true;
                break;
            }
        }

        terminal.draw(|frame| ui::render(frame, app, theme))?;

        // Terminal input
        if crossterm::event::poll(POLL_TIMEOUT)? {
            match crossterm::event::read()? {
                CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.update(Event::Key(key)) == Some(Effect::Quit) {
                        break;
                    }
                }
                CtEvent::Resize(width, height) => {
                    app.update(Event::Resize(width, height));
                }
                _ => {}
            }
        }

        // Background fetch result; loads never request effects
        while let Ok(event) = rx.try_recv() {
            app.update(event);
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            app.update(Event::Tick);
            last_tick = Instant::now();
        }
    }

    restore_terminal()?;

    if interrupted {
        return Err(TuiError::Interrupted);
    }
    log::info!("TUI exited normally");
    Ok(())
}

/// Dispatch the dataset fetch on a background thread. The result comes back
/// as a single `ModulesLoaded` or `LoadFailed` event.
fn spawn_fetch(client: Client, tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let event = match client.fetch_all() {
            Ok(modules) => Event::ModulesLoaded(modules),
            Err(err) => Event::LoadFailed(err.to_string()),
        };
        // The receiver is gone if the user quit before the fetch finished
        let _ = tx.send(event);
    });
}

/// Set up the terminal for TUI mode.
fn setup_terminal() -> TuiResult<Terminal> {
    log::debug!("Setting up terminal for TUI");

    terminal::enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    let _ = terminal::disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    );

    log::debug!("Terminal restored");
    Ok(())
}
