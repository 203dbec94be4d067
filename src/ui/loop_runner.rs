//! Main event loop for the TUI.
//!
//! Multiplexes shutdown signals, terminal input, background task events and a
//! periodic tick. The terminal is restored by `TerminalSession`'s `Drop`, so
//! every exit path (quit, signal, `?` error) leaves it usable.

use crate::app::{App, AppEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

use super::events::handle_app_event;
use super::input::handle_input;
use super::render::render;

/// Spinner frame and status-expiry cadence.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Result of handling a key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Raw mode plus alternate screen, undone on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "Failed to disable raw mode");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            tracing::warn!(error = %e, "Failed to leave alternate screen");
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}

/// Resolves with the signal's name on SIGTERM or SIGINT.
#[cfg(unix)]
async fn shutdown_signal(
    sigterm: &mut tokio::signal::unix::Signal,
    sigint: &mut tokio::signal::unix::Signal,
) -> &'static str {
    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    }
}

/// Runs the categories screen until the user quits or a signal arrives.
///
/// The first fetch starts here, once the terminal is ready. Pending
/// background events are drained before each wait so a burst of keystrokes
/// cannot hold back fetch results.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    let mut keys = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    #[cfg(unix)]
    let (mut sigterm, mut sigint) = {
        use tokio::signal::unix::{signal, SignalKind};
        (
            signal(SignalKind::terminate())?,
            signal(SignalKind::interrupt())?,
        )
    };

    app.load(&event_tx);

    loop {
        if app.needs_redraw {
            session.terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }
        if app.clear_expired_status() {
            app.needs_redraw = true;
        }
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event, &event_tx);
        }

        #[cfg(unix)]
        let shutdown = shutdown_signal(&mut sigterm, &mut sigint);
        #[cfg(not(unix))]
        let shutdown = std::future::pending::<&'static str>();

        tokio::select! {
            biased;

            name = shutdown => {
                tracing::info!(signal = name, "Shutting down on signal");
                break;
            }

            maybe_event = keys.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                    app.needs_redraw = true;
                    if handle_input(app, key.code, key.modifiers, &event_tx) == Action::Quit {
                        break;
                    }
                }
                Some(Ok(Event::Resize(..))) => app.needs_redraw = true,
                Some(Ok(_)) => {}
                Some(Err(e)) => tracing::warn!(error = %e, "Terminal event stream error"),
                None => {
                    tracing::info!("Terminal event stream closed");
                    break;
                }
            },

            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event, &event_tx);
            }

            _ = ticker.tick() => app.tick(),
        }
    }

    Ok(())
}
