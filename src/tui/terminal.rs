//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::settings::Settings;
use crate::error::SetAsideError;
use crate::storage::Storage;

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()
        .map_err(|e| SetAsideError::Tui(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| SetAsideError::Tui(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
pub fn run_tui(storage: &Storage, settings: &mut Settings) -> Result<()> {
    let mut terminal = init_terminal()?;
    let mut app = App::new(storage, settings, chrono::Local::now().date_naive());
    let events = EventHandler::default();

    tracing::info!("tui started");

    let result = event_loop(&mut terminal, &mut app, &events);

    restore_terminal()?;
    tracing::info!("tui stopped");
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| super::views::render(frame, app))?;

        // The event thread hangs up when the terminal can no longer be read
        let Ok(event) = events.next() else {
            break;
        };

        match event {
            Event::Key(key_event) => handle_event(app, Event::Key(key_event))?,
            Event::Resize(_, _) => {
                // Terminal will redraw automatically
            }
            Event::Tick => {
                // Budgets roll over at midnight
                let today = chrono::Local::now().date_naive();
                if today != app.today {
                    tracing::debug!(%today, "date changed");
                    app.today = today;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
