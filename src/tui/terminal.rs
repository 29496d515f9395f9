//! Terminal setup and teardown
//!
//! Raw mode and the alternate screen are restored on exit and from the
//! panic hook.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::Settings;
use crate::models::TransactionRecord;
use crate::session::{InputSession, TransactionSink};

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;
use super::view;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

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

/// Run the entry screen until the session closes or is cancelled.
///
/// Returns the records saved during the run.
pub fn run_entry(
    sink: &dyn TransactionSink,
    settings: &Settings,
    session: InputSession,
) -> Result<Vec<TransactionRecord>> {
    let mut terminal = init_terminal()?;
    let mut app = App::new(sink, settings, session);
    let result = event_loop(&mut terminal, &mut app);
    restore_terminal()?;
    result?;

    Ok(app.submitted)
}

fn event_loop(terminal: &mut Tui, app: &mut App<'_>) -> Result<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| view::render(frame, app))?;
        handle_event(app, events.next()?);
    }

    Ok(())
}
