//! TUI (Terminal User Interface) runtime loop.
//!
//! This module contains the terminal setup, event loop, and teardown
//! logic for running the TUI application.

use std::io;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{debug, info};

use crate::config::UserConfig;
use crate::input;
use crate::ui;

use super::types::{STATUS_REDRAW_MS, UI_POLL_MS};
use super::App;

/// Sets up the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen buffer.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Entry point for running the TUI application.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// when finished.
pub fn run_tui(user_config: UserConfig) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_tui_loop(&mut terminal, user_config);
    restore_terminal(&mut terminal)?;
    result
}

/// The main TUI event loop.
///
/// New reports are drained from the watcher every iteration. The screen is
/// redrawn when a property changed, a key was handled or the terminal was
/// resized, and once a second so the report age in the title stays current.
fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    user_config: UserConfig,
) -> Result<()> {
    let mut app = App::new(user_config);
    let mut needs_redraw = true;
    let mut ticks: u64 = 0;
    let mut last_draw = Instant::now();

    loop {
        if app.tick() {
            ticks += 1;
            debug!(ticks, "Battery state updated");
            needs_redraw = true;
        }

        if clock_redraw_due(app.last_update, last_draw, Instant::now()) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|frame| ui::render(frame, &app))?;
            needs_redraw = false;
            last_draw = Instant::now();
        }

        if event::poll(Duration::from_millis(UI_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = input::handle_key(&app, key);
                    if !app.handle_action(action) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
    }

    info!(ticks, "TUI exiting");
    Ok(())
}

/// True when the report age is on screen and the last frame is a second old.
fn clock_redraw_due(last_update: Option<Instant>, last_draw: Instant, now: Instant) -> bool {
    last_update.is_some()
        && now.saturating_duration_since(last_draw) >= Duration::from_millis(STATUS_REDRAW_MS)
}
