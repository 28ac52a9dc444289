//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;

use crate::{
    direction::Direction,
    types::{MainMenuItem, ResultsItem, Screen},
    ui, App,
};

/// Polling timeout used while nothing is being animated.
///
/// The in-game timer is redrawn at least this often once the player starts moving.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for terminal events and dispatches them to the appropriate handler
/// functions based on the current screen. While a maze is being carved the poll only blocks until
/// the next animation frame is due, after which the due carving steps are performed.
///
/// # Errors
///
/// This function may return errors from reading terminal events or writing the wall snapshot.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = if app.session.generator().is_some() && app.screen == Screen::InGame {
        app.animation.poll_timeout(Instant::now())
    } else {
        IDLE_POLL
    };

    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_events(app, key.code),
            Event::Resize(width, height) => handle_resize_events(app, width, height),
            _ => {}
        }
    }

    if app.screen == Screen::InGame {
        app.advance_generation()?;
    }

    Ok(())
}

/// Dispatches a key press to the handler of the current screen.
///
/// The 'q' key quits from every screen.
pub(crate) fn handle_key_events(app: &mut App, code: KeyCode) {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return;
    }

    match app.screen {
        Screen::MainMenu(_) => handle_main_menu_events(app, code),
        Screen::InGame => handle_in_game_events(app, code),
        Screen::Results(_) => handle_results_events(app, code),
    }
}

/// Handles key presses on the main menu.
///
/// This function moves the cursor with 'j'/'k' or the arrow keys and selects the highlighted item
/// with 'l' or Enter.
pub(crate) fn handle_main_menu_events(app: &mut App, code: KeyCode) {
    let Screen::MainMenu(item) = app.screen else {
        return;
    };

    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::NewGame => app.new_game(),
            MainMenuItem::Quit => app.exit = true,
        },
        _ => {}
    }
}

/// Handles key presses on the completion summary.
///
/// The navigation keys are the ones of the main menu.
pub(crate) fn handle_results_events(app: &mut App, code: KeyCode) {
    let Screen::Results(item) = app.screen else {
        return;
    };

    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::Results(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::Results(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            ResultsItem::PlayAgain => app.replay(),
            ResultsItem::Exit => app.exit = true,
        },
        _ => {}
    }
}

/// Handles key presses while a maze is on screen.
///
/// This function processes movement, reset, grid resizing and the return to the main menu. The
/// movement keys are forwarded even while the maze is being carved; the session ignores them then.
pub(crate) fn handle_in_game_events(app: &mut App, code: KeyCode) {
    if let Some(direction) = key_direction(code) {
        app.move_player(direction);
        return;
    }

    match code {
        KeyCode::Char(' ') => {
            debug!("maze reset requested");
            app.new_game();
        }
        KeyCode::Char('+') => {
            let config = app.session.config();
            app.resize_grid(config.cols.saturating_add(1), config.rows.saturating_add(1));
        }
        KeyCode::Char('-') => {
            let config = app.session.config();
            app.resize_grid(config.cols.saturating_sub(1), config.rows.saturating_sub(1));
        }
        KeyCode::Esc => app.screen = Screen::MainMenu(MainMenuItem::NewGame),
        _ => {}
    }
}

/// Handles terminal resizes.
///
/// When the maze follows the terminal size, a new maze filling the terminal is started whenever
/// the fitting dimensions change.
pub(crate) fn handle_resize_events(app: &mut App, width: u16, height: u16) {
    if !app.config.fit_terminal {
        return;
    }

    let (cols, rows) = ui::fit_grid(width, height);
    let config = app.session.config();
    if (cols, rows) != (config.cols, config.rows) {
        app.resize_grid(cols, rows);
    }
}

/// Maps the movement keys to directions.
///
/// The arrow keys, WASD and the Vim keys all move the player.
pub(crate) const fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'k') => Some(Direction::Top),
        KeyCode::Right | KeyCode::Char('d' | 'l') => Some(Direction::Right),
        KeyCode::Down | KeyCode::Char('s' | 'j') => Some(Direction::Bottom),
        KeyCode::Left | KeyCode::Char('a' | 'h') => Some(Direction::Left),
        _ => None,
    }
}
