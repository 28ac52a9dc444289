//! Core application state and logic for the maze game.

use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::{
    animation::AnimationClock,
    config::Config,
    direction::Direction,
    events,
    generator::Step,
    random::SeededRandom,
    session::Session,
    snapshot,
    types::{MainMenuItem, ResultsItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. The maze itself lives in
/// the [`Session`]; the app only adds screens and animation pacing around it.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Maze session.
    ///
    /// This field holds the grid, the generator, the collectibles and the player of the maze being
    /// carved or played.
    pub(crate) session: Session<SeededRandom>,
    /// Animation clock for the carving visualization.
    ///
    /// This field decides when the next carving steps are due, so the generation is animated at
    /// the configured pace.
    pub(crate) animation: AnimationClock,
    /// Configuration read from the command line.
    pub(crate) config: Config,
}

impl App {
    /// Creates a new instance of the App structure from the command line configuration.
    ///
    /// The seed of the random source is logged so an interesting maze can be replayed with
    /// `--seed`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rng = SeededRandom::new(config.seed);
        info!(seed = rng.seed(), "random source seeded");

        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::NewGame),
            session: Session::new(config.session_config(), rng),
            animation: AnimationClock::new(config.frame_delay(), config.steps_per_frame),
            config,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - Failure to write the wall snapshot
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        if self.config.fit_terminal {
            let size = terminal.size()?;
            events::handle_resize_events(self, size.width, size.height);
        }

        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Starts carving a new maze and switches to the in-game screen.
    pub(crate) fn new_game(&mut self) {
        self.session.reset();
        self.animation.reset(Instant::now());
        self.screen = Screen::InGame;
    }

    /// Starts a new maze after the completion summary.
    pub(crate) fn replay(&mut self) {
        self.session.replay();
        self.animation.reset(Instant::now());
        self.screen = Screen::InGame;
    }

    /// Starts a new maze with new dimensions.
    ///
    /// The summary of a solved maze cannot outlive it, so a resize on the completion screen goes
    /// back to the game.
    pub(crate) fn resize_grid(&mut self, cols: usize, rows: usize) {
        self.session.on_resize_grid(cols, rows);
        self.animation.reset(Instant::now());
        if matches!(self.screen, Screen::Results(_)) {
            self.screen = Screen::InGame;
        }
    }

    /// Forwards a movement input to the session and opens the summary when the exit is reached.
    pub(crate) fn move_player(&mut self, direction: Direction) {
        let Some(outcome) = self.session.on_directional_input(direction, Instant::now()) else {
            debug!(%direction, "movement ignored");
            return;
        };

        if outcome.won {
            self.screen = Screen::Results(ResultsItem::PlayAgain);
        }
    }

    /// Performs the carving steps that are due on this pass of the loop.
    ///
    /// # Errors
    ///
    /// This function may return errors if the wall snapshot cannot be written.
    pub(crate) fn advance_generation(&mut self) -> Result<()> {
        if self.session.generator().is_none() {
            return Ok(());
        }

        for _ in 0..self.animation.due_steps(Instant::now()) {
            match self.session.tick()? {
                Step::Finished => {
                    self.on_maze_complete()?;
                    break;
                }
                Step::Idle => break,
                Step::Carved { .. } | Step::Backtracked { .. } => {}
            }
        }

        Ok(())
    }

    /// Writes the wall snapshot of the completed maze when one was requested.
    fn on_maze_complete(&self) -> Result<()> {
        if let Some(path) = &self.config.walls_dump {
            snapshot::write(self.session.grid(), path)?;
            info!(path = %path.display(), "wall snapshot written");
        }

        Ok(())
    }
}
