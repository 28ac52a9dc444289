//! Game session aggregate.
//!
//! A [`Session`] owns everything that lives for one maze: the grid, the generator while the maze is
//! being carved, the collectibles and the player. Resetting replaces all of it at once, so nothing
//! from a previous maze can leak into the next one.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    collectibles::{Collectibles, DEFAULT_COLLECTIBLES, DEFAULT_PLACEMENT_ATTEMPTS},
    direction::Direction,
    error::CarveError,
    generator::{MazeGenerator, Step},
    grid::Grid,
    player::{MoveOutcome, PlayerState},
    random::RandomSource,
};

/// Smallest number of columns or rows a session accepts.
pub const MIN_DIMENSION: usize = 2;

/// Largest number of columns or rows a session accepts.
pub const MAX_DIMENSION: usize = 200;

/// Parameters of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "The configuration is also used outside of this module."
)]
pub struct SessionConfig {
    /// Number of maze columns.
    pub cols: usize,
    /// Number of maze rows.
    pub rows: usize,
    /// Number of collectibles to place once the maze is carved.
    pub collectibles: usize,
    /// Number of coordinate samples spent placing collectibles.
    pub placement_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: 24,
            rows: 14,
            collectibles: DEFAULT_COLLECTIBLES,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Stage of a session, as seen by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The maze is being carved; movement input is ignored.
    Generating,
    /// The maze is complete and the player is on the way to the exit.
    Playing,
    /// The player reached the exit.
    Won,
}

/// One maze from carving to completion.
#[derive(Debug)]
pub struct Session<R> {
    /// Session parameters, dimensions included.
    config: SessionConfig,
    /// Maze grid.
    grid: Grid,
    /// Generator state, dropped once the maze is complete.
    generator: Option<MazeGenerator>,
    /// Collectibles left in the maze.
    collectibles: Collectibles,
    /// Player state.
    player: PlayerState,
    /// Source of every random choice of the session.
    rng: R,
    /// Number of mazes started by this session, the current one included.
    round: u32,
}

impl<R: RandomSource> Session<R> {
    /// Starts a session and the carving of its first maze.
    pub fn new(config: SessionConfig, rng: R) -> Self {
        let config = clamp(config);
        let mut grid = Grid::build(config.cols, config.rows);
        let generator = MazeGenerator::new(&mut grid);
        let player = PlayerState::new(grid.origin());

        info!(cols = config.cols, rows = config.rows, "starting maze");

        Self {
            config,
            grid,
            generator: Some(generator),
            collectibles: Collectibles::empty(),
            player,
            rng,
            round: 1,
        }
    }

    /// Throws away the current maze and starts carving a new one with the same dimensions.
    pub fn reset(&mut self) {
        self.grid = Grid::build(self.config.cols, self.config.rows);
        self.generator = Some(MazeGenerator::new(&mut self.grid));
        self.collectibles = Collectibles::empty();
        self.player = PlayerState::new(self.grid.origin());
        self.round = self.round.saturating_add(1);

        info!(
            round = self.round,
            cols = self.config.cols,
            rows = self.config.rows,
            "starting maze"
        );
    }

    /// Starts a new maze after a finished one.
    pub fn replay(&mut self) {
        self.reset();
    }

    /// Starts a new maze with new dimensions.
    ///
    /// Dimensions are kept between [`MIN_DIMENSION`] and [`MAX_DIMENSION`]. Generation always restarts, even when
    /// the dimensions do not change.
    pub fn on_resize_grid(&mut self, cols: usize, rows: usize) {
        let resized = clamp(SessionConfig {
            cols,
            rows,
            ..self.config
        });
        if resized.cols != cols || resized.rows != rows {
            warn!(cols, rows, "grid size out of range, using {}x{}", resized.cols, resized.rows);
        }

        debug!(
            from_cols = self.config.cols,
            from_rows = self.config.rows,
            to_cols = resized.cols,
            to_rows = resized.rows,
            "resizing grid"
        );
        self.config = resized;
        self.reset();
    }

    /// Advances the carving by one step.
    ///
    /// When the carving finishes the collectibles are placed and the generator is dropped. Once the
    /// maze is complete this returns [`Step::Idle`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`MazeGenerator::step`], which the session never triggers since it
    /// always hands the generator its own grid.
    pub fn tick(&mut self) -> Result<Step, CarveError> {
        let Some(generator) = self.generator.as_mut() else {
            return Ok(Step::Idle);
        };

        let step = generator.step(&mut self.grid, &mut self.rng)?;
        if step == Step::Finished {
            let carved = generator.carved();
            self.generator = None;
            self.place_collectibles();
            info!(
                carved,
                collectibles = self.collectibles.placed(),
                "maze complete"
            );
        }

        Ok(step)
    }

    /// Places the collectibles on the completed maze.
    fn place_collectibles(&mut self) {
        let exclude = [self.grid.origin(), self.grid.exit()];
        self.collectibles = Collectibles::generate(
            &self.grid,
            self.config.collectibles,
            &exclude,
            self.config.placement_attempts,
            &mut self.rng,
        );

        if self.collectibles.placed() < self.config.collectibles {
            warn!(
                requested = self.config.collectibles,
                placed = self.collectibles.placed(),
                "not enough open junctions for every collectible"
            );
        }
    }

    /// Routes a movement input to the player.
    ///
    /// Returns `None` when the input is ignored because the maze is still being carved or the
    /// player already won.
    pub fn on_directional_input(
        &mut self,
        direction: Direction,
        now: Instant,
    ) -> Option<MoveOutcome> {
        if self.phase() != Phase::Playing {
            return None;
        }

        let outcome =
            self.player
                .attempt_move(direction, &self.grid, &mut self.collectibles, now);

        if outcome.collected {
            info!(
                collected = self.player.collected(),
                remaining = self.collectibles.len(),
                "collectible picked up"
            );
        }
        if let Some(summary) = self.player.summary().filter(|_| outcome.won) {
            info!(
                elapsed_secs = summary.elapsed.as_secs_f64(),
                accuracy = summary.accuracy,
                moves = summary.moves,
                collected = summary.collected,
                "maze solved"
            );
        }

        Some(outcome)
    }

    /// Returns the stage of the session.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.generator.is_some() {
            Phase::Generating
        } else if self.player.has_won() {
            Phase::Won
        } else {
            Phase::Playing
        }
    }

    /// Returns the session parameters.
    #[must_use]
    pub const fn config(&self) -> SessionConfig {
        self.config
    }

    /// Returns the maze grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the generator while the maze is being carved.
    #[must_use]
    pub const fn generator(&self) -> Option<&MazeGenerator> {
        self.generator.as_ref()
    }

    /// Returns the collectibles left in the maze.
    #[must_use]
    pub const fn collectibles(&self) -> &Collectibles {
        &self.collectibles
    }

    /// Returns the player state.
    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Returns how many mazes this session has started.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }
}

/// Keeps the dimensions of a configuration between [`MIN_DIMENSION`] and [`MAX_DIMENSION`].
const fn clamp(config: SessionConfig) -> SessionConfig {
    SessionConfig {
        cols: clamp_dimension(config.cols),
        rows: clamp_dimension(config.rows),
        ..config
    }
}

/// Keeps a single dimension between [`MIN_DIMENSION`] and [`MAX_DIMENSION`].
const fn clamp_dimension(cells: usize) -> usize {
    if cells < MIN_DIMENSION {
        MIN_DIMENSION
    } else if cells > MAX_DIMENSION {
        MAX_DIMENSION
    } else {
        cells
    }
}
