//! Player position, move statistics and the win condition.
//!
//! Time is passed in by the caller as an [`Instant`], which keeps the movement model free of any
//! clock and lets tests drive it with made-up timestamps.

use std::time::{Duration, Instant};

use crate::{
    collectibles::Collectibles,
    direction::Direction,
    grid::{Grid, Position},
};

/// Frozen statistics of a finished run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Time between the first movement input and reaching the exit.
    pub elapsed: Duration,
    /// Percentage of movement inputs that actually moved the player.
    pub accuracy: f64,
    /// Number of successful moves.
    pub moves: u32,
    /// Number of collectibles picked up.
    pub collected: u32,
}

/// Result of a single movement attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The player changed cell.
    pub moved: bool,
    /// A collectible was picked up on the new cell.
    pub collected: bool,
    /// The player reached the exit with this move.
    pub won: bool,
}

/// State of the player within one session.
#[derive(Clone, Debug, PartialEq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "The state is the main export of this module."
)]
pub struct PlayerState {
    /// Cell the player stands on.
    position: Position,
    /// Movement inputs that moved the player.
    valid_moves: u32,
    /// Every movement input, including blocked ones.
    total_moves: u32,
    /// Time of the first movement input since the last reset.
    started_at: Option<Instant>,
    /// Collectibles picked up so far.
    collected: u32,
    /// Statistics frozen when the exit was reached.
    summary: Option<Summary>,
}

impl PlayerState {
    /// Places a fresh player on `start`.
    #[must_use]
    pub const fn new(start: Position) -> Self {
        Self {
            position: start,
            valid_moves: 0,
            total_moves: 0,
            started_at: None,
            collected: 0,
            summary: None,
        }
    }

    /// Tries to move one cell in `direction`.
    ///
    /// Every attempt counts towards the accuracy denominator, whether it crosses a wall or not, and
    /// the first attempt starts the clock. Once the exit has been reached the state is frozen and
    /// attempts are ignored.
    pub fn attempt_move(
        &mut self,
        direction: Direction,
        grid: &Grid,
        collectibles: &mut Collectibles,
        now: Instant,
    ) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        if self.has_won() {
            return outcome;
        }

        let started_at = *self.started_at.get_or_insert(now);
        self.total_moves = self.total_moves.saturating_add(1);

        if grid.is_passable(self.position, direction) {
            if let Some(next) = grid.neighbor(self.position, direction) {
                self.position = next;
                self.valid_moves = self.valid_moves.saturating_add(1);
                outcome.moved = true;
            }
        }

        if outcome.moved && collectibles.take(self.position) {
            self.collected = self.collected.saturating_add(1);
            outcome.collected = true;
        }

        if self.position == grid.exit() {
            self.summary = Some(Summary {
                elapsed: now.saturating_duration_since(started_at),
                accuracy: self.accuracy(),
                moves: self.valid_moves,
                collected: self.collected,
            });
            outcome.won = true;
        }

        outcome
    }

    /// Returns the cell the player stands on.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the number of movement inputs that moved the player.
    #[must_use]
    pub const fn valid_moves(&self) -> u32 {
        self.valid_moves
    }

    /// Returns the number of movement inputs, blocked ones included.
    #[must_use]
    pub const fn total_moves(&self) -> u32 {
        self.total_moves
    }

    /// Returns the move counter shown to the player, which counts successful moves only.
    #[must_use]
    pub const fn move_count(&self) -> u32 {
        self.valid_moves
    }

    /// Returns the number of collectibles picked up.
    #[must_use]
    pub const fn collected(&self) -> u32 {
        self.collected
    }

    /// Returns whether the clock has started.
    #[must_use]
    pub const fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns whether the exit has been reached.
    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.summary.is_some()
    }

    /// Returns the statistics frozen when the exit was reached.
    #[must_use]
    pub const fn summary(&self) -> Option<Summary> {
        self.summary
    }

    /// Returns the percentage of movement inputs that moved the player.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        accuracy(self.valid_moves, self.total_moves)
    }

    /// Returns the time spent so far, frozen once the exit is reached and zero before the first
    /// input.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        if let Some(summary) = self.summary {
            return summary.elapsed;
        }

        self.started_at
            .map_or(Duration::ZERO, |started_at| now.saturating_duration_since(started_at))
    }
}

/// Ratio of valid moves to attempts as a percentage; a player who has not tried yet is perfect.
#[must_use]
pub fn accuracy(valid: u32, total: u32) -> f64 {
    if total == 0 {
        return 100.0;
    }

    f64::from(valid) / f64::from(total) * 100.0
}
