//! Placement and pickup of the collectibles scattered over a finished maze.

use std::collections::BTreeSet;

use crate::{
    grid::{Grid, Position},
    random::RandomSource,
};

/// Number of collectibles a session asks for unless configured otherwise.
pub const DEFAULT_COLLECTIBLES: usize = 5;

/// Number of coordinate samples spent on placement unless configured otherwise.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 100;

/// Collectibles still lying in the maze.
///
/// Placement only accepts cells without any wall, at a Chebyshev distance greater than one from
/// every other collectible and outside the excluded cells. A perfect maze has few such junctions,
/// so the layout may hold fewer items than requested; callers read [`Collectibles::placed`] rather
/// than assuming the requested count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collectibles {
    /// Coordinates not picked up yet.
    remaining: BTreeSet<Position>,
    /// Number of collectibles initially placed.
    placed: usize,
}

impl Collectibles {
    /// Layout with nothing to collect, used while the maze is still being carved.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            remaining: BTreeSet::new(),
            placed: 0,
        }
    }

    /// Samples random coordinates until `count` collectibles are placed or `max_attempts` samples
    /// have been drawn.
    ///
    /// Each sample draws the column first, then the row.
    pub fn generate<R: RandomSource>(
        grid: &Grid,
        count: usize,
        exclude: &[Position],
        max_attempts: usize,
        rng: &mut R,
    ) -> Self {
        let mut accepted: Vec<Position> = Vec::with_capacity(count);
        if grid.cols() == 0 || grid.rows() == 0 {
            return Self::from_positions(accepted);
        }

        for _ in 0..max_attempts {
            if accepted.len() >= count {
                break;
            }

            let x = rng.choose_index(grid.cols());
            let y = rng.choose_index(grid.rows());
            let candidate = Position::new(x, y);

            if Self::accepts(grid, candidate, exclude, &accepted) {
                accepted.push(candidate);
            }
        }

        Self::from_positions(accepted)
    }

    /// Builds a layout from already chosen coordinates.
    #[must_use]
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let remaining: BTreeSet<Position> = positions.into_iter().collect();
        let placed = remaining.len();

        Self { remaining, placed }
    }

    /// Returns whether a coordinate is a legal spot given the collectibles accepted so far.
    fn accepts(
        grid: &Grid,
        candidate: Position,
        exclude: &[Position],
        accepted: &[Position],
    ) -> bool {
        if exclude.contains(&candidate) {
            return false;
        }
        if !grid
            .cell(candidate)
            .is_ok_and(|cell| cell.walls().is_open())
        {
            return false;
        }

        accepted
            .iter()
            .all(|other| other.chebyshev(candidate) > 1)
    }

    /// Removes the collectible lying on `position`, returning whether there was one.
    pub fn take(&mut self, position: Position) -> bool {
        self.remaining.remove(&position)
    }

    /// Iterates over the collectibles not picked up yet, ordered by column, then row.
    pub fn remaining(&self) -> impl Iterator<Item = Position> + '_ {
        self.remaining.iter().copied()
    }

    /// Returns the number of collectibles not picked up yet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Returns whether every collectible has been picked up, or none was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Returns the number of collectibles initially placed.
    #[must_use]
    pub const fn placed(&self) -> usize {
        self.placed
    }
}
