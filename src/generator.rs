//! Randomized depth-first maze carving.
//!
//! The generator is a "recursive backtracker" turned inside out: instead of recursing, it keeps an
//! explicit stack of the cells it came from and advances one [`step`](MazeGenerator::step) at a
//! time, so the caller can animate the carving at whatever pace it likes. Every carve joins a
//! visited cell to an unvisited one, which makes the open passages a spanning tree of the grid.

use tracing::debug;

use crate::{
    error::CarveError,
    grid::{Grid, Position},
    random::RandomSource,
};

/// Shade of the oldest trail entry.
const TRAIL_SHADE_BASE: usize = 40;

/// Lifecycle of a generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "A bare `Status` is ambiguous next to the step results."
)]
pub enum GeneratorStatus {
    /// Cells remain to be visited or the trail remains to be unwound.
    Generating,
    /// Every cell is visited and the trail is empty.
    Done,
}

/// Transition performed by a single [`MazeGenerator::step`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A wall was removed and the generator moved into a new cell.
    Carved {
        /// Cell the passage starts from.
        from: Position,
        /// Newly visited cell.
        to: Position,
    },
    /// The current cell was a dead end and the generator went back along its trail.
    Backtracked {
        /// Cell popped off the trail.
        to: Position,
    },
    /// The maze just became complete.
    Finished,
    /// The maze was already complete; nothing happened.
    Idle,
}

/// Incremental maze generator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "The generator is the main export of this module."
)]
pub struct MazeGenerator {
    /// Cell the generator is standing on.
    current: Position,
    /// Cells to return to, oldest first.
    trail: Vec<Position>,
    /// Number of walls carved so far.
    carved: usize,
    /// Lifecycle state.
    status: GeneratorStatus,
}

impl MazeGenerator {
    /// Starts a generator at the origin of the grid and marks the origin visited.
    ///
    /// An empty grid yields a generator that finishes on its first step.
    pub fn new(grid: &mut Grid) -> Self {
        let current = grid.origin();
        if let Err(err) = grid.mark_visited(current) {
            debug!(%err, "nothing to carve");
        }

        Self {
            current,
            trail: Vec::with_capacity(grid.cells().len()),
            carved: 0,
            status: GeneratorStatus::Generating,
        }
    }

    /// Advances the generation by one transition.
    ///
    /// The unvisited neighbours of the current cell are scanned top, right, bottom, left, and the
    /// random source picks among them. This choice is the only nondeterminism of the algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`CarveError`] only if `grid` is not the grid this generator was started on.
    pub fn step<R: RandomSource>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<Step, CarveError> {
        if self.is_done() {
            return Ok(Step::Idle);
        }

        if grid.contains(self.current) {
            grid.mark_visited(self.current)?;
        }

        let candidates: Vec<Position> = grid
            .neighbors(self.current)
            .filter(|(_, cell)| !cell.visited())
            .map(|(_, cell)| cell.position())
            .collect();

        if let Some(&next) = rng.choose_one(&candidates) {
            let from = self.current;
            grid.mark_visited(next)?;
            self.trail.push(from);
            grid.remove_wall_between(from, next)?;
            self.current = next;
            self.carved += 1;
            return Ok(Step::Carved { from, to: next });
        }

        if let Some(previous) = self.trail.pop() {
            self.current = previous;
            return Ok(Step::Backtracked { to: previous });
        }

        self.status = GeneratorStatus::Done;
        Ok(Step::Finished)
    }

    /// Steps until the maze is complete and returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`MazeGenerator::step`].
    pub fn run_to_completion<R: RandomSource>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<usize, CarveError> {
        let mut steps = 0;
        while !self.is_done() {
            let _ = self.step(grid, rng)?;
            steps += 1;
        }

        Ok(steps)
    }

    /// Returns whether the maze is complete.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.status, GeneratorStatus::Done)
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> GeneratorStatus {
        self.status
    }

    /// Returns the cell the generator is standing on.
    #[must_use]
    pub const fn current(&self) -> Position {
        self.current
    }

    /// Returns the backtracking stack, oldest entry first.
    #[must_use]
    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    /// Returns the cell the generator would backtrack to next.
    #[must_use]
    pub fn peek(&self) -> Option<Position> {
        self.trail.last().copied()
    }

    /// Returns the number of walls carved so far.
    #[must_use]
    pub const fn carved(&self) -> usize {
        self.carved
    }

    /// Returns the red channel used to draw the trail entry at `index`, deeper entries brighter.
    #[must_use]
    pub fn trail_shade(index: usize) -> u8 {
        u8::try_from(TRAIL_SHADE_BASE.saturating_add(index)).unwrap_or(u8::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        direction::Direction,
        grid::Cell,
        random::{
            testing::{FirstChoice, ScriptedChoices},
            SeededRandom,
        },
    };

    /// Shorthand for a position in the expected carve sequences.
    const fn pos(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    /// Collects the carves of a complete generation together with the number of steps it took.
    fn carve_sequence<R: RandomSource>(
        grid: &mut Grid,
        rng: &mut R,
    ) -> (Vec<(Position, Position)>, usize) {
        let mut generator = MazeGenerator::new(grid);
        let mut carves = Vec::new();
        let mut steps = 0;

        while !generator.is_done() {
            if let Step::Carved { from, to } = generator
                .step(grid, rng)
                .expect("generation on its own grid never fails")
            {
                carves.push((from, to));
            }
            steps += 1;
        }

        (carves, steps)
    }

    #[test]
    fn test_first_choice_four_by_four_sequence() {
        let mut grid = Grid::build(4, 4);

        let (carves, steps) = carve_sequence(&mut grid, &mut FirstChoice);

        assert_eq!(
            carves,
            vec![
                (pos(0, 0), pos(1, 0)),
                (pos(1, 0), pos(2, 0)),
                (pos(2, 0), pos(3, 0)),
                (pos(3, 0), pos(3, 1)),
                (pos(3, 1), pos(3, 2)),
                (pos(3, 2), pos(3, 3)),
                (pos(3, 3), pos(2, 3)),
                (pos(2, 3), pos(2, 2)),
                (pos(2, 2), pos(2, 1)),
                (pos(2, 1), pos(1, 1)),
                (pos(1, 1), pos(1, 2)),
                (pos(1, 2), pos(1, 3)),
                (pos(1, 3), pos(0, 3)),
                (pos(0, 3), pos(0, 2)),
                (pos(0, 2), pos(0, 1)),
            ]
        );
        // 15 carves, 15 backtracks and the final transition to done.
        assert_eq!(steps, 31);
        assert!(grid.cells().iter().all(Cell::visited));
    }

    #[test]
    fn test_generated_maze_is_perfect() {
        for seed in 0..16 {
            for (cols, rows) in [(2, 2), (5, 3), (8, 8), (13, 7), (1, 6)] {
                let mut grid = Grid::build(cols, rows);
                let mut rng = SeededRandom::new(Some(seed));
                let mut generator = MazeGenerator::new(&mut grid);

                let steps = generator
                    .run_to_completion(&mut grid, &mut rng)
                    .expect("generation on its own grid never fails");

                let cells = cols * rows;
                assert!(steps <= 2 * cells, "{steps} steps for {cells} cells");
                assert_eq!(generator.carved(), cells - 1);
                assert_eq!(grid.open_edge_count(), cells - 1, "maze has a cycle");
                assert_eq!(
                    grid.reachable_from(grid.origin()),
                    cells,
                    "maze is not connected"
                );
            }
        }
    }

    #[test]
    fn test_walls_stay_consistent_between_neighbors() {
        let mut grid = Grid::build(9, 6);
        let mut generator = MazeGenerator::new(&mut grid);
        let _ = generator
            .run_to_completion(&mut grid, &mut SeededRandom::new(Some(3)))
            .expect("generation on its own grid never fails");

        for cell in grid.cells() {
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(cell.position(), direction) else {
                    assert!(
                        cell.walls().has(direction),
                        "outer wall removed at {}",
                        cell.position()
                    );
                    continue;
                };
                let other = grid.cell(next).expect("neighbor is in bounds");
                assert_eq!(
                    cell.walls().has(direction),
                    other.walls().has(direction.opposite()),
                    "wall mismatch between {} and {next}",
                    cell.position()
                );
            }
        }
    }

    #[test]
    fn test_same_choices_give_same_walls() {
        let script = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let mut first = Grid::build(6, 5);
        let mut second = Grid::build(6, 5);

        let (first_carves, _) =
            carve_sequence(&mut first, &mut ScriptedChoices::new(script.clone()));
        let (second_carves, _) = carve_sequence(&mut second, &mut ScriptedChoices::new(script));

        assert_eq!(first_carves, second_carves);
        assert_eq!(first, second, "replayed choices should give the same walls");
    }

    #[test]
    fn test_step_transitions_and_trail() {
        let mut grid = Grid::build(2, 1);
        let mut rng = FirstChoice;
        let mut generator = MazeGenerator::new(&mut grid);

        assert_eq!(generator.current(), pos(0, 0));
        assert_eq!(generator.status(), GeneratorStatus::Generating);
        assert!(grid.cell(pos(0, 0)).expect("in bounds").visited());

        let step = generator.step(&mut grid, &mut rng).expect("valid grid");
        assert_eq!(
            step,
            Step::Carved {
                from: pos(0, 0),
                to: pos(1, 0)
            }
        );
        assert_eq!(generator.trail(), &[pos(0, 0)]);
        assert_eq!(generator.peek(), Some(pos(0, 0)));

        let step = generator.step(&mut grid, &mut rng).expect("valid grid");
        assert_eq!(step, Step::Backtracked { to: pos(0, 0) });
        assert!(generator.trail().is_empty());

        let step = generator.step(&mut grid, &mut rng).expect("valid grid");
        assert_eq!(step, Step::Finished);
        assert!(generator.is_done());

        let step = generator.step(&mut grid, &mut rng).expect("valid grid");
        assert_eq!(step, Step::Idle);
    }

    #[test]
    fn test_empty_grid_finishes_immediately() {
        let mut grid = Grid::build(0, 0);
        let mut generator = MazeGenerator::new(&mut grid);

        let steps = generator
            .run_to_completion(&mut grid, &mut FirstChoice)
            .expect("empty grid has nothing to carve");

        assert_eq!(steps, 1);
        assert_eq!(generator.carved(), 0);
    }

    #[test]
    fn test_trail_shade_saturates() {
        assert_eq!(MazeGenerator::trail_shade(0), 40);
        assert_eq!(MazeGenerator::trail_shade(10), 50);
        assert_eq!(MazeGenerator::trail_shade(215), 255);
        assert_eq!(MazeGenerator::trail_shade(10_000), 255);
    }
}
