//! Grid of maze cells and their walls.
//!
//! The grid owns every cell of the maze. Cells are stored in row-major order and indexed by
//! `x + y * cols`. The only mutations are marking a cell visited and carving the wall shared by two
//! adjacent cells, which always clears the flag on both sides so neighbouring cells never disagree
//! about a wall.

use std::{collections::VecDeque, fmt};

use serde::Serialize;

use crate::{
    direction::Direction,
    error::{BoundsError, CarveError},
};

/// Cell coordinate within a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// Column, growing to the right.
    pub x: usize,
    /// Row, growing downwards.
    pub y: usize,
}

impl Position {
    /// Builds a position from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the Chebyshev (king move) distance between two positions.
    #[must_use]
    pub const fn chebyshev(self, other: Self) -> usize {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy {
            dx
        } else {
            dy
        }
    }
}

impl fmt::Display for Position {
    #[expect(
        clippy::renamed_function_params,
        reason = "Single-character identifiers are denied crate-wide."
    )]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// Wall flags of a single cell, `true` meaning the wall is present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "One flag per side is the shape of the wall snapshot records."
)]
pub struct Walls {
    /// Wall towards the row above.
    pub top: bool,
    /// Wall towards the next column.
    pub right: bool,
    /// Wall towards the row below.
    pub bottom: bool,
    /// Wall towards the previous column.
    pub left: bool,
}

impl Walls {
    /// All four walls present.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    /// Returns whether the wall on the given side is present.
    #[must_use]
    pub const fn has(self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    /// Removes the wall on the given side.
    pub const fn open(&mut self, direction: Direction) {
        match direction {
            Direction::Top => self.top = false,
            Direction::Right => self.right = false,
            Direction::Bottom => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }

    /// Returns whether no wall is present at all, making the cell a four-way junction.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !(self.top || self.right || self.bottom || self.left)
    }
}

/// Single maze cell.
///
/// Serializes as `{"x": .., "y": .., "walls": {"top": .., "right": .., "bottom": .., "left": ..}}`;
/// the visited flag only matters during generation and is left out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Coordinate of the cell.
    #[serde(flatten)]
    position: Position,
    /// Wall flags of the cell.
    walls: Walls,
    /// Generation marker.
    #[serde(skip)]
    visited: bool,
}

impl Cell {
    /// Builds a fully walled, unvisited cell.
    const fn new(position: Position) -> Self {
        Self {
            position,
            walls: Walls::closed(),
            visited: false,
        }
    }

    /// Returns the coordinate of the cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the wall flags of the cell.
    #[must_use]
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Returns whether the generator has already reached the cell.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }
}

/// Rectangular maze grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    cols: usize,
    /// Number of rows.
    rows: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid with every wall present and no cell visited.
    #[must_use]
    pub fn build(cols: usize, rows: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Cell::new(Position::new(x, y))))
            .collect();

        Self { cols, rows, cells }
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the top-left cell coordinate, where generation and the player start.
    #[must_use]
    pub const fn origin(&self) -> Position {
        Position::new(0, 0)
    }

    /// Returns the bottom-right cell coordinate, which the player must reach.
    #[must_use]
    pub const fn exit(&self) -> Position {
        Position::new(self.cols.saturating_sub(1), self.rows.saturating_sub(1))
    }

    /// Returns whether the coordinate lies within the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.cols && position.y < self.rows
    }

    /// Maps an in-bounds coordinate to its index in the cell storage.
    const fn index_of(&self, position: Position) -> Result<usize, BoundsError> {
        if self.contains(position) {
            Ok(position.x + position.y * self.cols)
        } else {
            Err(BoundsError {
                x: position.x,
                y: position.y,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    /// Returns the cell at the given coordinate.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] when `(x, y)` lies outside of the grid.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell, BoundsError> {
        self.cell(Position::new(x, y))
    }

    /// Returns the cell at the given position.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] when the position lies outside of the grid.
    pub fn cell(&self, position: Position) -> Result<&Cell, BoundsError> {
        let index = self.index_of(position)?;
        self.cells.get(index).ok_or(BoundsError {
            x: position.x,
            y: position.y,
            cols: self.cols,
            rows: self.rows,
        })
    }

    /// Mutable counterpart of [`Grid::cell`].
    fn cell_mut(&mut self, position: Position) -> Result<&mut Cell, BoundsError> {
        let index = self.index_of(position)?;
        let (cols, rows) = (self.cols, self.rows);
        self.cells.get_mut(index).ok_or(BoundsError {
            x: position.x,
            y: position.y,
            cols,
            rows,
        })
    }

    /// Returns the in-bounds neighbour of a position in the given direction.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        direction
            .step_from(position)
            .filter(|next| self.contains(*next))
    }

    /// Returns the in-bounds neighbours of a position, tagged with the direction leading to them.
    ///
    /// Neighbours come in scan order: top, right, bottom, left.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, &Cell)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let next = self.neighbor(position, direction)?;
            self.cell(next).ok().map(|cell| (direction, cell))
        })
    }

    /// Marks a cell as reached by the generator. Marking twice has no further effect.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] when the position lies outside of the grid.
    pub(crate) fn mark_visited(&mut self, position: Position) -> Result<(), BoundsError> {
        self.cell_mut(position)?.visited = true;
        Ok(())
    }

    /// Removes the wall shared by two adjacent cells, on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`CarveError::Bounds`] when either cell lies outside of the grid, and
    /// [`CarveError::NotAdjacent`] when the cells do not share an edge.
    pub fn remove_wall_between(&mut self, from: Position, to: Position) -> Result<(), CarveError> {
        let _ = self.index_of(from)?;
        let _ = self.index_of(to)?;
        let direction =
            Direction::between(from, to).ok_or(CarveError::NotAdjacent { from, to })?;

        self.cell_mut(from)?.walls.open(direction);
        self.cell_mut(to)?.walls.open(direction.opposite());

        Ok(())
    }

    /// Returns whether a move from `from` in `direction` crosses no wall and stays in the grid.
    #[must_use]
    pub fn is_passable(&self, from: Position, direction: Direction) -> bool {
        self.cell(from)
            .is_ok_and(|cell| !cell.walls.has(direction))
            && self.neighbor(from, direction).is_some()
    }

    /// Counts the passages of the maze, each shared edge counted once.
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter(|direction| self.is_passable(cell.position, *direction))
                    .count()
            })
            .sum()
    }

    /// Counts the cells reachable from `start` through open passages, `start` included.
    #[must_use]
    pub fn reachable_from(&self, start: Position) -> usize {
        if !self.contains(start) {
            return 0;
        }

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([start]);
        if let Some(flag) = self.index_of(start).ok().and_then(|index| seen.get_mut(index)) {
            *flag = true;
        }

        let mut count = 0;
        while let Some(position) = queue.pop_front() {
            count += 1;
            for direction in Direction::ALL {
                if !self.is_passable(position, direction) {
                    continue;
                }
                let Some(next) = self.neighbor(position, direction) else {
                    continue;
                };
                let Some(flag) = self.index_of(next).ok().and_then(|index| seen.get_mut(index))
                else {
                    continue;
                };
                if !*flag {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }
}

#[cfg(test)]
impl Grid {
    /// Finds the directions leading from the origin to the exit of a perfect maze.
    pub(crate) fn solution(&self) -> Vec<Direction> {
        let mut path = Vec::new();
        if !self.walk_to_exit(self.origin(), None, &mut path) {
            path.clear();
        }
        path
    }

    /// Depth-first walk that never steps back through the cell it came from.
    fn walk_to_exit(
        &self,
        at: Position,
        came_from: Option<Direction>,
        path: &mut Vec<Direction>,
    ) -> bool {
        if at == self.exit() {
            return true;
        }
        for direction in Direction::ALL {
            if Some(direction) == came_from || !self.is_passable(at, direction) {
                continue;
            }
            let Some(next) = self.neighbor(at, direction) else {
                continue;
            };
            path.push(direction);
            if self.walk_to_exit(next, Some(direction.opposite()), path) {
                return true;
            }
            let _ = path.pop();
        }
        false
    }
}
