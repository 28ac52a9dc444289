//! Error types raised by the maze core.
//!
//! The core has no unrecoverable failure mode. These errors only signal misuse of the grid API by a
//! caller, such as asking for a cell outside the grid or carving between cells that do not touch.

use thiserror::Error;

use crate::grid::Position;

/// Coordinate lookup outside of the grid.
///
/// This error is returned by the bounds-checked accessors of [`Grid`](crate::grid::Grid) when the
/// requested coordinate does not fall within `[0, cols) x [0, rows)`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("cell ({x}, {y}) is outside of the {cols}x{rows} grid")]
#[expect(
    clippy::module_name_repetitions,
    reason = "Error types read best with their suffix."
)]
pub struct BoundsError {
    /// Requested column.
    pub x: usize,
    /// Requested row.
    pub y: usize,
    /// Number of columns of the grid that was queried.
    pub cols: usize,
    /// Number of rows of the grid that was queried.
    pub rows: usize,
}

/// Failure to remove the wall between two cells.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "Error types read best with their suffix."
)]
pub enum CarveError {
    /// One of the two cells lies outside of the grid.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    /// The two cells do not share an edge.
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent {
        /// Cell the carve started from.
        from: Position,
        /// Cell the carve was aimed at.
        to: Position,
    },
}
