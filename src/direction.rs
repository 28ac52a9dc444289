//! Cardinal directions used both for carving walls and for moving the player.

use std::fmt;

use serde::Serialize;

use crate::grid::Position;

/// One of the four sides of a cell.
///
/// The declaration order is the priority order in which the generator scans neighbours: top, right,
/// bottom, left. Rows grow downwards, so [`Direction::Top`] decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards row `y - 1`.
    Top,
    /// Towards column `x + 1`.
    Right,
    /// Towards row `y + 1`.
    Bottom,
    /// Towards column `x - 1`.
    Left,
}

impl Direction {
    /// All directions in neighbour scan order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Returns the side facing this one on the neighbouring cell.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns the unit vector `(dx, dy)` of the direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Top => (0, -1),
            Self::Right => (1, 0),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Applies the unit vector to a position.
    ///
    /// Returns `None` when the result would have a negative coordinate. The upper bound is left to
    /// the grid, which knows its dimensions.
    #[must_use]
    pub const fn step_from(self, from: Position) -> Option<Position> {
        let (dx, dy) = self.offset();
        let Some(x) = from.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = from.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Position::new(x, y))
    }

    /// Finds the direction leading from `from` to an adjacent `to`.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.step_from(from) == Some(to))
    }

    /// Returns the lowercase name used in wall snapshots and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    #[expect(
        clippy::renamed_function_params,
        reason = "Single-character identifiers are denied crate-wide."
    )]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
