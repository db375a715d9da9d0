use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the number of cells food may be placed on.
    ///
    /// Row 0 and column 0 never receive food.
    #[must_use]
    pub fn playable_cells(self) -> usize {
        usize::from(self.width.saturating_sub(1)) * usize::from(self.height.saturating_sub(1))
    }

    /// Returns the cell a fresh snake starts on.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }
}

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves one cell in `direction`, reappearing on the opposite edge when
    /// the step leaves the grid.
    #[must_use]
    pub fn step(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    debug_assert!(upper_bound > 0);
    value.rem_euclid(upper_bound)
}
