use rand::Rng;

use crate::grid::{GridSize, Position};
use crate::occupancy::Occupied;

/// What eating a food item does to the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FoodKind {
    /// Grows the snake by one segment.
    Good,
    /// Shrinks the snake by one segment, or resets a one-cell snake.
    Bad,
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    #[must_use]
    pub fn good(position: Position) -> Self {
        Self::new(position, FoodKind::Good)
    }

    #[must_use]
    pub fn bad(position: Position) -> Self {
        Self::new(position, FoodKind::Bad)
    }

    /// Spawns food of `kind` on a cell outside `forbidden`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        kind: FoodKind,
        bounds: GridSize,
        forbidden: &Occupied,
    ) -> Self {
        Self::new(spawn_position(rng, bounds, forbidden), kind)
    }

    /// Moves this food to a fresh cell outside `forbidden`.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: GridSize, forbidden: &Occupied) {
        self.position = spawn_position(rng, bounds, forbidden);
    }
}

/// Samples cells in `[1, width - 1] × [1, height - 1]` until one is not
/// forbidden.
///
/// Never returns if every cell in that range is forbidden; callers size the
/// grid so that cannot happen.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    forbidden: &Occupied,
) -> Position {
    let max_x = i32::from(bounds.width);
    let max_y = i32::from(bounds.height);
    debug_assert!(
        forbidden.count_where(|cell| cell.x >= 1 && cell.x < max_x && cell.y >= 1 && cell.y < max_y)
            < bounds.playable_cells(),
        "spawn_position: no free cells on the board ({}×{})",
        bounds.width,
        bounds.height,
    );

    loop {
        let candidate = Position {
            x: rng.gen_range(1..max_x),
            y: rng.gen_range(1..max_y),
        };
        if forbidden.is_free(candidate) {
            return candidate;
        }
    }
}
