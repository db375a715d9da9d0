use std::collections::HashSet;

use crate::grid::Position;
use crate::snake::Snake;

/// Returns true iff `cell` is not a member of `excluded`.
#[must_use]
pub fn is_free(cell: Position, excluded: &HashSet<Position>) -> bool {
    !excluded.contains(&cell)
}

/// Set of cells a new item must not be placed on.
#[derive(Debug, Clone, Default)]
pub struct Occupied {
    cells: HashSet<Position>,
}

impl Occupied {
    /// Collects every snake segment plus the given extra item cells.
    #[must_use]
    pub fn from_snake(snake: &Snake, items: &[Position]) -> Self {
        let mut cells: HashSet<Position> = snake.segments().copied().collect();
        cells.extend(items.iter().copied());
        Self { cells }
    }

    #[must_use]
    pub fn from_cells<I: IntoIterator<Item = Position>>(cells: I) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_free(&self, cell: Position) -> bool {
        is_free(cell, &self.cells)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of excluded cells that fall inside the food placement area.
    #[must_use]
    pub fn count_where<F: Fn(Position) -> bool>(&self, predicate: F) -> usize {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{is_free, Occupied};

    #[test]
    fn cell_outside_excluded_set_is_free() {
        let excluded: HashSet<Position> = [Position::new(1, 1), Position::new(2, 1)].into();

        assert!(is_free(Position::new(3, 1), &excluded));
        assert!(!is_free(Position::new(2, 1), &excluded));
        assert!(is_free(Position::new(0, 0), &HashSet::new()));
    }

    #[test]
    fn occupied_covers_snake_body_and_items() {
        let snake = Snake::from_segments(
            vec![
                Position::new(4, 4),
                Position::new(3, 4),
                Position::new(2, 4),
            ],
            Direction::Right,
        );
        let occupied = Occupied::from_snake(&snake, &[Position::new(9, 9)]);

        assert_eq!(occupied.len(), 4);
        assert!(!occupied.is_free(Position::new(2, 4)));
        assert!(!occupied.is_free(Position::new(9, 9)));
        assert!(occupied.is_free(Position::new(5, 4)));
    }
}
