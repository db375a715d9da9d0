use serde::Serialize;

use crate::grid::{GridSize, Position};

/// What occupies a rendered cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum CellTag {
    Head,
    Body,
    GoodFood,
    BadFood,
}

/// A cell the renderer should paint.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TaggedCell {
    pub position: Position,
    pub tag: CellTag,
}

/// Owned, read-only view of the engine after a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub bounds: GridSize,
    /// Head first, then body from front to tail, then good and bad food.
    pub cells: Vec<TaggedCell>,
    /// Cells freed this tick, for erase-on-render. A reset lists the whole
    /// old body.
    pub vacated: Vec<Position>,
    pub good_food: Position,
    pub bad_food: Position,
    pub speed: u32,
    pub length: usize,
    pub max_length: usize,
}

impl Snapshot {
    /// Snake cells in body order, head first.
    pub fn snake(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|cell| matches!(cell.tag, CellTag::Head | CellTag::Body))
            .map(|cell| cell.position)
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.cells
            .iter()
            .find(|cell| cell.tag == CellTag::Head)
            .map(|cell| cell.position)
    }

    /// Serializes the snapshot as a single JSON line for logs.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Caption line shown above the board.
    #[must_use]
    pub fn caption(&self) -> String {
        format!(
            "Snake. Esc - quit. Q/A - speed. Speed: {}. Max length: {}",
            self.speed, self.max_length
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::{GridSize, Position};

    use super::{CellTag, Snapshot, TaggedCell};

    fn sample() -> Snapshot {
        Snapshot {
            bounds: GridSize {
                width: 8,
                height: 6,
            },
            cells: vec![
                TaggedCell {
                    position: Position::new(3, 3),
                    tag: CellTag::Head,
                },
                TaggedCell {
                    position: Position::new(2, 3),
                    tag: CellTag::Body,
                },
                TaggedCell {
                    position: Position::new(5, 1),
                    tag: CellTag::GoodFood,
                },
                TaggedCell {
                    position: Position::new(6, 2),
                    tag: CellTag::BadFood,
                },
            ],
            vacated: vec![Position::new(1, 3)],
            good_food: Position::new(5, 1),
            bad_food: Position::new(6, 2),
            speed: 15,
            length: 2,
            max_length: 7,
        }
    }

    #[test]
    fn snake_cells_exclude_food() {
        let snapshot = sample();

        assert_eq!(snapshot.head(), Some(Position::new(3, 3)));
        assert_eq!(snapshot.snake().count(), 2);
    }

    #[test]
    fn caption_reports_speed_and_record() {
        assert_eq!(
            sample().caption(),
            "Snake. Esc - quit. Q/A - speed. Speed: 15. Max length: 7"
        );
    }

    #[test]
    fn json_names_tags_and_vacated_cell() {
        let json = sample().to_json().expect("snapshot should serialize");

        assert!(json.contains(r#""tag":"GoodFood""#));
        assert!(json.contains(r#""vacated":[{"x":1,"y":3}]"#));
        assert!(json.contains(r#""max_length":7"#));
    }
}
