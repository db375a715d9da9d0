use std::collections::VecDeque;

use crate::grid::{GridSize, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Heading every fresh or reset snake starts with.
pub const DEFAULT_DIRECTION: Direction = Direction::Right;

/// Mutable snake state.
///
/// Growth is lazy: `grow` only raises the target `length`, and the next
/// `advance` skips one tail removal to catch the body up.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    length: usize,
    vacated: Vec<Position>,
    reject_reverse: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            length: 1,
            vacated: Vec::new(),
            reject_reverse: true,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            length: segments.len(),
            body: VecDeque::from(segments),
            direction,
            vacated: Vec::new(),
            reject_reverse: true,
        }
    }

    /// Controls whether `turn` ignores requests to reverse direction.
    #[must_use]
    pub fn with_reverse_rejection(mut self, reject: bool) -> Self {
        self.reject_reverse = reject;
        self
    }

    /// Changes the heading. Returns `false`, leaving the heading untouched,
    /// when `direction` is the reverse of the current one.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.reject_reverse && !direction_change_is_valid(self.direction, direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Moves the head one cell and trims the tail unless growth is pending.
    ///
    /// Returns the vacated tail cell, if any. Cells vacated by an earlier
    /// step are forgotten.
    pub fn advance(&mut self, bounds: GridSize) -> Option<Position> {
        debug_assert!(bounds.width > 0 && bounds.height > 0);
        debug_assert!(!self.is_empty());

        let next_head = self.head().step(self.direction, bounds);
        self.body.push_front(next_head);

        self.vacated.clear();
        let tail = if self.body.len() > self.length {
            self.body.pop_back()
        } else {
            None
        };
        self.vacated.extend(tail);
        tail
    }

    /// Raises the target length by one; realised on the next `advance`.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Drops the tail segment right away. A one-cell snake is left as is.
    pub fn shrink_by_one(&mut self) {
        if self.length <= 1 || self.body.len() <= 1 {
            return;
        }
        self.length -= 1;
        self.vacated.extend(self.body.pop_back());
    }

    /// Returns the snake to a single segment at `start` heading right.
    pub fn reset(&mut self, start: Position) {
        self.vacated.extend(self.body.drain(..));
        self.body.push_front(start);
        self.length = 1;
        self.direction = DEFAULT_DIRECTION;
    }

    /// Returns true when the head sits on a segment at index `threshold` or
    /// later and the snake is longer than `threshold`.
    ///
    /// Segments closer to the head are skipped since a short snake can touch
    /// them while turning.
    #[must_use]
    pub fn collides_with_self(&self, threshold: usize) -> bool {
        if self.length <= threshold {
            return false;
        }
        let head = self.head();
        self.body.iter().skip(threshold).any(|segment| *segment == head)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Target body length.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Cells freed since the last `advance`, including that move's tail.
    #[must_use]
    pub fn vacated(&self) -> &[Position] {
        &self.vacated
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;

    use super::Snake;

    const BOUNDS: GridSize = GridSize {
        width: 40,
        height: 20,
    };

    fn line(len: i32) -> Snake {
        Snake::from_segments(
            (0..len).map(|i| Position::new(10 - i, 5)).collect(),
            Direction::Right,
        )
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        let vacated = snake.advance(BOUNDS);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(vacated, Some(Position { x: 5, y: 5 }));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_skips_exactly_one_tail_removal() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.grow();
        assert_eq!(snake.length(), 2);
        assert_eq!(snake.len(), 1);

        assert_eq!(snake.advance(BOUNDS), None);
        assert_eq!(snake.len(), 2);

        assert_eq!(snake.advance(BOUNDS), Some(Position { x: 5, y: 5 }));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn body_len_matches_length_after_every_advance() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        let turns = [
            Direction::Down,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];

        for (step, turn) in turns.iter().cycle().take(40).enumerate() {
            if step % 3 == 0 {
                snake.grow();
            }
            snake.turn(*turn);
            snake.advance(BOUNDS);
            assert_eq!(snake.len(), snake.length());
        }
    }

    #[test]
    fn reverse_turn_is_rejected() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up);

        assert!(!snake.turn(Direction::Down));
        assert!(!snake.turn(Direction::Down));
        assert_eq!(snake.direction(), Direction::Up);

        snake.advance(BOUNDS);
        assert_eq!(snake.head(), Position { x: 5, y: 4 });
    }

    #[test]
    fn reverse_turn_allowed_when_rejection_disabled() {
        let mut snake =
            Snake::new(Position { x: 5, y: 5 }, Direction::Up).with_reverse_rejection(false);

        assert!(snake.turn(Direction::Down));
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn shrink_removes_tail_immediately() {
        let mut snake = line(3);

        snake.shrink_by_one();

        assert_eq!(snake.length(), 2);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.vacated(), &[Position::new(8, 5)]);
    }

    #[test]
    fn shrink_never_drops_below_one() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.shrink_by_one();

        assert_eq!(snake.length(), 1);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut snake = line(6);
        snake.turn(Direction::Up);

        snake.reset(Position::new(20, 10));

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head(), Position::new(20, 10));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(
            snake.vacated(),
            (0..6).map(|i| Position::new(10 - i, 5)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn shrink_after_advance_reports_both_tails() {
        let mut snake = line(3);

        snake.advance(BOUNDS);
        snake.shrink_by_one();

        assert_eq!(
            snake.vacated(),
            &[Position::new(8, 5), Position::new(9, 5)]
        );

        snake.advance(BOUNDS);
        assert_eq!(snake.vacated(), &[Position::new(10, 5)]);
    }

    #[test]
    fn self_collision_ignores_first_segments_behind_head() {
        // Head overlapping index 3 of a length-5 body.
        let snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::Up,
        );
        assert!(!snake.collides_with_self(4));

        let snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(2, 3),
                Position::new(2, 2),
            ],
            Direction::Up,
        );
        assert!(snake.collides_with_self(4));
    }

    #[test]
    fn self_collision_needs_length_above_threshold() {
        let snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(2, 2),
            ],
            Direction::Up,
        );

        assert!(!snake.collides_with_self(4));
        assert!(snake.collides_with_self(3));
    }
}
