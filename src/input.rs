use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector in grid coordinates (y grows downwards).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Faster,
    Slower,
    Pause,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a single key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => GameInput::Direction(Direction::Right),
        KeyCode::Char('q' | 'Q') => GameInput::Faster,
        KeyCode::Char('a' | 'A') => GameInput::Slower,
        KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Polls the terminal for keyboard input.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Waits up to the poll timeout and returns the next mapped input, if any.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}
