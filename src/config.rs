use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::grid::GridSize;

/// Default grid width: a 640 pixel screen split into 20 pixel cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default grid height: a 480 pixel screen split into 20 pixel cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 24;

/// Slowest allowed pace in ticks per second.
pub const DEFAULT_MIN_SPEED: u32 = 5;

/// Fastest allowed pace in ticks per second.
pub const DEFAULT_MAX_SPEED: u32 = 50;

/// Pace a new session starts at.
pub const DEFAULT_INITIAL_SPEED: u32 = 5;

/// Ticks per second added or removed per speed request.
pub const DEFAULT_SPEED_STEP: u32 = 5;

/// Segments directly behind the head that never count as a self-collision.
pub const DEFAULT_SELF_COLLISION_THRESHOLD: usize = 4;

/// Cells required beyond the snake's start cell: one per food item.
const FOOD_ITEMS: usize = 2;

/// Problems found while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small for the snake and both food items")]
    GridTooSmall { width: u16, height: u16 },
    #[error("minimum speed must be non-zero")]
    ZeroMinSpeed,
    #[error("minimum speed {min} exceeds maximum speed {max}")]
    SpeedRangeInverted { min: u32, max: u32 },
    #[error("initial speed {speed} is outside {min}..={max}")]
    InitialSpeedOutOfRange { speed: u32, min: u32, max: u32 },
    #[error("speed step must be non-zero")]
    ZeroSpeedStep,
    #[error("self-collision threshold must be non-zero")]
    ZeroCollisionThreshold,
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub min_speed: u32,
    pub max_speed: u32,
    pub initial_speed: u32,
    pub speed_step: u32,
    pub self_collision_threshold: usize,
    pub reject_reverse_turns: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            initial_speed: DEFAULT_INITIAL_SPEED,
            speed_step: DEFAULT_SPEED_STEP,
            self_collision_threshold: DEFAULT_SELF_COLLISION_THRESHOLD,
            reject_reverse_turns: true,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Checks the invariants the engine relies on.
    ///
    /// Food is only placed away from row and column 0, so the grid must leave
    /// room there for both food items next to a one-cell snake.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width < 2 || height < 2 || self.grid.playable_cells() < 1 + FOOD_ITEMS {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if self.min_speed == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        if self.min_speed > self.max_speed {
            return Err(ConfigError::SpeedRangeInverted {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if !(self.min_speed..=self.max_speed).contains(&self.initial_speed) {
            return Err(ConfigError::InitialSpeedOutOfRange {
                speed: self.initial_speed,
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.speed_step == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }
        if self.self_collision_threshold == 0 {
            return Err(ConfigError::ZeroCollisionThreshold);
        }
        Ok(())
    }
}

/// Colors used by the terminal renderer.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub good_food: Color,
    pub bad_food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub caption: Color,
    pub overlay_title: Color,
}

/// Green snake, red apple, brown potato on a grey field.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::Rgb(0, 255, 0),
    snake_body: Color::Rgb(0, 200, 0),
    good_food: Color::Rgb(255, 0, 0),
    bad_food: Color::Rgb(117, 78, 27),
    play_bg: Color::Rgb(125, 125, 125),
    border_fg: Color::Rgb(93, 216, 228),
    caption: Color::White,
    overlay_title: Color::Green,
};

/// Glyph for one snake segment or food item (two columns per cell).
pub const GLYPH_CELL: &str = "██";

/// Polling interval of the host loop in milliseconds.
pub const FRAME_POLL_MS: u64 = 16;
