use std::collections::VecDeque;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::food::{Food, FoodKind};
use crate::grid::GridSize;
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::occupancy::Occupied;
use crate::snake::{DEFAULT_DIRECTION, Snake};
use crate::snapshot::{CellTag, Snapshot, TaggedCell};

/// Turns that can wait for upcoming ticks; one is applied per tick.
const TURN_QUEUE_DEPTH: usize = 2;

/// What a tick resolved to. At most one event fires per tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved without touching anything.
    Moved,
    /// Good food eaten; the snake will be one segment longer after the next move.
    AteGoodFood,
    /// The head ran into the body and the snake was reset.
    SelfCollision,
    /// Bad food eaten by a snake longer than one; it lost its tail.
    AteBadFood,
    /// Bad food eaten by a one-cell snake, which was reset.
    PoisonedReset,
}

/// Complete mutable game state for one session.
///
/// Death never ends the session: the snake is reset in place while the speed
/// setting and the max-length record carry over.
#[derive(Debug, Clone)]
pub struct GameEngine {
    pub snake: Snake,
    pub good_food: Food,
    pub bad_food: Food,
    config: EngineConfig,
    speed: u32,
    max_length: usize,
    tick_count: u64,
    pending_turns: VecDeque<Direction>,
    rng: StdRng,
}

impl GameEngine {
    /// Starts a session seeded from system entropy.
    pub fn new_session(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Starts a deterministic session for tests and reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = config.grid;
        let snake = Snake::new(bounds.center(), DEFAULT_DIRECTION)
            .with_reverse_rejection(config.reject_reverse_turns);
        let good_food = Food::spawn(
            &mut rng,
            FoodKind::Good,
            bounds,
            &Occupied::from_snake(&snake, &[]),
        );
        let bad_food = Food::spawn(
            &mut rng,
            FoodKind::Bad,
            bounds,
            &Occupied::from_snake(&snake, &[good_food.position]),
        );

        debug!(
            width = bounds.width,
            height = bounds.height,
            good = ?good_food.position,
            bad = ?bad_food.position,
            "session started"
        );

        Ok(Self {
            snake,
            good_food,
            bad_food,
            speed: config.initial_speed,
            max_length: 1,
            tick_count: 0,
            pending_turns: VecDeque::with_capacity(TURN_QUEUE_DEPTH),
            config,
            rng,
        })
    }

    /// Queues a heading change, one per upcoming tick.
    ///
    /// Each request is checked against the heading the queue will have
    /// reached by then, so a quick Up-then-Left from Right turns twice. Once
    /// the queue is full the newest request replaces the last slot.
    pub fn turn(&mut self, direction: Direction) -> bool {
        let slot = self.pending_turns.len().min(TURN_QUEUE_DEPTH - 1);
        let heading = match slot.checked_sub(1) {
            Some(previous) => self.pending_turns[previous],
            None => self.snake.direction(),
        };
        if self.config.reject_reverse_turns && !direction_change_is_valid(heading, direction) {
            trace!(?direction, ?heading, "reverse turn ignored");
            return false;
        }

        self.pending_turns.truncate(slot);
        self.pending_turns.push_back(direction);
        true
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                self.turn(direction);
            }
            GameInput::Faster => self.increase_speed(),
            GameInput::Slower => self.decrease_speed(),
            GameInput::Pause | GameInput::Quit => {}
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(direction) = self.pending_turns.pop_front() {
            if !self.snake.turn(direction) {
                trace!(?direction, current = ?self.snake.direction(), "reverse turn ignored");
            }
        }

        self.tick_count += 1;
        let bounds = self.bounds();
        self.snake.advance(bounds);
        let head = self.snake.head();

        if head == self.good_food.position {
            let forbidden = Occupied::from_snake(&self.snake, &[self.bad_food.position]);
            self.good_food.respawn(&mut self.rng, bounds, &forbidden);
            self.snake.grow();
            self.max_length = self.max_length.max(self.snake.length());
            debug!(
                length = self.snake.length(),
                max_length = self.max_length,
                next = ?self.good_food.position,
                "good food eaten"
            );
            return TickOutcome::AteGoodFood;
        }

        if self.snake.collides_with_self(self.config.self_collision_threshold) {
            debug!(length = self.snake.length(), ?head, "self collision, resetting");
            self.snake.reset(bounds.center());
            return TickOutcome::SelfCollision;
        }

        if head == self.bad_food.position {
            let outcome = if self.snake.length() > 1 {
                self.snake.shrink_by_one();
                TickOutcome::AteBadFood
            } else {
                self.snake.reset(bounds.center());
                TickOutcome::PoisonedReset
            };
            let forbidden = Occupied::from_snake(&self.snake, &[self.good_food.position]);
            self.bad_food.respawn(&mut self.rng, bounds, &forbidden);
            debug!(
                ?outcome,
                length = self.snake.length(),
                next = ?self.bad_food.position,
                "bad food eaten"
            );
            return outcome;
        }

        TickOutcome::Moved
    }

    /// Raises the pace by one step, up to the configured maximum.
    pub fn increase_speed(&mut self) {
        self.speed = self
            .speed
            .saturating_add(self.config.speed_step)
            .min(self.config.max_speed);
        debug!(speed = self.speed, "speed increased");
    }

    /// Lowers the pace by one step, down to the configured minimum.
    pub fn decrease_speed(&mut self) {
        self.speed = self
            .speed
            .saturating_sub(self.config.speed_step)
            .max(self.config.min_speed);
        debug!(speed = self.speed, "speed decreased");
    }

    /// Builds the read-only view a renderer draws from.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut cells: Vec<TaggedCell> = self
            .snake
            .segments()
            .enumerate()
            .map(|(index, position)| TaggedCell {
                position: *position,
                tag: if index == 0 {
                    CellTag::Head
                } else {
                    CellTag::Body
                },
            })
            .collect();
        cells.push(TaggedCell {
            position: self.good_food.position,
            tag: CellTag::GoodFood,
        });
        cells.push(TaggedCell {
            position: self.bad_food.position,
            tag: CellTag::BadFood,
        });

        Snapshot {
            bounds: self.bounds(),
            cells,
            vacated: self.snake.vacated().to_vec(),
            good_food: self.good_food.position,
            bad_food: self.bad_food.position,
            speed: self.speed,
            length: self.snake.length(),
            max_length: self.max_length,
        }
    }

    /// Wall-clock time between ticks at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.speed.max(1)
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Longest the snake has been this session, surviving resets.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
