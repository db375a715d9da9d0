use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snake::config::EngineConfig;
use snake::food::Food;
use snake::game::{GameEngine, TickOutcome};
use snake::grid::{GridSize, Position};
use snake::input::{Direction, GameInput};
use snake::snake::Snake;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn engine_with_parked_food(config: EngineConfig, seed: u64) -> GameEngine {
    let mut engine = GameEngine::with_seed(config, seed).expect("config should be valid");
    engine.good_food = Food::good(Position::new(1, 1));
    engine.bad_food = Food::bad(Position::new(2, 1));
    engine
}

#[test]
fn scripted_turns_follow_the_grid() {
    let mut engine = engine_with_parked_food(EngineConfig::default(), 42);
    assert_eq!(
        engine.bounds(),
        GridSize {
            width: 32,
            height: 24
        }
    );
    assert_eq!(engine.snake.head(), Position::new(16, 12));

    for direction in [
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Left,
    ] {
        engine.apply_input(GameInput::Direction(direction));
        assert_eq!(engine.tick(), TickOutcome::Moved);
    }

    assert_eq!(engine.snake.head(), Position::new(16, 14));
    assert_eq!(engine.snake.len(), 1);
    assert_eq!(engine.snake.length(), 1);
    assert_eq!(engine.tick_count(), 4);
}

#[test]
fn moving_off_the_right_edge_wraps_to_column_zero() {
    let mut engine = engine_with_parked_food(EngineConfig::default(), 43);

    for _ in 0..16 {
        engine.tick();
    }
    assert_eq!(engine.snake.head(), Position::new(0, 12));

    engine.apply_input(GameInput::Direction(Direction::Up));
    for _ in 0..13 {
        engine.tick();
    }
    assert_eq!(engine.snake.head(), Position::new(0, 23));
}

#[test]
fn three_good_foods_then_self_collision_keeps_record() {
    let mut engine = engine_with_parked_food(EngineConfig::default(), 44);

    for x in 17..=19 {
        engine.good_food = Food::good(Position::new(x, 12));
        assert_eq!(engine.tick(), TickOutcome::AteGoodFood);
    }
    assert_eq!(engine.snake.length(), 4);
    assert_eq!(engine.max_length(), 4);

    engine.good_food = Food::good(Position::new(1, 1));
    assert_eq!(engine.tick(), TickOutcome::Moved);
    assert_eq!(engine.snake.len(), 4);

    // A six-segment loop whose head steps onto its fifth segment.
    engine.snake = Snake::from_segments(
        vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 4),
            Position::new(5, 4),
            Position::new(4, 4),
            Position::new(4, 5),
        ],
        Direction::Up,
    );
    engine.good_food = Food::good(Position::new(20, 20));
    engine.bad_food = Food::bad(Position::new(21, 20));

    assert_eq!(engine.tick(), TickOutcome::SelfCollision);
    assert_eq!(engine.snake.len(), 1);
    assert_eq!(engine.snake.length(), 1);
    assert_eq!(engine.max_length(), 4);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.length, 1);
    assert_eq!(snapshot.max_length, 4);
    assert_eq!(snapshot.head(), Some(Position::new(16, 12)));
}

#[test]
fn random_play_keeps_invariants() {
    let config = EngineConfig {
        grid: GridSize {
            width: 16,
            height: 12,
        },
        ..EngineConfig::default()
    };
    let mut engine = GameEngine::with_seed(config.clone(), 7).expect("config should be valid");
    let mut rng = StdRng::seed_from_u64(8);
    let mut record = engine.max_length();

    for _ in 0..5_000 {
        match rng.gen_range(0..10) {
            0 => engine.apply_input(GameInput::Faster),
            1 => engine.apply_input(GameInput::Slower),
            _ => {
                let direction = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
                engine.apply_input(GameInput::Direction(direction));
            }
        }

        let length_before = engine.snake.length();
        let outcome = engine.tick();

        assert!(engine.max_length() >= record);
        record = engine.max_length();
        assert!(engine.max_length() >= engine.snake.length());
        assert!((config.min_speed..=config.max_speed).contains(&engine.speed()));
        assert!(engine.snake.length() >= 1);
        assert!(config.grid.contains(engine.snake.head()));
        assert_ne!(engine.good_food.position, engine.bad_food.position);

        match outcome {
            TickOutcome::AteGoodFood => {
                assert_eq!(engine.snake.length(), length_before + 1);
                assert!(!engine.snake.occupies(engine.good_food.position));
            }
            TickOutcome::AteBadFood => {
                assert_eq!(engine.snake.length(), length_before - 1);
                assert_eq!(engine.snake.len(), engine.snake.length());
                assert!(!engine.snake.occupies(engine.bad_food.position));
            }
            TickOutcome::SelfCollision | TickOutcome::PoisonedReset => {
                assert_eq!(engine.snake.len(), 1);
                assert_eq!(engine.snake.length(), 1);
            }
            TickOutcome::Moved => {
                assert_eq!(engine.snake.len(), engine.snake.length());
            }
        }
    }
}
