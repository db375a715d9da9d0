use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use snake::config::{EngineConfig, FRAME_POLL_MS, THEME_CLASSIC};
use snake::game::GameEngine;
use snake::input::{GameInput, InputHandler};
use snake::logging::init_file_logging;
use snake::terminal_runtime::TerminalSession;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with engine settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Starting speed in ticks per second.
    #[arg(long)]
    speed: Option<u32>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Append tracing output to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        if let Err(error) = init_file_logging(path) {
            eprintln!("Failed to open log file {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let engine = match build_engine(&cli) {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    match run(engine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Terminal error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn build_engine(cli: &Cli) -> Result<GameEngine, snake::config::ConfigError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(speed) = cli.speed {
        config.initial_speed = speed;
    }
    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }

    match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new_session(config),
    }
}

fn run(mut engine: GameEngine) -> io::Result<()> {
    let mut session = TerminalSession::enter(&THEME_CLASSIC)?;
    let mut input = InputHandler::new(Duration::from_millis(FRAME_POLL_MS));
    let mut paused = false;
    let mut last_tick = Instant::now();

    info!(config = ?engine.config(), "game started");

    loop {
        let snapshot = engine.snapshot();
        session.draw(&snapshot, paused)?;

        if let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Pause => paused = !paused,
                GameInput::Direction(_) if paused => {}
                other => engine.apply_input(other),
            }
        }

        if !paused && last_tick.elapsed() >= engine.tick_interval() {
            engine.tick();
            last_tick = Instant::now();
        }
    }

    match engine.snapshot().to_json() {
        Ok(json) => debug!(snapshot = %json, "final snapshot"),
        Err(error) => debug!(%error, "final snapshot not serializable"),
    }
    info!(
        ticks = engine.tick_count(),
        max_length = engine.max_length(),
        "game finished"
    );
    Ok(())
}
