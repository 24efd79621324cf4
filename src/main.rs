use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use effect_snake::board::Position;
use effect_snake::config::GameConfig;
use effect_snake::error::ConfigError;
use effect_snake::game::{GameState, StepResult};
use effect_snake::input::{Direction, InputLatch};
use effect_snake::rng::SeededRandom;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Plays a scripted game headlessly and prints one JSON report per tick.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; command-line values override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Food items kept on the board.
    #[arg(long)]
    foods: Option<usize>,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// One input per tick: U, D, L, R (any case) or '.' for none.
    #[arg(long, default_value = "")]
    moves: String,

    /// Stop after this many ticks even if the snake is alive.
    #[arg(long, default_value_t = 100)]
    max_ticks: u64,

    /// Simulated clock value at the first tick.
    #[arg(long, default_value_t = 0)]
    start_ms: u64,
}

#[derive(Debug, Serialize)]
struct TickReport<'a> {
    tick: u64,
    now_ms: u64,
    head: Position,
    length: usize,
    inverted: bool,
    result: &'a StepResult,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "invalid configuration");
            eprintln!("effect-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ConfigError> {
    let config = resolve_config(cli)?;
    let rng = cli
        .seed
        .map_or_else(SeededRandom::from_entropy, SeededRandom::from_seed);
    let mut state = GameState::from_config(&config, rng)?;

    tracing::info!(
        width = config.width,
        height = config.height,
        foods = config.food_count,
        seed = ?cli.seed,
        "starting headless run"
    );

    let mut inputs = cli.moves.chars().map(Direction::from_char);
    let mut latch = InputLatch::new();
    let mut now_ms = cli.start_ms;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for tick in 1..=cli.max_ticks {
        latch.set_inverted(state.is_invert_active(now_ms));
        if let Some(Some(direction)) = inputs.next() {
            latch.capture(direction);
        }
        if let Some(direction) = latch.take_direction() {
            state.set_direction(direction);
        }

        let interval = state.tick_ms(now_ms);
        let result = state.step(now_ms);

        let report = TickReport {
            tick,
            now_ms,
            head: state.head(),
            length: state.snake_len(),
            inverted: latch.is_inverted(),
            result: &result,
        };
        if let Err(error) = write_report(&mut out, &report) {
            tracing::warn!(%error, "stdout closed; stopping");
            break;
        }

        if result.collided {
            tracing::info!(tick, score = result.score, reason = ?state.death_reason(), "game over");
            break;
        }
        now_ms = now_ms.saturating_add(interval);
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(foods) = cli.foods {
        config.food_count = foods;
    }

    config.validate()?;
    Ok(config)
}

fn write_report(out: &mut impl Write, report: &TickReport<'_>) -> io::Result<()> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)
}
