use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{LevelFilter, info};
use toroidal_snake::clock::TickClock;
use toroidal_snake::config::GameConfig;
use toroidal_snake::input::InputHandler;
use toroidal_snake::logging::{default_log_path, init_file_logger};
use toroidal_snake::placeable::BarrierRespawn;
use toroidal_snake::round::{RoundController, RoundStatus};
use toroidal_snake::terminal_runtime::{TerminalSession, restore_terminal};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Number of barriers on the board.
    #[arg(long)]
    barriers: Option<usize>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Give triggered barriers a fresh random kind when they move.
    #[arg(long, conflicts_with = "keep_barrier_kind")]
    reroll_barriers: bool,

    /// Keep a triggered barrier's kind when it moves.
    #[arg(long)]
    keep_barrier_kind: bool,

    /// Log file path.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log per-tick events.
    #[arg(long)]
    debug: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(error) = init_file_logger(&log_path, level) {
        eprintln!("Warning: logging disabled: {error}");
    }

    let config = resolve_config(&cli).map_err(io::Error::other)?;
    info!("starting with {config:?}");

    install_panic_hook();
    run(&config)
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, toroidal_snake::error::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load_from_path(path)?,
        None => GameConfig::load()?,
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(tps) = cli.tps {
        config.ticks_per_second = tps;
    }
    if let Some(barriers) = cli.barriers {
        config.barrier_count = barriers;
    }
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if cli.reroll_barriers {
        config.barrier_respawn = BarrierRespawn::Reroll;
    }
    if cli.keep_barrier_kind {
        config.barrier_respawn = BarrierRespawn::KeepKind;
    }

    config.validate()?;
    Ok(config)
}

fn run(config: &GameConfig) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut round = RoundController::new(config);
    session.present(&round.snapshot())?;
    let mut clock = TickClock::start(config.tick_interval(), Instant::now());

    while round.status() != RoundStatus::Stopped {
        if let Some(wait) = clock.time_until_tick(Instant::now()) {
            // Several keys within one tick collapse to the last valid turn.
            if let Some(game_input) = input.poll_input(wait)? {
                round.apply_input(game_input);
            }
            continue;
        }

        let outcome = round.step();
        if outcome.reset {
            info!("round {} started", round.round());
        }
        session.present(&round.snapshot())?;
        clock.advance(Instant::now());
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        log::error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}
