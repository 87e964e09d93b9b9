//! Headless runner.
//!
//! `play` lets the planner drive a seeded game and optionally saves the action
//! log; `replay` rebuilds a game from a saved log.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use block_stack::core::{GameState, ReplayLog};
use block_stack::engine::{ActionExecutor, AiConfig, Lookahead};
use block_stack::types::TICK_MS;

#[derive(Debug, Subcommand)]
enum Commands {
    /// Let the AI play a seeded game
    Play {
        #[arg(long, default_value_t = 42, help = "Randomizer seed")]
        seed: u32,

        #[arg(long, default_value_t = 100, help = "Number of pieces to place")]
        pieces: u32,

        #[arg(long, help = "Path to an AI config JSON file")]
        config: Option<PathBuf>,

        #[arg(long, help = "Override the lookahead depth (1 or 2)")]
        lookahead: Option<u8>,

        #[arg(long, help = "Run on the tick clock instead of placing pieces directly")]
        realtime: bool,

        #[arg(long, help = "Write the action log to this path")]
        save_replay: Option<PathBuf>,

        #[arg(long, help = "Print the final grid")]
        print_grid: bool,

        #[arg(long, help = "Print the final snapshot as JSON")]
        json: bool,
    },
    /// Rebuild a game from a saved action log
    Replay {
        #[arg(help = "Path to a replay JSON file")]
        path: PathBuf,

        #[arg(long, help = "Print the final grid")]
        print_grid: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "block-stack", version, about = "Block-stacking placement search")]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (error, warn, info, debug, trace)"
    )]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(cli.log_level))
        .init();

    match cli.command {
        Commands::Play {
            seed,
            pieces,
            config,
            lookahead,
            realtime,
            save_replay,
            print_grid,
            json,
        } => {
            let mut ai = match &config {
                Some(path) => AiConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => AiConfig::default(),
            };
            if let Some(depth) = lookahead {
                ai.lookahead = Lookahead::try_from(depth)?;
            }

            let game = if realtime {
                play_realtime(seed, pieces, &ai)
            } else {
                play_headless(seed, pieces, &ai)
            };
            report(&game, print_grid);

            if json {
                println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
            }
            if let Some(path) = save_replay {
                game.replay_log()
                    .save(&path)
                    .with_context(|| format!("saving replay {}", path.display()))?;
                info!(path = %path.display(), frames = game.frames().len(), "replay saved");
            }
        }
        Commands::Replay { path, print_grid } => {
            let log = ReplayLog::load(&path)
                .with_context(|| format!("loading replay {}", path.display()))?;
            if log.frames.is_empty() {
                bail!("replay {} has no frames", path.display());
            }
            let game = log.replay();
            report(&game, print_grid);
        }
    }

    Ok(())
}

fn play_headless(seed: u32, pieces: u32, ai: &AiConfig) -> GameState {
    let mut game = GameState::new(seed);
    let mut executor = ActionExecutor::new(ai);
    log_planner(&executor);

    for _ in 0..pieces {
        if executor.play_placement(&mut game).is_none() {
            break;
        }
    }
    game
}

fn play_realtime(seed: u32, pieces: u32, ai: &AiConfig) -> GameState {
    let mut game = GameState::new(seed);
    let mut executor = ActionExecutor::new(ai);
    log_planner(&executor);

    // Each placement takes a spawn, one drop per row and the plan; bound the
    // loop so a stuck game still terminates.
    let max_ticks = pieces as u64 * 10_000;
    let mut ticks = 0u64;
    while game.piece_id() <= pieces && ticks < max_ticks {
        if !executor.tick(&mut game, TICK_MS) {
            break;
        }
        ticks += 1;
    }
    game
}

fn log_planner(executor: &ActionExecutor) {
    let planner = executor.planner();
    let weights = planner.evaluator().weights();
    info!(
        lookahead = u8::from(planner.lookahead()),
        height = weights.height,
        lines = weights.lines,
        holes = weights.holes,
        bumpiness = weights.bumpiness,
        "planner ready"
    );
}

fn report(game: &GameState, print_grid: bool) {
    info!(
        seed = game.seed(),
        pieces = game.piece_id(),
        lines = game.lines(),
        score = game.score(),
        level = game.level(),
        game_over = game.game_over(),
        elapsed_ms = game.elapsed_ms(),
        "session finished"
    );
    if print_grid {
        println!("{}", game.grid());
    }
}
