//! Self-play game generation and search comparison for N-dimensional
//! tic-tac-toe.
//!
//! `generate` plays configured agents against each other and optionally
//! saves every game as JSON. `compare` checks that alpha-beta and plain
//! minimax pick the same moves and reports how many nodes each visits.

mod compare;
mod config;
mod driver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compare::compare_depth;
use config::ExperimentConfig;
use driver::{play_game, GameRecord};
use hypertoe_core::Player;
use hypertoe_engine::{GameConfig, GameEngine};
use hypertoe_search::{AgentConfig, AgentKind, AgentVariant};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// N-dimensional tic-tac-toe self-play tool.
#[derive(Parser)]
#[command(name = "hypertoe-selfplay")]
#[command(about = "Generate self-play games and compare search agents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between two agents.
    Generate {
        /// Experiment TOML file. Flags below override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of games to play.
        #[arg(short, long)]
        games: Option<usize>,

        /// Output directory for game files.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Board dimensions.
        #[arg(short, long)]
        dimensions: Option<usize>,

        /// Random seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,

        /// Agent playing X.
        #[arg(long, value_parser = parse_kind)]
        x: Option<AgentKind>,

        /// Agent playing O.
        #[arg(long, value_parser = parse_kind)]
        o: Option<AgentKind>,

        /// Search depth for both agents.
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Check alpha-beta against minimax on random positions.
    Compare {
        /// Deepest search to run on the 2D board.
        #[arg(long, default_value = "4")]
        max_depth_2d: usize,

        /// Deepest search to run on the 3D board.
        #[arg(long, default_value = "3")]
        max_depth_3d: usize,

        /// Random positions per board and depth.
        #[arg(short, long, default_value = "50")]
        positions: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn parse_kind(s: &str) -> std::result::Result<AgentKind, String> {
    match s {
        "random" => Ok(AgentKind::Random),
        "minimax" => Ok(AgentKind::Minimax),
        "alphabeta" => Ok(AgentKind::AlphaBeta),
        other => Err(format!(
            "unknown agent '{}' (expected random, minimax or alphabeta)",
            other
        )),
    }
}

/// Contents of one `game_XXXXXX.json` file: the trajectory plus the
/// settings that produced it.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SavedGame {
    seed: u64,
    game: GameConfig,
    players: Vec<AgentConfig>,
    record: GameRecord,
}

/// Outcome counts over a batch of games.
#[derive(Debug, Default, PartialEq)]
struct Summary {
    x_wins: usize,
    o_wins: usize,
    ties: usize,
    truncated: usize,
    total_moves: usize,
}

impl Summary {
    fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Summary::default();
        for record in records {
            match record.winner {
                Some(Player::X) => summary.x_wins += 1,
                Some(Player::O) => summary.o_wins += 1,
                None => summary.ties += 1,
            }
            if record.truncated {
                summary.truncated += 1;
            }
            summary.total_moves += record.steps.len();
        }
        summary
    }
}

/// Play game `index` of the experiment with freshly built engine and agents.
fn generate_game(config: &ExperimentConfig, index: usize) -> Result<GameRecord> {
    let mut engine = GameEngine::new(config.game.clone())?;
    let players = config.players_for_game(index);
    let mut agents = [
        AgentVariant::from_config(&players[0])?,
        AgentVariant::from_config(&players[1])?,
    ];
    play_game(&mut engine, &mut agents).with_context(|| format!("game {} failed", index))
}

/// Save each game to a separate JSON file.
fn write_records(output: &Path, config: &ExperimentConfig, records: &[GameRecord]) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {:?}", output))?;
    for (i, record) in records.iter().enumerate() {
        let saved = SavedGame {
            seed: config.game_seed(i),
            game: config.game.clone(),
            players: config.players_for_game(i),
            record: record.clone(),
        };
        let filename = output.join(format!("game_{:06}.json", i));
        let file = File::create(&filename)
            .with_context(|| format!("Failed to create file: {:?}", filename))?;
        serde_json::to_writer(BufWriter::new(file), &saved)
            .with_context(|| format!("Failed to serialize game {}", i))?;
    }
    Ok(())
}

fn run_generate(config: &ExperimentConfig) -> Result<Vec<GameRecord>> {
    config.validate()?;
    info!(
        "playing {} games on a {}D board ({} vs {})",
        config.games, config.game.dimensions, config.players[0].kind, config.players[1].kind
    );

    (0..config.games)
        .into_par_iter()
        .map(|i| generate_game(config, i))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    config_path: Option<PathBuf>,
    games: Option<usize>,
    output: Option<PathBuf>,
    dimensions: Option<usize>,
    seed: Option<u64>,
    x: Option<AgentKind>,
    o: Option<AgentKind>,
    depth: Option<usize>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(games) = games {
        config.games = games;
    }
    if let Some(output) = output {
        config.output = Some(output);
    }
    if let Some(dimensions) = dimensions {
        config.game.dimensions = dimensions;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    for (seat, kind) in [x, o].into_iter().enumerate() {
        if let Some(kind) = kind {
            config.players[seat].kind = kind;
        }
    }
    if let Some(depth) = depth {
        for player in &mut config.players {
            player.search.depth = depth;
        }
    }

    println!(
        "Generating {} games: {} (X) vs {} (O), {}D board",
        config.games, config.players[0].kind, config.players[1].kind, config.game.dimensions
    );
    println!("Seed: {}", config.seed);

    let start = Instant::now();
    let records = run_generate(&config)?;
    let elapsed = start.elapsed();

    if let Some(output) = &config.output {
        write_records(output, &config, &records)?;
        println!("Files saved to: {:?}", output);
    }

    let summary = Summary::from_records(&records);
    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!("Total moves: {}", summary.total_moves);
    println!(
        "Average game length: {:.1} moves",
        summary.total_moves as f64 / records.len().max(1) as f64
    );
    println!(
        "\nOutcomes: X wins: {}, O wins: {}, Ties: {}, Truncated: {}",
        summary.x_wins, summary.o_wins, summary.ties, summary.truncated
    );

    Ok(())
}

fn cmd_compare(
    max_depth_2d: usize,
    max_depth_3d: usize,
    positions: usize,
    seed: u64,
) -> Result<()> {
    println!("Comparing minimax and alpha-beta on {} random positions per depth", positions);
    println!("================================================");
    println!("{:>4} {:>6} {:>14} {:>14} {:>8}", "dims", "depth", "minimax", "alphabeta", "pruned");

    for (dims, max_depth) in [(2, max_depth_2d), (3, max_depth_3d)] {
        for depth in 1..=max_depth {
            let summary = compare_depth(dims, depth, positions, seed)?;
            println!(
                "{:>4} {:>6} {:>14.1} {:>14.1} {:>7.1}%",
                summary.dimensions,
                summary.depth,
                summary.minimax_nodes,
                summary.alphabeta_nodes,
                summary.pruned() * 100.0
            );
        }
    }

    println!("================================================");
    println!("All choices identical.");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            games,
            output,
            dimensions,
            seed,
            x,
            o,
            depth,
        } => cmd_generate(config, games, output, dimensions, seed, x, o, depth),

        Commands::Compare {
            max_depth_2d,
            max_depth_3d,
            positions,
            seed,
        } => cmd_compare(max_depth_2d, max_depth_3d, positions, seed),
    }
}
