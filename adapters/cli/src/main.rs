#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Maze Chase levels headlessly.

mod render;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use maze_chase_levels::LevelCatalog;
use maze_chase_system_bootstrap::{Bootstrap, Session};
use maze_chase_system_movement::Movement;
use maze_chase_system_pathfinding::{Algorithm, AlgorithmPolicy};
use maze_chase_world::{DEFAULT_SAFE_DISTANCE, DEFAULT_SEEKER_SPEED};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::RoundSummary;

/// Plays one or more Maze Chase levels without a display.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version, about, long_about = None)]
struct Args {
    /// Level number of the first round.
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Number of consecutive levels to play.
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Seed for reproducible runs; entropy is used when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Tick budget per level.
    #[arg(long, default_value_t = 2_000)]
    max_ticks: u64,

    /// Level table (TOML, or JSON with a `.json` extension).
    #[arg(long, default_value = "levels/levels.toml")]
    config: PathBuf,

    /// Search algorithm used by every agent.
    #[arg(long, value_enum, default_value_t = AlgorithmChoice::Random)]
    algorithm: AlgorithmChoice,

    /// Movement progress the seeker accrues per tick.
    #[arg(long, default_value_t = DEFAULT_SEEKER_SPEED)]
    seeker_speed: f64,

    /// Hunter distance at which the seeker treats a resource point as safe.
    #[arg(long, default_value_t = DEFAULT_SAFE_DISTANCE)]
    safe_distance: u32,

    /// Print the final maze after each round.
    #[arg(long)]
    render: bool,

    /// Emit one JSON object per round instead of a text line.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmChoice {
    Random,
    Dfs,
    Bfs,
    Astar,
}

impl From<AlgorithmChoice> for AlgorithmPolicy {
    fn from(choice: AlgorithmChoice) -> Self {
        match choice {
            AlgorithmChoice::Random => Self::Random,
            AlgorithmChoice::Dfs => Self::Fixed(Algorithm::DepthFirst),
            AlgorithmChoice::Bfs => Self::Fixed(Algorithm::BreadthFirst),
            AlgorithmChoice::Astar => Self::Fixed(Algorithm::BestFirst),
        }
    }
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let catalog = LevelCatalog::load_or_default(&args.config);
    let bootstrap = Bootstrap::default()
        .with_seeker_speed(args.seeker_speed)
        .with_safe_distance(args.safe_distance);
    let policy = AlgorithmPolicy::from(args.algorithm);
    info!(
        config = %args.config.display(),
        configured_levels = catalog.len(),
        first_level = args.level,
        rounds = args.rounds,
        seed = ?args.seed,
        "starting run"
    );
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    for round in 0..args.rounds {
        let level_number = args.level.saturating_add(round);
        let params = catalog.params(level_number);
        let world = bootstrap
            .start_level(&params, level_number, &mut rng)
            .with_context(|| format!("failed to start level {level_number}"))?;

        let session_rng = ChaCha8Rng::seed_from_u64(rng.gen());
        let mut session = Session::new(world, Movement::new(policy), session_rng);
        let outcome = session.run(args.max_ticks);

        let summary = RoundSummary::new(outcome, session.world());
        if args.json {
            println!(
                "{}",
                serde_json::to_string(&summary).context("failed to encode round summary")?
            );
        } else {
            println!("{summary}");
        }
        if args.render {
            print!("{}", render::render(session.world()));
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
