//! Othello-MCTS command line.
//!
//! ## Usage
//!
//! - `othello-mcts` - Show a demo
//! - `othello-mcts play` - Play one game between the configured sides
//! - `othello-mcts sweep` - Compare exploration constants over many games
//!
//! Set `RUST_LOG=debug` to follow individual moves.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use othello_mcts::board::Side;
use othello_mcts::constants::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, EXPLORATION, N_GAMES, N_SIMS, SWEEP_CONSTANTS,
};
use othello_mcts::driver::{MatchConfig, PlayerConfig, play_game, sweep};
use othello_mcts::mcts::SearchTree;
use othello_mcts::playout::RandomRollout;
use othello_mcts::rules::legal_moves;
use othello_mcts::state::GameState;

/// Othello-MCTS: small-board Othello with Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "othello-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for reproducible runs (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game and print the final board
    Play(MatchArgs),
    /// Play many games per SideB exploration constant and tally the winners
    Sweep {
        #[command(flatten)]
        game: MatchArgs,
        /// Exploration constants handed to SideB, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = SWEEP_CONSTANTS)]
        constants: Vec<f64>,
        /// Games per constant
        #[arg(long, default_value_t = N_GAMES)]
        games: usize,
    },
    /// Run a simple demo of the engine
    Demo,
}

#[derive(Args)]
struct MatchArgs {
    /// Board width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Board height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    /// SideA simulations per move
    #[arg(long, default_value_t = N_SIMS)]
    a_sims: usize,
    /// SideA exploration constant
    #[arg(long, default_value_t = EXPLORATION)]
    a_exploration: f64,
    /// SideA plays uniformly random moves
    #[arg(long)]
    a_random: bool,
    /// SideB simulations per move
    #[arg(long, default_value_t = N_SIMS)]
    b_sims: usize,
    /// SideB exploration constant
    #[arg(long, default_value_t = EXPLORATION)]
    b_exploration: f64,
    /// SideB plays uniformly random moves
    #[arg(long)]
    b_random: bool,
}

impl From<&MatchArgs> for MatchConfig {
    fn from(args: &MatchArgs) -> Self {
        MatchConfig {
            width: args.width,
            height: args.height,
            side_a: PlayerConfig {
                simulations: args.a_sims,
                exploration: args.a_exploration,
                random: args.a_random,
            },
            side_b: PlayerConfig {
                simulations: args.b_sims,
                exploration: args.b_exploration,
                random: args.b_random,
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    match cli.command {
        Some(Commands::Play(args)) => {
            let config = MatchConfig::from(&args);
            let report = play_game(&config, &mut rng).context("game aborted")?;
            println!("{}", report.final_state.board());
            println!(
                "SideA {} - SideB {} ({} moves)",
                report.final_state.board().count(Side::SideA),
                report.final_state.board().count(Side::SideB),
                report.moves.len()
            );
            println!(
                "{:?} for {}, code {}",
                report.outcome,
                report.final_state.scoring_side(),
                report.code()
            );
        }
        Some(Commands::Sweep {
            game,
            constants,
            games,
        }) => {
            let config = MatchConfig::from(&game);
            let rows = sweep(&config, &constants, games, &mut rng).context("sweep aborted")?;
            for row in rows {
                println!(
                    "c={}: {:?} (SideA {}, SideB {}, draws {})",
                    row.exploration,
                    row.codes,
                    row.wins(Side::SideA),
                    row.wins(Side::SideB),
                    row.draws()
                );
            }
        }
        Some(Commands::Demo) | None => run_demo(&mut rng)?,
    }
    Ok(())
}

fn run_demo(rng: &mut fastrand::Rng) -> Result<()> {
    println!("Othello-MCTS\n");

    println!("=== Opening ===");
    let state = GameState::new();
    println!("{state}");
    for mv in legal_moves(&state)? {
        println!("  {mv}");
    }

    println!("\n=== MCTS Demo ===");
    println!("Running {N_SIMS} simulations...");
    let mut tree = SearchTree::new(state, 1.0)?;
    let best = tree.best_action(N_SIMS, &mut RandomRollout, rng)?;
    let node = tree.node(best);
    if let Some(mv) = &node.parent_action {
        println!("Best move: {mv}");
    }
    println!(
        "Root: {} visits, value {:.3}",
        tree.node(tree.root()).visits,
        tree.node(tree.root()).value().unwrap_or_default()
    );
    Ok(())
}
