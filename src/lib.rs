//! Othello-MCTS: a small-board Othello engine driven by Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search defaults
//! - [`board`] - Grid, sides, and coordinates
//! - [`state`] - Game state, moves, and outcomes
//! - [`rules`] - Move generation, move application, and scoring
//! - [`playout`] - Random playouts and the leaf evaluator trait
//! - [`mcts`] - UCT search tree
//! - [`driver`] - Full games between two configured players
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use othello_mcts::mcts::search;
//! use othello_mcts::rules::{apply_move, legal_moves};
//! use othello_mcts::state::GameState;
//!
//! let state = GameState::new();
//! assert_eq!(legal_moves(&state).unwrap().len(), 4);
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let mv = search(&state, 100, 1.0, &mut rng).unwrap();
//! let next = apply_move(&state, &mv).unwrap();
//! println!("{next}");
//! ```

pub mod board;
pub mod constants;
pub mod driver;
pub mod error;
pub mod mcts;
pub mod playout;
pub mod rules;
pub mod state;

pub use error::{GameError, Result};
