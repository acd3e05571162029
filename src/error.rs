//! Error type shared by the rules engine, the search tree, and the driver.

use thiserror::Error;

use crate::state::Move;

/// Errors raised by the engine.
///
/// None of these arise from moves the generator produced itself; they signal
/// externally supplied input or a broken search invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// A capture that cannot be applied to the current board.
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: &'static str },

    /// Both sides passed in a row; nothing is left to play.
    #[error("game is over")]
    GameOver,

    /// A search tree invariant was violated.
    #[error("illegal search state: {0}")]
    IllegalState(String),

    /// Board dimensions that cannot hold the standard opening.
    #[error("invalid board dimensions {width}x{height} (need even sides >= 4)")]
    InvalidDimensions { width: usize, height: usize },

    /// Malformed text board.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// Driver configuration out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
