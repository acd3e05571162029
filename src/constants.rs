//! Constants for board dimensions, search parameters, and driver defaults.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board6x6` (default): 6x6 board
//! - `board8x8`: 8x8 board (regular Othello)
//!
//! Runtime overrides are still possible through `MatchConfig`, the feature
//! only picks what `GameState::new()` and the CLI start from.
//! ```sh
//! cargo build                                            # 6x6 (default)
//! cargo build --no-default-features --features board8x8  # 8x8
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
#[cfg(feature = "board6x6")]
pub const N: usize = 6;

#[cfg(feature = "board8x8")]
pub const N: usize = 8;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "board6x6", feature = "board8x8"))]
compile_error!("Cannot enable both 'board6x6' and 'board8x8' features at the same time");

#[cfg(not(any(feature = "board6x6", feature = "board8x8")))]
compile_error!("Must enable exactly one board size feature: 'board6x6' or 'board8x8'");

/// Default board width.
pub const DEFAULT_WIDTH: usize = N;

/// Default board height.
pub const DEFAULT_HEIGHT: usize = N;

/// Smallest board that still fits the 2x2 opening block with room to move.
pub const MIN_SIDE: usize = 4;

/// Compass directions as (row, col) steps.
/// Order: E, S, SE, W, N, NW, SW, NE. Move generation order depends on it.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (1, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of simulations per searched move.
pub const N_SIMS: usize = 100;

/// Default UCT exploration constant.
pub const EXPLORATION: f64 = 0.01;

// =============================================================================
// Driver Defaults
// =============================================================================

/// Default number of independent games per swept exploration constant.
pub const N_GAMES: usize = 10;

/// Exploration constants swept by default.
pub const SWEEP_CONSTANTS: [f64; 3] = [0.1, 1.0, 2.0];

// =============================================================================
// Text Notation
// =============================================================================

/// SideA disk.
pub const DISK_A: char = 'X';

/// SideB disk.
pub const DISK_B: char = 'O';

/// Empty cell.
pub const EMPTY: char = '.';
