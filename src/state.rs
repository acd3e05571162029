//! Game state, moves, and outcomes.
//!
//! A [`GameState`] is never mutated once built. Transitions in
//! [`crate::rules`] return a fresh state holding its own copy of the board.

use std::fmt;

use crate::board::{Board, Position, Side};
use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;

/// A move for the side to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// No capture exists for the side to move.
    Pass,
    /// Place a disk on `target`. Each origin is one of the mover's disks
    /// anchoring a line of opponent disks that flips.
    Capture {
        target: Position,
        origins: Vec<Position>,
    },
}

impl Move {
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::Capture { target, origins } => {
                write!(f, "{},{}<-[", target.row, target.col)?;
                for (i, o) in origins.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{},{}", o.row, o.col)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Final result relative to the scoring side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// +1 / -1 / 0.
    pub fn value(self) -> i32 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
            Outcome::Draw => 0,
        }
    }
}

/// Board plus turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Side,
    pub(crate) previous_move_was_pass: bool,
    pub(crate) scoring_side: Side,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The default opening: SideB moves first and scores the game.
    pub fn new() -> Self {
        Self::with_board(
            Board::opening(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            Side::SideB,
            Side::SideB,
        )
    }

    /// The opening position on a `width x height` board.
    pub fn standard(width: usize, height: usize) -> Result<Self> {
        Ok(Self::with_board(
            Board::standard(width, height)?,
            Side::SideB,
            Side::SideB,
        ))
    }

    /// An arbitrary position. `previous_move_was_pass` starts false.
    pub fn with_board(board: Board, side_to_move: Side, scoring_side: Side) -> Self {
        Self {
            board,
            side_to_move,
            previous_move_was_pass: false,
            scoring_side,
        }
    }

    /// Same position, but flagged as following a pass.
    pub fn after_pass(mut self) -> Self {
        self.previous_move_was_pass = true;
        self
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn previous_move_was_pass(&self) -> bool {
        self.previous_move_was_pass
    }

    #[inline]
    pub fn scoring_side(&self) -> Side {
        self.scoring_side
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current player {}", self.side_to_move)?;
        write!(f, "{}", self.board)
    }
}
