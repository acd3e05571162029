//! Monte Carlo playouts (random game simulation).
//!
//! A playout picks a legal move uniformly at random, including a lone pass,
//! until both sides have passed in a row. The outcome is scored from the
//! starting state's scoring side, which never changes along the way.
//!
//! Leaf evaluation goes through the [`Evaluator`] trait so a learned value
//! model can stand in for random playouts without touching the tree code.

use fastrand::Rng;

use crate::error::{GameError, Result};
use crate::rules::{apply_move, is_terminal, legal_moves, result};
use crate::state::{GameState, Outcome};

/// What a finished playout produced.
#[derive(Clone, Debug)]
pub struct Rollout {
    pub outcome: Outcome,
    pub final_state: GameState,
    /// Disks placed during the playout.
    pub placements: usize,
    /// Passes played during the playout, including the final one.
    pub passes: usize,
}

/// Play uniformly random moves from `state` to the end of the game.
///
/// Each placement fills an empty square and a pass that is not followed by
/// a placement ends the game, so the loop always terminates.
///
/// # Errors
/// `GameOver` if `state` is already terminal.
pub fn rollout(state: &GameState, rng: &mut Rng) -> Result<Rollout> {
    if is_terminal(state) {
        return Err(GameError::GameOver);
    }
    let mut current = state.clone();
    let mut placements = 0;
    let mut passes = 0;

    while !is_terminal(&current) {
        let moves = legal_moves(&current)?;
        let mv = &moves[rng.usize(..moves.len())];
        if mv.is_pass() {
            passes += 1;
        } else {
            placements += 1;
        }
        current = apply_move(&current, mv)?;
    }

    log::trace!("rollout finished after {placements} placements, {passes} passes");
    Ok(Rollout {
        outcome: result(&current),
        final_state: current,
        placements,
        passes,
    })
}

/// Estimates the outcome of a non-terminal leaf for the search tree.
pub trait Evaluator {
    fn evaluate(&mut self, state: &GameState, rng: &mut Rng) -> Result<Outcome>;
}

/// Uniform random playouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomRollout;

impl Evaluator for RandomRollout {
    fn evaluate(&mut self, state: &GameState, rng: &mut Rng) -> Result<Outcome> {
        rollout(state, rng).map(|r| r.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Side};
    use crate::state::Move;

    #[test]
    fn test_rollout_terminates() {
        let mut rng = Rng::with_seed(7);
        let start = GameState::new();
        let empty = start.board().empty_count();
        for _ in 0..50 {
            let r = rollout(&start, &mut rng).unwrap();
            assert!(is_terminal(&r.final_state));
            assert!(r.placements <= empty);
            assert!(r.passes >= 1);
            assert_eq!(r.outcome, result(&r.final_state));
        }
    }

    #[test]
    fn test_rollout_keeps_scoring_side() {
        let mut rng = Rng::with_seed(3);
        let board = Board::standard(6, 6).unwrap();
        let start = GameState::with_board(board, Side::SideB, Side::SideA);
        let r = rollout(&start, &mut rng).unwrap();
        assert_eq!(r.final_state.scoring_side(), Side::SideA);
    }

    #[test]
    fn test_rollout_on_terminal_state() {
        let board = Board::from_rows(&["XX..", "....", "....", "...O"]).unwrap();
        let state = GameState::with_board(board, Side::SideA, Side::SideA);
        let over = apply_move(&state, &Move::Pass).unwrap();
        let mut rng = Rng::with_seed(1);
        assert!(matches!(rollout(&over, &mut rng), Err(GameError::GameOver)));
        assert!(RandomRollout.evaluate(&over, &mut rng).is_err());
    }

    #[test]
    fn test_rollout_seeded_is_reproducible() {
        let start = GameState::new();
        let a = rollout(&start, &mut Rng::with_seed(42)).unwrap();
        let b = rollout(&start, &mut Rng::with_seed(42)).unwrap();
        assert_eq!(a.final_state, b.final_state);
        assert_eq!(a.placements, b.placements);
    }
}
