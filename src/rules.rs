//! Othello rules: move generation, move application, and scoring.
//!
//! A capture is found by walking outward from each of the mover's disks:
//! the walk must cross one or more contiguous opponent disks and land on an
//! empty square inside the board. Captures that land on the same square are
//! merged into a single [`Move::Capture`] listing every anchoring disk.
//!
//! When the side to move has no capture the generator returns `[Pass]`.
//! Two passes in a row end the game.

use crate::board::{Board, Cell, Position, Side};
use crate::constants::DIRECTIONS;
use crate::error::{GameError, Result};
use crate::state::{GameState, Move, Outcome};

/// The square a capture from `origin` in direction `(dr, dc)` would land on.
fn claimable_from(
    board: &Board,
    origin: Position,
    side: Side,
    (dr, dc): (isize, isize),
) -> Option<Position> {
    let opponent = Cell::Disk(side.opponent());
    let mut pos = origin.offset(dr, dc)?;
    if board.get(pos)? != opponent {
        return None;
    }
    while board.get(pos)? == opponent {
        pos = pos.offset(dr, dc)?;
    }
    match board.get(pos)? {
        Cell::Empty => Some(pos),
        Cell::Disk(_) => None,
    }
}

/// All captures for `side`, grouped by target in order of first discovery.
fn captures(board: &Board, side: Side) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::new();
    for origin in board.disks(side) {
        for dir in DIRECTIONS {
            let Some(target) = claimable_from(board, origin, side, dir) else {
                continue;
            };
            let existing = moves.iter_mut().find_map(|mv| match mv {
                Move::Capture { target: t, origins } if *t == target => Some(origins),
                _ => None,
            });
            match existing {
                Some(origins) => origins.push(origin),
                None => moves.push(Move::Capture {
                    target,
                    origins: vec![origin],
                }),
            }
        }
    }
    moves
}

/// Whether `side` has at least one capture. Stops at the first hit.
fn has_capture(board: &Board, side: Side) -> bool {
    board.disks(side).any(|origin| {
        DIRECTIONS
            .iter()
            .any(|&dir| claimable_from(board, origin, side, dir).is_some())
    })
}

/// Legal moves for the side to move: merged captures, or `[Pass]`.
///
/// # Errors
/// `GameOver` on a terminal state.
pub fn legal_moves(state: &GameState) -> Result<Vec<Move>> {
    let moves = captures(&state.board, state.side_to_move);
    if !moves.is_empty() {
        return Ok(moves);
    }
    if state.previous_move_was_pass {
        return Err(GameError::GameOver);
    }
    Ok(vec![Move::Pass])
}

/// True after two consecutive passes.
pub fn is_terminal(state: &GameState) -> bool {
    state.previous_move_was_pass && !has_capture(&state.board, state.side_to_move)
}

/// Unit step from `from` toward `to` if they share a row, column, or
/// diagonal and differ.
fn direction(from: Position, to: Position) -> Option<(isize, isize)> {
    let dr = to.row as isize - from.row as isize;
    let dc = to.col as isize - from.col as isize;
    if (dr, dc) == (0, 0) {
        return None;
    }
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return None;
    }
    Some((dr.signum(), dc.signum()))
}

/// Check an externally supplied capture before touching the board.
fn validate_capture(
    board: &Board,
    mv: &Move,
    target: Position,
    origins: &[Position],
) -> Result<()> {
    let invalid = |reason| GameError::InvalidMove {
        mv: mv.clone(),
        reason,
    };
    match board.get(target) {
        None => return Err(invalid("target is off the board")),
        Some(Cell::Disk(_)) => return Err(invalid("target is occupied")),
        Some(Cell::Empty) => {}
    }
    if origins.is_empty() {
        return Err(invalid("capture has no origins"));
    }
    for &origin in origins {
        if !board.contains(origin) {
            return Err(invalid("origin is off the board"));
        }
        if direction(origin, target).is_none() {
            return Err(invalid("origin is not in line with target"));
        }
    }
    Ok(())
}

/// Play `mv` and return the successor state.
///
/// The board is copied; `state` is left untouched. The side to move always
/// toggles and the scoring side is carried over.
///
/// # Errors
/// - `InvalidMove` if a capture's target is off-board or occupied, or an
///   origin is off-board or not in line with the target
/// - `GameOver` if `state` is terminal
pub fn apply_move(state: &GameState, mv: &Move) -> Result<GameState> {
    if is_terminal(state) {
        return Err(GameError::GameOver);
    }
    let mover = state.side_to_move;
    let mut board = state.board.clone();
    let previous_move_was_pass = match mv {
        Move::Pass => true,
        Move::Capture { target, origins } => {
            validate_capture(&board, mv, *target, origins)?;
            board.set(*target, Cell::Disk(mover));
            for &origin in origins {
                let Some((dr, dc)) = direction(origin, *target) else {
                    continue;
                };
                let mut pos = origin;
                while let Some(next) = pos.offset(dr, dc) {
                    if next == *target {
                        break;
                    }
                    board.set(next, Cell::Disk(mover));
                    pos = next;
                }
            }
            false
        }
    };
    Ok(GameState {
        board,
        side_to_move: mover.opponent(),
        previous_move_was_pass,
        scoring_side: state.scoring_side,
    })
}

/// Number of opponent disks `mv` would turn over.
pub fn flips(state: &GameState, mv: &Move) -> usize {
    let Move::Capture { target, origins } = mv else {
        return 0;
    };
    let opponent = Cell::Disk(state.side_to_move.opponent());
    origins
        .iter()
        .filter_map(|&origin| direction(origin, *target).map(|dir| (origin, dir)))
        .map(|(origin, (dr, dc))| {
            let mut count = 0;
            let mut pos = origin;
            while let Some(next) = pos.offset(dr, dc) {
                if next == *target {
                    break;
                }
                if state.board.get(next) == Some(opponent) {
                    count += 1;
                }
                pos = next;
            }
            count
        })
        .sum()
}

/// The side with more disks, or `None` on a tie.
pub fn winner(state: &GameState) -> Option<Side> {
    let a = state.board.count(Side::SideA);
    let b = state.board.count(Side::SideB);
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => Some(Side::SideA),
        std::cmp::Ordering::Less => Some(Side::SideB),
        std::cmp::Ordering::Equal => None,
    }
}

/// Disk-count result from the state's scoring side.
pub fn result(state: &GameState) -> Outcome {
    match winner(state) {
        None => Outcome::Draw,
        Some(side) if side == state.scoring_side => Outcome::Win,
        Some(_) => Outcome::Loss,
    }
}
