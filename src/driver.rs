//! Game driver: plays full games between two configured players.
//!
//! Each side is either a uniform random mover or an MCTS searcher with its
//! own simulation budget and exploration constant. Every searched move
//! builds a fresh tree rooted at the current state; trees are not reused.
//!
//! Games start from the opening with SideB to move and SideB as the scoring
//! side. The scoring side is inherited by every search tree, so both
//! players' searches measure outcomes from SideB's point of view.

use fastrand::Rng;

use crate::board::Side;
use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, EXPLORATION, N_SIMS};
use crate::error::{GameError, Result};
use crate::mcts::search;
use crate::rules::{apply_move, is_terminal, legal_moves, result, winner};
use crate::state::{GameState, Move, Outcome};

/// How one side picks its moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerConfig {
    /// MCTS simulations per move
    pub simulations: usize,
    /// UCT exploration constant
    pub exploration: f64,
    /// Play uniformly random legal moves instead of searching
    pub random: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            simulations: N_SIMS,
            exploration: EXPLORATION,
            random: false,
        }
    }
}

impl PlayerConfig {
    /// A player that moves uniformly at random.
    pub fn random() -> Self {
        Self {
            random: true,
            ..Self::default()
        }
    }

    fn validate(&self, side: Side) -> Result<()> {
        if self.random {
            return Ok(());
        }
        if self.simulations == 0 {
            return Err(GameError::InvalidConfig(format!(
                "{side} needs at least one simulation"
            )));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "{side} exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

/// Board size plus both players.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    pub width: usize,
    pub height: usize,
    pub side_a: PlayerConfig,
    pub side_b: PlayerConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            side_a: PlayerConfig::default(),
            side_b: PlayerConfig::default(),
        }
    }
}

impl MatchConfig {
    /// The configuration for `side`.
    pub fn player(&self, side: Side) -> &PlayerConfig {
        match side {
            Side::SideA => &self.side_a,
            Side::SideB => &self.side_b,
        }
    }

    /// Check board dimensions and both players.
    pub fn validate(&self) -> Result<()> {
        self.initial_state()?;
        self.side_a.validate(Side::SideA)?;
        self.side_b.validate(Side::SideB)
    }

    fn initial_state(&self) -> Result<GameState> {
        GameState::standard(self.width, self.height)
    }
}

/// How a finished game ended.
#[derive(Clone, Debug)]
pub struct GameReport {
    pub final_state: GameState,
    pub moves: Vec<Move>,
    /// Result from the scoring side
    pub outcome: Outcome,
    /// Side with more disks, `None` on a draw
    pub winner: Option<Side>,
}

impl GameReport {
    /// 0 for a draw, otherwise the winning side's code (1 or 2).
    pub fn code(&self) -> u8 {
        self.winner.map_or(0, Side::code)
    }
}

/// Pick a move for the side to move in `state`.
///
/// # Errors
/// `GameOver` on a terminal state, plus anything the search reports.
pub fn choose_move(state: &GameState, player: &PlayerConfig, rng: &mut Rng) -> Result<Move> {
    if player.random {
        let mut moves = legal_moves(state)?;
        let i = rng.usize(..moves.len());
        return Ok(moves.swap_remove(i));
    }
    search(state, player.simulations, player.exploration, rng)
}

/// Play one game to the end.
pub fn play_game(config: &MatchConfig, rng: &mut Rng) -> Result<GameReport> {
    config.validate()?;
    let mut state = config.initial_state()?;
    let mut moves = Vec::new();

    while !is_terminal(&state) {
        let side = state.side_to_move();
        let mv = choose_move(&state, config.player(side), rng)?;
        log::debug!("{side} plays {mv}");
        state = apply_move(&state, &mv)?;
        moves.push(mv);
    }

    let report = GameReport {
        outcome: result(&state),
        winner: winner(&state),
        moves,
        final_state: state,
    };
    log::info!(
        "game over after {} moves: SideA {} SideB {}, {:?} for {}",
        report.moves.len(),
        report.final_state.board().count(Side::SideA),
        report.final_state.board().count(Side::SideB),
        report.outcome,
        report.final_state.scoring_side(),
    );
    Ok(report)
}

/// Games played with one exploration constant for SideB.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepRow {
    pub exploration: f64,
    /// Reporting code of each game, in play order
    pub codes: Vec<u8>,
}

impl SweepRow {
    pub fn wins(&self, side: Side) -> usize {
        self.codes.iter().filter(|&&c| c == side.code()).count()
    }

    pub fn draws(&self) -> usize {
        self.codes.iter().filter(|&&c| c == 0).count()
    }
}

/// For each exploration constant, give it to SideB and play `games` games.
pub fn sweep(
    config: &MatchConfig,
    constants: &[f64],
    games: usize,
    rng: &mut Rng,
) -> Result<Vec<SweepRow>> {
    let mut rows = Vec::with_capacity(constants.len());
    for &exploration in constants {
        log::info!("sweeping exploration constant {exploration}");
        let mut round = *config;
        round.side_b.exploration = exploration;
        let codes = (0..games)
            .map(|_| play_game(&round, rng).map(|report| report.code()))
            .collect::<Result<Vec<_>>>()?;
        rows.push(SweepRow { exploration, codes });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> MatchConfig {
        MatchConfig {
            side_a: PlayerConfig::random(),
            side_b: PlayerConfig {
                simulations: 10,
                exploration: 1.0,
                random: false,
            },
            ..MatchConfig::default()
        }
    }

    #[test]
    fn test_random_game_completes() {
        let config = MatchConfig {
            side_a: PlayerConfig::random(),
            side_b: PlayerConfig::random(),
            ..MatchConfig::default()
        };
        let mut rng = Rng::with_seed(2);
        let report = play_game(&config, &mut rng).unwrap();
        assert!(is_terminal(&report.final_state));
        assert_eq!(report.final_state.scoring_side(), Side::SideB);
        assert!(report.moves.len() >= 2);
        // The game ends on two passes in a row.
        let n = report.moves.len();
        assert!(report.moves[n - 1].is_pass());
        let code = report.code();
        match report.outcome {
            Outcome::Draw => assert_eq!(code, 0),
            Outcome::Win => assert_eq!(code, Side::SideB.code()),
            Outcome::Loss => assert_eq!(code, Side::SideA.code()),
        }
    }

    #[test]
    fn test_search_game_completes() {
        let mut rng = Rng::with_seed(4);
        let report = play_game(&quick(), &mut rng).unwrap();
        assert!(is_terminal(&report.final_state));
    }

    #[test]
    fn test_seeded_games_reproducible() {
        let a = play_game(&quick(), &mut Rng::with_seed(8)).unwrap();
        let b = play_game(&quick(), &mut Rng::with_seed(8)).unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.final_state, b.final_state);
    }

    #[test]
    fn test_choose_move_random_is_legal() {
        let state = GameState::new();
        let legal = legal_moves(&state).unwrap();
        let mut rng = Rng::with_seed(6);
        for _ in 0..20 {
            let mv = choose_move(&state, &PlayerConfig::random(), &mut rng).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut config = MatchConfig::default();
        config.side_a.simulations = 0;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let mut config = MatchConfig::default();
        config.side_b.exploration = f64::NAN;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let config = MatchConfig {
            width: 5,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidDimensions { .. })
        ));

        // Random players ignore their search settings.
        let mut config = MatchConfig::default();
        config.side_a = PlayerConfig {
            simulations: 0,
            ..PlayerConfig::random()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sweep_rows() {
        let mut rng = Rng::with_seed(10);
        let rows = sweep(&quick(), &[0.1, 2.0], 3, &mut rng).unwrap();
        assert_eq!(rows.len(), 2);
        for (row, c) in rows.iter().zip([0.1, 2.0]) {
            assert_eq!(row.exploration, c);
            assert_eq!(row.codes.len(), 3);
            assert_eq!(
                row.wins(Side::SideA) + row.wins(Side::SideB) + row.draws(),
                3
            );
        }
    }
}
