//! Game session controller.
//!
//! The session owns the canonical board and walks a small state machine:
//!
//! ```text
//! AwaitingHuman --play_human_move--> OpponentThinking --run_opponent_turn--> AwaitingHuman
//!       |                                  |
//!       +------------ Finished(outcome) <--+
//! ```
//!
//! The host decides when the opponent moves (typically after a short
//! "thinking" delay) by calling [`GameSession::run_opponent_turn`]. Every
//! call is synchronous and leaves the session untouched when it fails.

use super::action::{Move, MoveError};
use super::config::{ConfigError, PolicyConfig};
use super::policy::{Mode, MovePolicy};
use super::report::GameEnded;
use super::rules::evaluate;
use super::{Board, Mark, Outcome, Position, Square};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// The human always plays X and moves first.
pub const HUMAN: Mark = Mark::X;

/// The computer always plays O.
pub const OPPONENT: Mark = Mark::O;

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human's move.
    AwaitingHuman,
    /// The human has moved; the opponent moves next.
    OpponentThinking,
    /// The game is over. The outcome is never [`Outcome::Ongoing`].
    Finished(Outcome),
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The move was applied and the game goes on.
    Continue(Move),
    /// The move was applied and ended the game.
    Finished(Move, GameEnded),
}

impl Transition {
    /// The move that was applied.
    pub fn played(&self) -> Move {
        match self {
            Transition::Continue(mv) | Transition::Finished(mv, _) => *mv,
        }
    }

    /// The end-of-game event, if this move ended the game.
    pub fn ended(&self) -> Option<&GameEnded> {
        match self {
            Transition::Continue(_) => None,
            Transition::Finished(_, ended) => Some(ended),
        }
    }
}

/// One human-versus-computer game.
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    board: Board,
    mode: Mode,
    phase: Phase,
    config: PolicyConfig,
    policy: Box<dyn MovePolicy>,
    rng: R,
}

impl GameSession<StdRng> {
    /// Creates a session whose dice are seeded from the operating system.
    #[instrument(skip(config))]
    pub fn from_os_rng(mode: Mode, config: PolicyConfig) -> Result<Self, ConfigError> {
        Self::new(mode, config, StdRng::from_os_rng())
    }

    /// Creates a session with reproducible dice.
    #[instrument(skip(config))]
    pub fn seeded(mode: Mode, config: PolicyConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(mode, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> GameSession<R> {
    /// Creates a session on an empty board, waiting for the human.
    #[instrument(skip(config, rng))]
    pub fn new(mode: Mode, config: PolicyConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(%mode, "Starting new game session");
        Ok(Self {
            board: Board::new(),
            mode,
            phase: Phase::AwaitingHuman,
            config,
            policy: mode.policy(&config),
            rng,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mode the opponent plays in.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the outcome recomputed from the board.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    /// True once the game is over.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// True while the opponent has yet to answer the human's move.
    pub fn is_awaiting_opponent(&self) -> bool {
        self.phase == Phase::OpponentThinking
    }

    /// Clears the board and waits for the human, from any phase.
    ///
    /// This is also the only way to change mode: a new mode always starts a
    /// new game.
    #[instrument(skip(self), fields(previous = %self.mode))]
    pub fn start_or_reset(&mut self, mode: Mode) {
        if !self.is_finished() && self.board != Board::new() {
            debug!(phase = ?self.phase, "Abandoning game in progress");
        }
        self.board = Board::new();
        self.phase = Phase::AwaitingHuman;
        if mode != self.mode {
            self.policy = mode.policy(&self.config);
        }
        self.mode = mode;
        info!(%mode, "Game reset");
    }

    /// Places the human's mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Rejects the move, changing nothing, when the game is over, the
    /// opponent has not answered yet, the index is off the board or the
    /// square is taken.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn play_human_move(&mut self, index: usize) -> Result<Transition, MoveError> {
        let position = match self.phase {
            Phase::Finished(_) => Err(MoveError::GameOver),
            Phase::OpponentThinking => Err(MoveError::OpponentThinking),
            Phase::AwaitingHuman => Position::from_index(index)
                .ok_or(MoveError::OutOfBounds(index))
                .and_then(|pos| {
                    if self.board.is_empty(pos) {
                        Ok(pos)
                    } else {
                        Err(MoveError::SquareOccupied(pos))
                    }
                }),
        }
        .inspect_err(|e| debug!(error = %e, "Human move rejected"))?;

        let transition = self.apply(Move::new(HUMAN, position), Phase::OpponentThinking);
        Ok(transition)
    }

    /// Lets the configured policy answer the human's move.
    ///
    /// # Errors
    ///
    /// [`MoveError::NotOpponentTurn`] or [`MoveError::GameOver`] when called
    /// out of turn. [`MoveError::NoMoveAvailable`] if the policy finds a full
    /// board, which the phase machine rules out.
    #[instrument(skip(self), fields(mode = %self.mode, policy = self.policy.name()))]
    pub fn run_opponent_turn(&mut self) -> Result<Transition, MoveError> {
        match self.phase {
            Phase::OpponentThinking => {}
            Phase::Finished(_) => return Err(MoveError::GameOver),
            Phase::AwaitingHuman => {
                debug!("Opponent turn requested while awaiting human");
                return Err(MoveError::NotOpponentTurn);
            }
        }

        let Some(position) = self.policy.choose(&self.board, OPPONENT, &mut self.rng) else {
            error!(board = %self.board, "Policy found no empty square mid-game");
            return Err(MoveError::NoMoveAvailable);
        };

        if !self.board.is_empty(position) {
            error!(%position, "Policy chose an occupied square");
            return Err(MoveError::SquareOccupied(position));
        }

        Ok(self.apply(Move::new(OPPONENT, position), Phase::AwaitingHuman))
    }

    /// Places a validated move and advances the phase.
    fn apply(&mut self, mv: Move, next: Phase) -> Transition {
        self.board.set(mv.position, Square::Occupied(mv.mark));
        debug!(%mv, board = %self.board, "Move applied");
        assert_invariants(&self.board);

        let outcome = evaluate(&self.board);
        match GameEnded::new(outcome, self.board, self.mode) {
            Some(ended) => {
                self.phase = Phase::Finished(outcome);
                info!(%outcome, result = %ended.result(), "Game finished");
                Transition::Finished(mv, ended)
            }
            None => {
                self.phase = next;
                Transition::Continue(mv)
            }
        }
    }
}

/// Turn parity holds for every board the session builds: X moves first and
/// turns alternate.
fn turn_parity_holds(board: &Board) -> bool {
    let humans = board.count(HUMAN);
    let opponents = board.count(OPPONENT);
    let valid = humans == opponents || humans == opponents + 1;
    if !valid {
        warn!(humans, opponents, "Turn parity violated");
    }
    valid
}

fn assert_invariants(board: &Board) {
    debug_assert!(turn_parity_holds(board), "Turn parity violated");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deterministic(mode: Mode) -> GameSession {
        GameSession::seeded(mode, PolicyConfig::deterministic(), 1).unwrap()
    }

    #[test]
    fn test_new_session_awaits_human_on_empty_board() {
        let session = deterministic(Mode::Easy);
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert!(!session.is_finished());
        assert!(!session.is_awaiting_opponent());
    }

    #[test]
    fn test_human_move_hands_turn_to_opponent() {
        let mut session = deterministic(Mode::Easy);
        let transition = session.play_human_move(0).unwrap();
        assert_eq!(transition, Transition::Continue(Move::new(HUMAN, Position::TopLeft)));
        assert!(session.is_awaiting_opponent());

        let transition = session.run_opponent_turn().unwrap();
        assert_eq!(transition.played(), Move::new(OPPONENT, Position::Center));
        assert_eq!(session.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn test_moves_rejected_while_opponent_thinking() {
        let mut session = deterministic(Mode::Smart);
        session.play_human_move(4).unwrap();
        let before = *session.board();

        assert_eq!(session.play_human_move(0), Err(MoveError::OpponentThinking));
        assert_eq!(session.board(), &before);
        assert_eq!(session.phase(), Phase::OpponentThinking);
    }

    #[test]
    fn test_opponent_turn_rejected_out_of_turn() {
        let mut session = deterministic(Mode::Smart);
        assert_eq!(session.run_opponent_turn(), Err(MoveError::NotOpponentTurn));
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut session = deterministic(Mode::Easy);
        assert_eq!(session.play_human_move(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(session.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn test_reset_changes_mode_and_policy() {
        let mut session = deterministic(Mode::Easy);
        session.play_human_move(0).unwrap();
        session.start_or_reset(Mode::Smart);
        assert_eq!(session.mode(), Mode::Smart);
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert_eq!(session.policy.name(), "smart");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config: PolicyConfig =
            serde_json::from_str(r#"{"easy_preference_rate": 2.0}"#).unwrap();
        assert!(GameSession::seeded(Mode::Easy, config, 0).is_err());
    }

    #[test]
    fn test_parity_check() {
        assert!(turn_parity_holds(&"X........".parse().unwrap()));
        assert!(turn_parity_holds(&"XO.......".parse().unwrap()));
        assert!(!turn_parity_holds(&"XX.......".parse().unwrap()));
        assert!(!turn_parity_holds(&"O........".parse().unwrap()));
    }
}
