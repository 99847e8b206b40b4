//! End-of-game event handed to the host.
//!
//! The host forwards the result, together with its own identity token, to
//! the result-reporting backend. The engine only shapes the payload.

use super::policy::Mode;
use super::session::{HUMAN, OPPONENT};
use super::{Board, Outcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A finished game from the human's point of view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchResult {
    /// The human completed a line.
    Win,
    /// The computer completed a line.
    Lose,
    /// Full board, no line.
    Draw,
}

impl MatchResult {
    /// Maps a terminal outcome to the human's result. `None` while ongoing.
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Ongoing => None,
            Outcome::Win(mark) if mark == HUMAN => Some(MatchResult::Win),
            Outcome::Win(_) => Some(MatchResult::Lose),
            Outcome::Draw => Some(MatchResult::Draw),
        }
    }

    /// Status line shown when the game ends.
    pub fn headline(self) -> &'static str {
        match self {
            MatchResult::Win => "You win!",
            MatchResult::Lose => "The computer wins",
            MatchResult::Draw => "Draw",
        }
    }
}

/// Payload the host posts to the result endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ResultReport {
    /// `win`, `lose` or `draw`.
    result: MatchResult,
}

impl ResultReport {
    /// Serializes the report as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Emitted exactly once, by the move that ends a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameEnded {
    /// The terminal outcome (never [`Outcome::Ongoing`]).
    outcome: Outcome,
    /// The same outcome seen from the human's side.
    result: MatchResult,
    /// The final board.
    board: Board,
    /// The mode the game was played in.
    mode: Mode,
}

impl GameEnded {
    /// Builds the event for a terminal board. `None` if the game is still on.
    #[instrument(skip(board), fields(board = %board))]
    pub(crate) fn new(outcome: Outcome, board: Board, mode: Mode) -> Option<Self> {
        let result = MatchResult::from_outcome(outcome)?;
        Some(Self {
            outcome,
            result,
            board,
            mode,
        })
    }

    /// The payload for the result-reporting backend.
    pub fn report(&self) -> ResultReport {
        ResultReport {
            result: self.result,
        }
    }

    /// True when the opponent won.
    pub fn opponent_won(&self) -> bool {
        self.outcome == Outcome::Win(OPPONENT)
    }
}
