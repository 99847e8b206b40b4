//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. A rejected move is reported
//! as a [`MoveError`] and leaves the session exactly as it was.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The position where the mark is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }

    /// Returns the mark placed by this move.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a session refused an input.
///
/// Every variant except [`MoveError::NoMoveAvailable`] is ordinary invalid
/// input the host can drop on the floor. `NoMoveAvailable` means the
/// opponent was asked to move on a full board, which correct sequencing
/// never does.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is not a board square.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The opponent is still thinking.
    #[display("Waiting for the opponent to move")]
    OpponentThinking,

    /// The opponent was asked to move while it is the human's turn.
    #[display("It is not the opponent's turn")]
    NotOpponentTurn,

    /// The policy found no empty square.
    #[display("No move available")]
    NoMoveAvailable,
}

impl std::error::Error for MoveError {}
