//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A mark a side places on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (always the human, goes first).
    X,
    /// Mark O (always the computer opponent).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Mark::X) => 'X',
            Square::Occupied(Mark::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// The board accepts any arrangement of marks. Turn parity is a property
/// of the session that fills it, not of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Counts the squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Returns a copy with X and O exchanged.
    pub fn swapped(&self) -> Self {
        let mut squares = self.squares;
        for square in &mut squares {
            if let Square::Occupied(mark) = *square {
                *square = Square::Occupied(mark.opponent());
            }
        }
        Self { squares }
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number so a player can type it.
    #[instrument(skip(self))]
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(Mark::X) => "X".to_string(),
                    Square::Occupied(Mark::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for square in &self.squares {
            write!(f, "{}", square.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing a board from its compact nine-character form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    /// The input did not have exactly nine squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// A character other than `X`, `O`, `.`, `_` or `-` was found.
    #[display("Invalid square character {:?}", _0)]
    InvalidSquare(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses `"XX.OO...."` style boards (whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(ParseBoardError::WrongLength(chars.len()));
        }

        let mut squares = [Square::Empty; 9];
        for (square, c) in squares.iter_mut().zip(chars) {
            *square = match c.to_ascii_uppercase() {
                'X' => Square::Occupied(Mark::X),
                'O' => Square::Occupied(Mark::O),
                '.' | '_' | '-' => Square::Empty,
                other => return Err(ParseBoardError::InvalidSquare(other)),
            };
        }
        Ok(Self { squares })
    }
}

/// Result of evaluating a board.
///
/// Always derived from the board, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner and at least one empty square.
    Ongoing,
    /// A mark holds a full line.
    Win(Mark),
    /// Board full with no winning line.
    Draw,
}

impl Outcome {
    /// Returns true once the game can no longer continue.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(*mark),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win(mark) => write!(f, "{} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
