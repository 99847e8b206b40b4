//! Game rules for tic-tac-toe.
//!
//! Pure functions over board snapshots. They never assume turn parity, so
//! they answer for any arrangement of marks, reachable or not.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, WINNING_LINES};

use super::{Board, Outcome};
use tracing::instrument;

/// Evaluates a board: a completed line wins, otherwise a full board draws.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::Win(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Square};

    /// Decodes `code` as nine base-3 digits (0 empty, 1 X, 2 O).
    fn board_from_code(mut code: u32) -> Board {
        let mut squares = [Square::Empty; 9];
        for square in &mut squares {
            *square = match code % 3 {
                1 => Square::Occupied(Mark::X),
                2 => Square::Occupied(Mark::O),
                _ => Square::Empty,
            };
            code /= 3;
        }
        Board::from_squares(squares)
    }

    #[test]
    fn test_evaluate_is_consistent_on_every_board() {
        for code in 0..3u32.pow(9) {
            let board = board_from_code(code);
            match evaluate(&board) {
                Outcome::Win(mark) => assert_eq!(check_winner(&board), Some(mark)),
                Outcome::Draw => {
                    assert!(is_full(&board));
                    assert_eq!(check_winner(&board), None);
                }
                Outcome::Ongoing => {
                    assert!(!is_full(&board));
                    assert_eq!(check_winner(&board), None);
                }
            }
        }
    }

    #[test]
    fn test_full_board_with_line_is_win_not_draw() {
        let board: Board = "XXXOOXOXO".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Win(Mark::X));
    }

    #[test]
    fn test_evaluate_ignores_turn_parity() {
        // Unreachable by alternating play, still a win.
        let board: Board = "OOO......".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Win(Mark::O));
    }

    #[test]
    fn test_empty_board_is_ongoing() {
        assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
    }
}
