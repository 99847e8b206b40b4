//! Exhaustive minimax search.
//!
//! Scores are relative to one mark (`me`), the maximizing side. A win is
//! worth [`WIN_SCORE`] minus the ply depth at which it happens, so among
//! equal outcomes the search prefers the quickest win and the slowest loss.
//!
//! The search walks every empty square with place/recurse/restore on a
//! single mutable board. There is no pruning and no transposition table:
//! at most 9! leaves, which a 3x3 board affords.

use super::rules::check_winner;
use super::{Board, Mark, Position, Square};
use tracing::instrument;

/// Raw score of a won position before depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// Scores `board` for `me` by exhaustive minimax.
///
/// `maximizing` says whose ply it is: `true` places `me`, `false` places
/// `me.opponent()`. `depth` is the number of plies already searched and
/// shifts terminal scores toward zero.
///
/// The board is restored before returning.
pub fn score(board: &mut Board, depth: i32, maximizing: bool, me: Mark) -> i32 {
    match check_winner(board) {
        Some(winner) if winner == me => return WIN_SCORE - depth,
        Some(_) => return depth - WIN_SCORE,
        None => {}
    }

    let mark = if maximizing { me } else { me.opponent() };
    let mut best: Option<i32> = None;

    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }
        board.set(pos, Square::Occupied(mark));
        let child = score(board, depth + 1, !maximizing, me);
        board.set(pos, Square::Empty);

        best = Some(match best {
            None => child,
            Some(current) if maximizing => current.max(child),
            Some(current) => current.min(child),
        });
    }

    // No empty square and no winner: draw.
    best.unwrap_or(0)
}

/// Scores a snapshot without touching the caller's board.
#[instrument(skip(board), fields(board = %board))]
pub fn score_snapshot(board: &Board, depth: i32, maximizing: bool, me: Mark) -> i32 {
    let mut scratch = *board;
    score(&mut scratch, depth, maximizing, me)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_scores_shift_with_depth() {
        let won = parse("OOOXX.X..");
        assert_eq!(score_snapshot(&won, 0, true, Mark::O), 10);
        assert_eq!(score_snapshot(&won, 3, true, Mark::O), 7);
        assert_eq!(score_snapshot(&won, 3, true, Mark::X), -7);
    }

    #[test]
    fn test_full_board_without_line_scores_zero() {
        let drawn = parse("XOXOXXOXO");
        assert_eq!(score_snapshot(&drawn, 0, true, Mark::O), 0);
        assert_eq!(score_snapshot(&drawn, 0, false, Mark::X), 0);
    }

    #[test]
    fn test_empty_board_is_a_draw_under_perfect_play() {
        assert_eq!(score_snapshot(&Board::new(), 0, true, Mark::X), 0);
    }

    #[test]
    fn test_immediate_win_beats_slow_win() {
        // O to move can win at once in the middle row.
        let board = parse("XX.OO.X..");
        assert_eq!(score_snapshot(&board, 0, true, Mark::O), 9);
    }

    #[test]
    fn test_forced_loss_is_delayed() {
        // X threatens two lines; O to move can only block one.
        let board = parse("X.X.O...X");
        assert_eq!(score_snapshot(&board, 0, true, Mark::O), -8);
    }

    #[test]
    fn test_search_restores_board() {
        let mut board = parse("X...O....");
        let before = board;
        score(&mut board, 0, false, Mark::O);
        assert_eq!(board, before);
    }

    #[test]
    fn test_score_negates_under_mark_swap() {
        let boards = [
            "X........",
            "X...O....",
            "XX.OO....",
            "OX.X.O...",
            "X.X.O...X",
            "XOXOX....",
            "OOXXX.O..",
        ];
        for s in boards {
            let board = parse(s);
            for depth in [0, 2] {
                for maximizing in [true, false] {
                    let direct = score_snapshot(&board, depth, maximizing, Mark::O);
                    let mirrored =
                        score_snapshot(&board.swapped(), depth, !maximizing, Mark::O);
                    assert_eq!(mirrored, -direct, "board {s} depth {depth}");
                }
            }
        }
    }
}
