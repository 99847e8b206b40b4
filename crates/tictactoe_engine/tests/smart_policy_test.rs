//! Tests for the minimax-backed smart policy.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe_engine::{
    Board, GameSession, Mark, Mode, MovePolicy, Outcome, PolicyConfig, Position, SmartPolicy,
    Square, evaluate,
};

/// Walks every line of human (X) play against the deterministic smart
/// policy (O), returning how many finished games were reached.
fn explore_all_human_lines(board: Board) -> usize {
    let mut games = 0;
    for human in Position::valid_moves(&board) {
        let mut after_human = board;
        after_human.set(human, Square::Occupied(Mark::X));
        match evaluate(&after_human) {
            Outcome::Win(Mark::X) => panic!("human forced a win: {after_human}"),
            Outcome::Ongoing => {}
            _ => {
                games += 1;
                continue;
            }
        }

        let reply = SmartPolicy::best_move(&after_human, Mark::O).expect("empty square");
        let mut after_reply = after_human;
        after_reply.set(reply, Square::Occupied(Mark::O));
        match evaluate(&after_reply) {
            Outcome::Ongoing => games += explore_all_human_lines(after_reply),
            Outcome::Win(Mark::X) => unreachable!("opponent move cannot win for X"),
            _ => games += 1,
        }
    }
    games
}

#[test]
fn test_human_cannot_force_a_win() {
    let games = explore_all_human_lines(Board::new());
    assert!(games > 0);
}

#[test]
fn test_self_play_is_a_draw() {
    let mut board = Board::new();
    let mut mark = Mark::X;

    while evaluate(&board) == Outcome::Ongoing {
        let pos = SmartPolicy::best_move(&board, mark).expect("empty square");
        assert!(board.is_empty(pos));
        board.set(pos, Square::Occupied(mark));
        mark = mark.opponent();
    }

    assert_eq!(evaluate(&board), Outcome::Draw, "final board {board}");
}

#[test]
fn test_completes_middle_row() {
    let board: Board = "XX.OO....".parse().unwrap();
    assert_eq!(SmartPolicy::best_move(&board, Mark::O), Some(Position::MiddleRight));
}

#[test]
fn test_takes_win_over_block() {
    let board: Board = "OO.XX....".parse().unwrap();
    assert_eq!(SmartPolicy::best_move(&board, Mark::O), Some(Position::TopRight));
}

#[test]
fn test_best_move_does_not_touch_board() {
    let board: Board = "X...O...X".parse().unwrap();
    let copy = board;
    SmartPolicy::best_move(&board, Mark::O);
    assert_eq!(board, copy);
}

#[test]
fn test_choose_always_plays_empty_square() {
    let policy = SmartPolicy::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let board: Board = "XO..X....".parse().unwrap();
    for _ in 0..50 {
        let pos = policy.choose(&board, Mark::O, &mut rng).unwrap();
        assert!(board.is_empty(pos));
    }
}

#[test]
fn test_session_with_deterministic_smart_never_loses() {
    for seed in 0..20u64 {
        let mut session =
            GameSession::seeded(Mode::Smart, PolicyConfig::deterministic(), seed).unwrap();
        let mut human_rng = StdRng::seed_from_u64(seed + 1000);

        while !session.is_finished() {
            let pos = tictactoe_engine::random_empty(session.board(), &mut human_rng).unwrap();
            session.play_human_move(pos.to_index()).unwrap();
            if session.is_awaiting_opponent() {
                session.run_opponent_turn().unwrap();
            }
        }

        assert_ne!(session.outcome(), Outcome::Win(Mark::X), "seed {seed}");
    }
}
