//! Opponent move-selection policies.
//!
//! A policy looks at a board snapshot and picks one empty square for the
//! mark it is told to place. Dice rolls come from the caller's generator so
//! a seeded generator replays the same game.

use super::config::PolicyConfig;
use super::search;
use super::{Board, Mark, Position, Square};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Chooses a move for `mark` on a board.
pub trait MovePolicy: std::fmt::Debug + Send + Sync {
    /// Returns an empty square, or `None` when the board is full.
    fn choose(&self, board: &Board, mark: Mark, rng: &mut dyn RngCore) -> Option<Position>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Picks uniformly among the empty squares.
#[instrument(level = "trace", skip_all)]
pub fn random_empty(board: &Board, rng: &mut dyn RngCore) -> Option<Position> {
    let moves = Position::valid_moves(board);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

// ─────────────────────────────────────────────────────────────
//  Random
// ─────────────────────────────────────────────────────────────

/// Plays a uniformly random empty square every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose(&self, board: &Board, _mark: Mark, rng: &mut dyn RngCore) -> Option<Position> {
        random_empty(board, rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

// ─────────────────────────────────────────────────────────────
//  Easy
// ─────────────────────────────────────────────────────────────

/// Positional heuristic with a random escape.
///
/// Most of the time it takes the first empty square in [`EasyPolicy::PRIORITY`]
/// (center, corners, edges). Otherwise it plays anywhere, which can hand the
/// human a win it could not have forced. That is what keeps easy beatable.
#[derive(Debug, Clone, Copy)]
pub struct EasyPolicy {
    preference_rate: f64,
}

impl EasyPolicy {
    /// Center first, then corners, then edges.
    pub const PRIORITY: [Position; 9] = [
        Position::Center,
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
        Position::TopCenter,
        Position::MiddleLeft,
        Position::MiddleRight,
        Position::BottomCenter,
    ];

    /// Creates the policy. `preference_rate` must lie in `[0, 1]`.
    pub fn new(preference_rate: f64) -> Self {
        Self { preference_rate }
    }

    /// The first empty square in priority order.
    pub fn preferred(board: &Board) -> Option<Position> {
        Self::PRIORITY.iter().copied().find(|pos| board.is_empty(*pos))
    }
}

impl Default for EasyPolicy {
    fn default() -> Self {
        Self::new(*PolicyConfig::default().easy_preference_rate())
    }
}

impl MovePolicy for EasyPolicy {
    #[instrument(skip(self, board, rng), fields(board = %board))]
    fn choose(&self, board: &Board, mark: Mark, rng: &mut dyn RngCore) -> Option<Position> {
        if let Some(pos) = Self::preferred(board)
            && rng.random_bool(self.preference_rate)
        {
            debug!(position = %pos, "Easy policy took preferred square");
            return Some(pos);
        }

        let pos = random_empty(board, rng);
        debug!(position = ?pos, "Easy policy played a random square");
        pos
    }

    fn name(&self) -> &'static str {
        "easy"
    }
}

// ─────────────────────────────────────────────────────────────
//  Smart
// ─────────────────────────────────────────────────────────────

/// Minimax-backed policy with an occasional deliberate blunder.
#[derive(Debug, Clone, Copy)]
pub struct SmartPolicy {
    blunder_rate: f64,
}

impl SmartPolicy {
    /// Creates the policy. `blunder_rate` must lie in `[0, 1]`.
    pub fn new(blunder_rate: f64) -> Self {
        Self { blunder_rate }
    }

    /// The deterministic branch: the empty square with the strictly best
    /// minimax score for `mark`, lowest index on ties.
    ///
    /// Each candidate is scored as if the other side moves next.
    #[instrument(skip(board), fields(board = %board))]
    pub fn best_move(board: &Board, mark: Mark) -> Option<Position> {
        let mut scratch = *board;
        let mut best: Option<(Position, i32)> = None;

        for pos in Position::ALL {
            if !scratch.is_empty(pos) {
                continue;
            }
            scratch.set(pos, Square::Occupied(mark));
            let value = search::score(&mut scratch, 0, false, mark);
            scratch.set(pos, Square::Empty);

            trace!(position = %pos, value, "Scored candidate");
            if best.is_none_or(|(_, top)| value > top) {
                best = Some((pos, value));
            }
        }

        if let Some((pos, value)) = best {
            debug!(position = %pos, value, "Smart policy chose best square");
        }
        best.map(|(pos, _)| pos)
    }
}

impl Default for SmartPolicy {
    fn default() -> Self {
        Self::new(*PolicyConfig::default().smart_blunder_rate())
    }
}

impl MovePolicy for SmartPolicy {
    #[instrument(skip(self, board, rng), fields(board = %board))]
    fn choose(&self, board: &Board, mark: Mark, rng: &mut dyn RngCore) -> Option<Position> {
        if rng.random_bool(self.blunder_rate) {
            let pos = random_empty(board, rng);
            debug!(position = ?pos, "Smart policy blundered on purpose");
            return pos;
        }
        Self::best_move(board, mark)
    }

    fn name(&self) -> &'static str {
        "smart"
    }
}

// ─────────────────────────────────────────────────────────────
//  Mode
// ─────────────────────────────────────────────────────────────

/// Difficulty the host selects for the opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// Positional heuristic with randomness.
    #[default]
    Easy,
    /// Minimax search with occasional random moves.
    Smart,
}

impl Mode {
    /// Builds the policy this mode plays with.
    #[instrument(skip(config))]
    pub fn policy(self, config: &PolicyConfig) -> Box<dyn MovePolicy> {
        match self {
            Mode::Easy => Box::new(EasyPolicy::new(*config.easy_preference_rate())),
            Mode::Smart => Box::new(SmartPolicy::new(*config.smart_blunder_rate())),
        }
    }
}
