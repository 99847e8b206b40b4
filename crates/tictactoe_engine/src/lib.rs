//! Tic-tac-toe decision engine.
//!
//! A human (X) plays the computer (O) on a 3x3 board. The engine owns the
//! rules, the opponent's move policies and the session state machine; the
//! host owns rendering, timing and reporting results upstream.
//!
//! # Architecture
//!
//! - **Board**: [`Board`], [`Square`], [`Mark`], [`Position`]
//! - **Rules**: [`evaluate`] decides win, draw or ongoing
//! - **Search**: [`search::score`], exhaustive minimax
//! - **Policies**: [`EasyPolicy`] and [`SmartPolicy`] behind [`MovePolicy`]
//! - **Session**: [`GameSession`] sequences turns and emits [`GameEnded`]
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameSession, Mode, PolicyConfig, Transition};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = GameSession::seeded(Mode::Smart, PolicyConfig::default(), 7)?;
//! session.play_human_move(4)?;
//! if let Transition::Finished(_, ended) = session.run_opponent_turn()? {
//!     println!("{}", ended.report().to_json()?);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod policy;
mod position;
mod report;
pub mod rules;
pub mod search;
mod session;
mod types;

// Crate-level exports - Board model
pub use position::Position;
pub use types::{Board, Mark, Outcome, ParseBoardError, Square};

// Crate-level exports - Rules
pub use rules::{WINNING_LINES, check_winner, evaluate, is_full};

// Crate-level exports - Moves and errors
pub use action::{Move, MoveError};

// Crate-level exports - Policies
pub use config::{ConfigError, PolicyConfig};
pub use policy::{EasyPolicy, Mode, MovePolicy, RandomPolicy, SmartPolicy, random_empty};

// Crate-level exports - Session
pub use report::{GameEnded, MatchResult, ResultReport};
pub use session::{GameSession, HUMAN, OPPONENT, Phase, Transition};
