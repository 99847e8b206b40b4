//! Command-line interface for the tic-tac-toe host.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictactoe_engine::Mode;

/// Tic-tac-toe against the computer, in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against an easy or smart computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "tictactoe.toml", global = true)]
    pub config: PathBuf,

    /// Log filter, e.g. `debug` or `tictactoe_engine=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively: type 1-9 to move
    Play {
        /// Opponent mode (easy or smart)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Seed for the opponent's dice
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play automated games and print the tally as JSON
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// How the scripted human chooses its moves
        #[arg(long, value_enum, default_value = "random")]
        human: HumanStrategy,

        /// Opponent mode (easy or smart)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Seed for both sides' dice
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Move choice for the scripted human in `simulate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HumanStrategy {
    /// Uniformly random empty square.
    Random,
    /// The easy opponent's heuristic, playing X.
    Easy,
    /// The smart opponent's search, playing X.
    Smart,
}
