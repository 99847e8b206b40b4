//! Interactive terminal game.

use crate::config::HostConfig;
use anyhow::{Context, Result};
use tictactoe_engine::{GameEnded, GameSession, Mode, MoveError, Transition};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

/// A line typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place X on a square, 0-based.
    Square(usize),
    /// Start over in the current mode.
    Reset,
    /// Start over in another mode.
    SwitchMode(Mode),
    /// Leave.
    Quit,
    /// Show the key help.
    Help,
}

/// Parses one line of player input. Squares are typed 1-9.
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim().to_ascii_lowercase();
    if let Ok(number) = line.parse::<usize>() {
        return number.checked_sub(1).map(Input::Square);
    }
    match line.as_str() {
        "r" | "reset" | "restart" => Some(Input::Reset),
        "e" | "easy" => Some(Input::SwitchMode(Mode::Easy)),
        "s" | "smart" => Some(Input::SwitchMode(Mode::Smart)),
        "q" | "quit" | "exit" => Some(Input::Quit),
        "h" | "help" | "?" => Some(Input::Help),
        _ => None,
    }
}

const HELP: &str = "1-9 place X | r restart | e easy | s smart | q quit";

fn render(session: &GameSession) {
    println!("\n{}\n", session.board().display());
}

fn announce(ended: &GameEnded) -> Result<()> {
    println!("{}", ended.result().headline());
    // Stands in for the result report the host would post upstream.
    println!("{}", ended.report().to_json()?);
    info!(result = %ended.result(), mode = %ended.mode(), "Game ended");
    Ok(())
}

/// Runs the read-move-answer loop until the player quits or stdin closes.
#[instrument(skip(config), fields(mode = %config.mode()))]
pub async fn run(config: HostConfig) -> Result<()> {
    let mut session = config.new_session().context("Failed to start session")?;
    let delay = Duration::from_millis(*config.think_delay_ms());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Mode: {}  ({})", session.mode(), HELP);
    render(&session);

    while let Some(line) = lines.next_line().await? {
        let Some(input) = parse_input(&line) else {
            println!("{}", HELP);
            continue;
        };
        debug!(?input, "Player input");

        match input {
            Input::Quit => break,
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Reset => {
                let mode = session.mode();
                session.start_or_reset(mode);
                println!("New game ({})", mode);
            }
            Input::SwitchMode(mode) => {
                session.start_or_reset(mode);
                println!("New game ({})", mode);
            }
            Input::Square(index) => match session.play_human_move(index) {
                Ok(Transition::Finished(_, ended)) => {
                    render(&session);
                    announce(&ended)?;
                    continue;
                }
                Ok(Transition::Continue(_)) => {
                    render(&session);
                    println!("The computer is thinking...");
                    sleep(delay).await;

                    let reply = session.run_opponent_turn()?;
                    println!("Computer plays {}", reply.played().position);
                    if let Transition::Finished(_, ended) = reply {
                        render(&session);
                        announce(&ended)?;
                        continue;
                    }
                }
                Err(MoveError::GameOver) => {
                    println!("Game over. Press r to play again.");
                    continue;
                }
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
        }

        render(&session);
        println!("Your move");
    }

    info!("Leaving game");
    Ok(())
}
