//! Automated games between a scripted human and the configured opponent.

use crate::cli::HumanStrategy;
use crate::config::HostConfig;
use anyhow::{Context, Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tictactoe_engine::{
    EasyPolicy, GameEnded, GameSession, HUMAN, MatchResult, MovePolicy, RandomPolicy,
    SmartPolicy, Transition,
};
use tracing::{debug, info, instrument};

/// Results from the human's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games the scripted human won.
    pub win: u32,
    /// Games the opponent won.
    pub lose: u32,
    /// Drawn games.
    pub draw: u32,
}

impl Tally {
    fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::Win => self.win += 1,
            MatchResult::Lose => self.lose += 1,
            MatchResult::Draw => self.draw += 1,
        }
    }

    /// Total games counted.
    pub fn games(&self) -> u32 {
        self.win + self.lose + self.draw
    }
}

fn human_policy(strategy: HumanStrategy, config: &HostConfig) -> Box<dyn MovePolicy> {
    match strategy {
        HumanStrategy::Random => Box::new(RandomPolicy),
        HumanStrategy::Easy => Box::new(EasyPolicy::new(*config.policy().easy_preference_rate())),
        HumanStrategy::Smart => Box::new(SmartPolicy::new(*config.policy().smart_blunder_rate())),
    }
}

fn play_one(
    session: &mut GameSession,
    human: &dyn MovePolicy,
    rng: &mut StdRng,
) -> Result<GameEnded> {
    loop {
        let position = human
            .choose(session.board(), HUMAN, rng)
            .ok_or_else(|| anyhow!("Scripted human found no empty square"))?;

        if let Transition::Finished(_, ended) = session.play_human_move(position.to_index())? {
            return Ok(ended);
        }
        if let Transition::Finished(_, ended) = session.run_opponent_turn()? {
            return Ok(ended);
        }
    }
}

/// Plays `games` games and tallies the results.
#[instrument(skip(config), fields(mode = %config.mode()))]
pub fn run(config: &HostConfig, human: HumanStrategy, games: u32) -> Result<Tally> {
    let mut session = config.new_session().context("Failed to start session")?;
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };
    let human = human_policy(human, config);
    let mut tally = Tally::default();

    for game in 0..games {
        session.start_or_reset(*config.mode());
        let ended = play_one(&mut session, human.as_ref(), &mut rng)
            .with_context(|| format!("Game {} failed", game))?;
        debug!(game, result = %ended.result(), board = %ended.board(), "Game finished");
        tally.record(*ended.result());
    }

    info!(?tally, "Simulation complete");
    Ok(tally)
}
