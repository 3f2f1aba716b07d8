//! Random Shobu Agent
//!
//! Picks uniformly among the legal actions the rule engine hands over.
//! Useful for:
//! - Driving the search agent through whole games in tests
//! - Baseline comparisons (any real agent should easily beat this)

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shobu_core::{Action, Agent, AgentError, GameState};
use tracing::trace;


/// An agent that plays random legal actions.
///
/// Seeded agents replay the same game against the same opponent, which is
/// what tests want.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
    moves: u64,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            moves: 0,
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            moves: 0,
        }
    }

    /// Actions played since the last `new_game`.
    pub fn moves(&self) -> u64 {
        self.moves
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Agent for RandomAgent {
    fn play(&mut self, state: &GameState, _remaining: Duration) -> Result<Action, AgentError> {
        state.validate()?;
        let action = *state
            .actions
            .choose(&mut self.rng)
            .ok_or(AgentError::NoLegalMove)?;
        self.moves += 1;
        trace!(%action, choices = state.actions.len(), "random action");
        Ok(action)
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.moves = 0;
    }
}
