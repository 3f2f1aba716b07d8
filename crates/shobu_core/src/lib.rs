pub mod error;
pub mod rules;
pub mod state;
pub mod stones;
pub mod time_control;
pub mod types;

// Re-export shared game types (no search logic lives here)
pub use error::*;
pub use rules::*;
pub use state::*;
pub use stones::*;
pub use time_control::*;
pub use types::*;

use std::time::Duration;

// =============================================================================
// Agent trait: implemented by every player (alpha-beta, random, ...)
// =============================================================================

/// Trait that all Shobu agents implement.
///
/// The match harness owns the clock and the rule engine; an agent only sees
/// the current state and how much of its game budget is left.
pub trait Agent {
    /// Choose an action for `state`.
    ///
    /// # Arguments
    /// * `state` - The current state, with `to_move` equal to this agent
    /// * `remaining` - Time left on this agent's clock for the whole game
    ///
    /// # Returns
    /// A legal action from `state.actions`, or `NoLegalMove` when that list
    /// is empty.
    fn play(&mut self, state: &GameState, remaining: Duration) -> Result<Action, AgentError>;

    /// Returns the agent's display name
    fn name(&self) -> &str;

    /// Reset per-game state (time budget, depth limit, ...)
    fn new_game(&mut self) {}
}
