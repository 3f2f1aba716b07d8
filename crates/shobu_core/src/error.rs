use thiserror::Error;

/// Failures an agent can report for a single move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// A non-terminal state offered no legal action.
    #[error("no legal move in a non-terminal state")]
    NoLegalMove,
    /// The deadline expired before a single ply was searched.
    #[error("search deadline exceeded before the first ply completed")]
    DeadlineExceeded,
    /// The rule engine handed over a malformed state.
    #[error("invalid game state: {0}")]
    InvalidState(String),
}
