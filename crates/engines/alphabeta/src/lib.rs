//! Alpha-Beta Shobu Agent
//!
//! Depth-limited minimax with alpha-beta pruning under a per-move deadline.
//! The evaluator scores positions for the agent; the move orderer scores
//! actions for whoever is to move. The depth limit is re-tuned between moves
//! from how long the previous move took and how the game is going.

mod agent;
pub mod config;
pub mod depth;
pub mod eval;
pub mod ordering;
pub mod policy;
pub mod search;
pub mod threat;

pub use agent::AlphaBetaAgent;
pub use config::{AgentConfig, ConfigError, SearchConfig};
pub use depth::{DepthConfig, DepthController, PhaseCeiling, TimingState};
pub use eval::{Breakdown, EvalWeights, Evaluator, Features, SideFeatures};
pub use ordering::{MoveOrderer, OrderingWeights};
pub use policy::{WeightPolicy, WeightRule};
pub use search::{
    AlphaBetaEngine, Evaluate, GameTree, OrderActions, RulesTree, SearchContext, SearchReport,
    SearchStats,
};
