//! Per-move entry point tying depth control, search and fallbacks together.

use std::time::{Duration, Instant};

use shobu_core::{Action, Agent, AgentError, GameState, Player, Rules, SearchLimits};
use tracing::{info, warn};

use crate::config::AgentConfig;
use crate::depth::DepthController;
use crate::eval::Evaluator;
use crate::ordering::MoveOrderer;
use crate::search::{AlphaBetaEngine, OrderActions, RulesTree, SearchReport, SearchStats};

/// Shobu agent using iterative-deepening alpha-beta.
///
/// This agent uses:
/// - Alpha-beta search with a hard per-move deadline
/// - Mover-relative move ordering (captures and central cells first)
/// - Agent-relative evaluation with adaptive attack/defense weights
/// - A depth limit adjusted between moves from the previous move's cost
pub struct AlphaBetaAgent<R> {
    rules: R,
    player: Player,
    config: AgentConfig,
    depth: DepthController,
    /// Report of the most recent move
    last_report: Option<SearchReport<Action>>,
    /// Accumulated over the current game
    game_stats: SearchStats,
}

impl<R: Rules> AlphaBetaAgent<R> {
    pub fn new(rules: R, player: Player) -> Self {
        Self::with_config(rules, player, AgentConfig::default())
    }

    pub fn with_config(rules: R, player: Player, config: AgentConfig) -> Self {
        let depth = DepthController::new(config.depth.clone(), player);
        Self {
            rules,
            player,
            config,
            depth,
            last_report: None,
            game_stats: SearchStats::default(),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn depth_controller(&self) -> &DepthController {
        &self.depth
    }

    pub fn last_report(&self) -> Option<&SearchReport<Action>> {
        self.last_report.as_ref()
    }

    pub fn game_stats(&self) -> SearchStats {
        self.game_stats
    }

    /// Iterative-deepening search of `state` within `limits`.
    pub fn search(
        &self,
        state: &GameState,
        limits: &SearchLimits,
    ) -> Result<SearchReport<Action>, AgentError> {
        let tree = RulesTree(&self.rules);
        let evaluator = Evaluator::new(&self.rules, self.player, &self.config.eval);
        let orderer = MoveOrderer::new(&self.config.ordering);
        let time_control = limits
            .time_control
            .clone()
            .with_check_interval(self.config.search.check_interval);

        let mut engine =
            AlphaBetaEngine::new(&tree, &evaluator, &orderer).with_time_control(&time_control);
        engine.iterative_deepening(state, limits.depth)
    }

    /// Renders the root actions of `state` with their values at `depth`.
    pub fn explain(&self, state: &GameState, depth: u32) -> Result<String, AgentError> {
        let tree = RulesTree(&self.rules);
        let evaluator = Evaluator::new(&self.rules, self.player, &self.config.eval);
        let orderer = MoveOrderer::new(&self.config.ordering);
        AlphaBetaEngine::new(&tree, &evaluator, &orderer).trace(state, depth)
    }

    /// Action played when the search scored no root action.
    fn fallback_action(&self, state: &GameState) -> Result<Action, AgentError> {
        MoveOrderer::new(&self.config.ordering)
            .order(state, true)
            .into_iter()
            .next()
            .ok_or(AgentError::NoLegalMove)
    }
}

impl<R: Rules> Agent for AlphaBetaAgent<R> {
    fn play(&mut self, state: &GameState, remaining: Duration) -> Result<Action, AgentError> {
        state.validate()?;
        if state.actions.is_empty() {
            return Err(AgentError::NoLegalMove);
        }
        if state.to_move != self.player {
            warn!(agent = ?self.player, to_move = ?state.to_move, "asked to play out of turn");
        }

        let started = Instant::now();
        let depth_limit = self.depth.adjust(remaining, state);
        let mut limits =
            SearchLimits::depth_and_time(depth_limit, self.config.search.move_time(remaining));
        limits.start();

        let report = match self.search(state, &limits) {
            Ok(report) => report,
            // The root has actions, so a dead end lies below it.
            Err(AgentError::NoLegalMove) => {
                warn!(depth_limit, "search reached a live state without actions");
                SearchReport {
                    value: f64::NEG_INFINITY,
                    best_action: None,
                    depth: 0,
                    stopped: false,
                    stats: SearchStats::default(),
                    elapsed: started.elapsed(),
                }
            }
            Err(e) => return Err(e),
        };

        let action = match report.best_action {
            Some(action) => action,
            None => {
                warn!(depth_limit, "no root action scored, using ordering fallback");
                self.fallback_action(state)?
            }
        };
        if report.stopped && report.depth > 0 {
            warn!(
                completed = report.depth,
                depth_limit, "deadline hit, playing result of last completed depth"
            );
        }

        let elapsed = started.elapsed();
        self.depth.record_move(elapsed);
        self.game_stats += report.stats;
        info!(
            %action,
            value = report.value,
            depth = report.depth,
            depth_limit,
            nodes = report.stats.nodes,
            elapsed_ms = elapsed.as_millis() as u64,
            "move chosen"
        );
        self.last_report = Some(report);
        Ok(action)
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        self.depth.reset();
        self.last_report = None;
        self.game_stats = SearchStats::default();
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod agent_tests;
