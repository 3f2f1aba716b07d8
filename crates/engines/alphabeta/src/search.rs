//! Alpha-beta search with iterative deepening and a hard deadline.
//!
//! The engine is generic over the game so the same code runs against the
//! Shobu rule engine in play and against small hand-built trees in tests.
//! Maximizing and minimizing plies share one recursive function; which side
//! a node belongs to follows recursion parity, never the state's mover.

use std::fmt::Debug;
use std::ops::AddAssign;
use std::time::{Duration, Instant};

use shobu_core::{Action, AgentError, GameState, Rules, TimeControl};
use tracing::{debug, warn};

/// Transition model the search walks.
pub trait GameTree {
    type State;
    type Action: Clone + PartialEq + Debug;

    fn is_terminal(&self, state: &Self::State) -> bool;
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;
}

/// Static evaluation at cutoff nodes, always from the searching agent's side.
pub trait Evaluate<S> {
    fn evaluate(&self, state: &S) -> f64;
}

/// Children of a node in the order they should be searched.
pub trait OrderActions<S, A> {
    fn order(&self, state: &S, maximizing: bool) -> Vec<A>;
}

/// Adapts a Shobu rule engine to [`GameTree`].
#[derive(Debug, Clone, Copy)]
pub struct RulesTree<R>(pub R);

impl<R: Rules> GameTree for RulesTree<R> {
    type State = GameState;
    type Action = Action;

    fn is_terminal(&self, state: &GameState) -> bool {
        self.0.is_terminal(state)
    }

    fn result(&self, state: &GameState, action: &Action) -> GameState {
        self.0.result(state, action)
    }
}

/// Counters for one search call. Callers combine them with `+=`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaf_evaluations: u64,
    /// Nodes left early because the window closed
    pub cutoffs: u64,
    pub ordering_time: Duration,
    pub evaluation_time: Duration,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.leaf_evaluations += rhs.leaf_evaluations;
        self.cutoffs += rhs.cutoffs;
        self.ordering_time += rhs.ordering_time;
        self.evaluation_time += rhs.evaluation_time;
    }
}

/// Per-node search window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchContext {
    pub depth_limit: u32,
    pub depth: u32,
    pub alpha: f64,
    pub beta: f64,
    pub maximizing: bool,
}

impl SearchContext {
    /// Full window at the root, agent to play.
    pub fn root(depth_limit: u32) -> Self {
        Self {
            depth_limit,
            depth: 0,
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
            maximizing: true,
        }
    }

    fn child(&self) -> Self {
        Self {
            depth: self.depth + 1,
            maximizing: !self.maximizing,
            ..*self
        }
    }
}

/// Outcome of an iterative-deepening search.
#[derive(Debug, Clone)]
pub struct SearchReport<A> {
    /// Value of the last completed iteration. When no iteration completed
    /// this is the best partial root value, or negative infinity.
    pub value: f64,
    pub best_action: Option<A>,
    /// Deepest fully completed iteration (0 = none)
    pub depth: u32,
    /// True if the deadline or a stop request cut the search short
    pub stopped: bool,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

pub struct AlphaBetaEngine<'a, G: GameTree, E, O> {
    game: &'a G,
    evaluator: &'a E,
    orderer: &'a O,
    time_control: Option<&'a TimeControl>,
    stats: SearchStats,
    /// Best root child of the iteration in progress
    root_best: Option<(f64, G::Action)>,
}

impl<'a, G, E, O> AlphaBetaEngine<'a, G, E, O>
where
    G: GameTree,
    E: Evaluate<G::State>,
    O: OrderActions<G::State, G::Action>,
{
    pub fn new(game: &'a G, evaluator: &'a E, orderer: &'a O) -> Self {
        Self {
            game,
            evaluator,
            orderer,
            time_control: None,
            stats: SearchStats::default(),
            root_best: None,
        }
    }

    /// Abort with `DeadlineExceeded` once `tc` runs out or is stopped.
    pub fn with_time_control(mut self, tc: &'a TimeControl) -> Self {
        self.time_control = Some(tc);
        self
    }

    /// Counters of the most recent search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Fixed-depth search from `state`.
    ///
    /// Returns the minimax value and the action to play; the action is `None`
    /// when `state` itself is a cutoff.
    pub fn search(
        &mut self,
        state: &G::State,
        depth_limit: u32,
    ) -> Result<(f64, Option<G::Action>), AgentError> {
        self.stats = SearchStats::default();
        self.root_best = None;
        self.alpha_beta(state, SearchContext::root(depth_limit))
    }

    /// Searches depth 1, 2, ... up to `max_depth` and keeps the result of the
    /// deepest iteration that finished before the deadline.
    pub fn iterative_deepening(
        &mut self,
        state: &G::State,
        max_depth: u32,
    ) -> Result<SearchReport<G::Action>, AgentError> {
        let started = Instant::now();
        self.stats = SearchStats::default();

        let mut completed = None;
        let mut stopped = false;

        for depth in 1..=max_depth.max(1) {
            self.root_best = None;
            match self.alpha_beta(state, SearchContext::root(depth)) {
                Ok((value, action)) => {
                    debug!(depth, value, nodes = self.stats.nodes, "iteration complete");
                    let cutoff_at_root = action.is_none();
                    completed = Some((value, action, depth));
                    if cutoff_at_root {
                        break;
                    }
                }
                Err(AgentError::DeadlineExceeded) => {
                    debug!(depth, nodes = self.stats.nodes, "iteration aborted");
                    stopped = true;
                    break;
                }
                // A dead end below the last completed depth does not void it.
                Err(AgentError::NoLegalMove) if completed.is_some() => {
                    warn!(depth, "live state without actions, keeping previous depth");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        let (value, best_action, depth) = match completed {
            Some(done) => done,
            None => match self.root_best.take() {
                Some((value, action)) => (value, Some(action), 0),
                None => (f64::NEG_INFINITY, None, 0),
            },
        };

        Ok(SearchReport {
            value,
            best_action,
            depth,
            stopped,
            stats: self.stats,
            elapsed: started.elapsed(),
        })
    }

    /// Renders every root action with its exact value at `depth_limit`.
    pub fn trace(&mut self, state: &G::State, depth_limit: u32) -> Result<String, AgentError> {
        let mut out = String::new();
        if depth_limit == 0 || self.game.is_terminal(state) {
            out.push_str(&format!("Cutoff: {}\n", self.evaluate_leaf(state)));
            return Ok(out);
        }

        out.push_str(&format!("Root (depth limit {})\n", depth_limit));
        let root = SearchContext::root(depth_limit);
        for action in self.order(state, true) {
            let child = self.game.result(state, &action);
            let (value, _) = self.alpha_beta(&child, root.child())?;
            out.push_str(&format!("- {:?}: {}\n", action, value));
        }
        Ok(out)
    }

    fn alpha_beta(
        &mut self,
        state: &G::State,
        mut ctx: SearchContext,
    ) -> Result<(f64, Option<G::Action>), AgentError> {
        self.stats.nodes += 1;
        // The root always reads the clock so an expired limit aborts at once.
        if let Some(tc) = self.time_control {
            let read_clock = ctx.depth == 0 || tc.should_check_time(self.stats.nodes);
            if tc.is_stopped() || (read_clock && tc.check_time()) {
                return Err(AgentError::DeadlineExceeded);
            }
        }

        if ctx.depth >= ctx.depth_limit || self.game.is_terminal(state) {
            return Ok((self.evaluate_leaf(state), None));
        }

        let actions = self.order(state, ctx.maximizing);
        if actions.is_empty() {
            return Err(AgentError::NoLegalMove);
        }

        let mut best_value = if ctx.maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_action: Option<G::Action> = None;

        for action in actions {
            let child = self.game.result(state, &action);
            let (value, _) = self.alpha_beta(&child, ctx.child())?;

            // Strict comparison: the first action reaching a value keeps it.
            let improved = if ctx.maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improved || best_action.is_none() {
                best_value = value;
                if ctx.depth == 0 {
                    self.root_best = Some((value, action.clone()));
                }
                best_action = Some(action);
            }

            if ctx.maximizing {
                ctx.alpha = ctx.alpha.max(best_value);
                if best_value >= ctx.beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            } else {
                ctx.beta = ctx.beta.min(best_value);
                if best_value <= ctx.alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        Ok((best_value, best_action))
    }

    fn evaluate_leaf(&mut self, state: &G::State) -> f64 {
        let started = Instant::now();
        let value = self.evaluator.evaluate(state);
        self.stats.evaluation_time += started.elapsed();
        self.stats.leaf_evaluations += 1;
        value
    }

    fn order(&mut self, state: &G::State, maximizing: bool) -> Vec<G::Action> {
        let started = Instant::now();
        let actions = self.orderer.order(state, maximizing);
        self.stats.ordering_time += started.elapsed();
        actions
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
