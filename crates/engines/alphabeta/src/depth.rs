//! Between-move depth control.
//!
//! The controller reacts to how long the previous move took and how much of
//! the game budget is left per available action. It never runs during a
//! search, so the very first move of a game always uses `initial_depth`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shobu_core::{GameState, Player};
use tracing::{debug, warn};

/// Depth cap while at least `min_total_stones` remain on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCeiling {
    pub min_total_stones: u32,
    pub max_depth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    pub initial_depth: u32,
    pub max_depth_limit: u32,
    /// Deepen when time per action exceeds this share of the game budget...
    pub increase_fraction: f64,
    /// ...and the previous move took less than this many seconds
    pub fast_move_secs: f64,
    /// Weakest-board count at or below which the agent is in danger
    pub critical_min_pieces: u32,
    /// Looser deepening rule while in danger
    pub critical_fraction: f64,
    pub critical_fast_move_secs: f64,
    /// Back off when time per action drops below this share of the budget
    pub decrease_fraction: f64,
    /// Back off when the previous move took longer than this
    pub slow_move_secs: f64,
    /// Checked in order; the first phase whose stone threshold is met applies
    pub phase_ceilings: Vec<PhaseCeiling>,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            initial_depth: 2,
            max_depth_limit: 6,
            increase_fraction: 0.01,
            fast_move_secs: 1.0,
            critical_min_pieces: 1,
            critical_fraction: 0.004,
            critical_fast_move_secs: 3.0,
            decrease_fraction: 0.002,
            slow_move_secs: 8.0,
            phase_ceilings: vec![
                PhaseCeiling {
                    min_total_stones: 28,
                    max_depth: 3,
                },
                PhaseCeiling {
                    min_total_stones: 20,
                    max_depth: 4,
                },
            ],
        }
    }
}

impl DepthConfig {
    /// Highest depth allowed with `total_stones` on the table.
    pub fn ceiling_for(&self, total_stones: u32) -> u32 {
        self.phase_ceilings
            .iter()
            .find(|p| total_stones >= p.min_total_stones)
            .map_or(self.max_depth_limit, |p| p.max_depth.min(self.max_depth_limit))
    }

    /// Bounds `depth` to `[initial_depth, max_depth_limit]`. An inverted
    /// range resolves to `max_depth_limit` instead of panicking.
    pub fn clamp(&self, depth: u32) -> u32 {
        depth.max(self.initial_depth).min(self.max_depth_limit)
    }
}

/// Timing carried from one move to the next within a game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingState {
    /// Clock reading on the first move of the game
    pub time_budget: Option<Duration>,
    pub last_move_duration: Option<Duration>,
    pub current_depth_limit: u32,
}

#[derive(Debug, Clone)]
pub struct DepthController {
    config: DepthConfig,
    agent: Player,
    timing: TimingState,
}

impl DepthController {
    pub fn new(config: DepthConfig, agent: Player) -> Self {
        let timing = TimingState {
            current_depth_limit: config.initial_depth,
            ..TimingState::default()
        };
        Self {
            config,
            agent,
            timing,
        }
    }

    pub fn timing(&self) -> &TimingState {
        &self.timing
    }

    pub fn current_depth(&self) -> u32 {
        self.timing.current_depth_limit
    }

    /// Forget the previous game.
    pub fn reset(&mut self) {
        self.timing = TimingState {
            current_depth_limit: self.config.initial_depth,
            ..TimingState::default()
        };
    }

    /// Wall-clock cost of the move just played.
    pub fn record_move(&mut self, elapsed: Duration) {
        self.timing.last_move_duration = Some(elapsed);
    }

    /// Depth limit for the move about to be searched.
    pub fn adjust(&mut self, remaining: Duration, state: &GameState) -> u32 {
        let cfg = &self.config;
        let budget = *self.timing.time_budget.get_or_insert(remaining);
        if budget.is_zero() {
            warn!("no time budget recorded, falling back to initial depth");
            self.timing.current_depth_limit = cfg.initial_depth;
            return cfg.initial_depth;
        }

        let current = cfg.clamp(self.timing.current_depth_limit);
        let Some(last) = self.timing.last_move_duration else {
            self.timing.current_depth_limit = current;
            return current;
        };

        let budget = budget.as_secs_f64();
        let last = last.as_secs_f64();
        let time_per_move = remaining.as_secs_f64() / state.actions.len().max(1) as f64;
        let total = state.board.total_stones();
        let weakest = state.board.min_pieces(self.agent);

        let comfortable = time_per_move > cfg.increase_fraction * budget && last < cfg.fast_move_secs;
        let in_danger = weakest <= cfg.critical_min_pieces
            && time_per_move > cfg.critical_fraction * budget
            && last < cfg.critical_fast_move_secs;
        let pressed = time_per_move < cfg.decrease_fraction * budget || last > cfg.slow_move_secs;

        let mut next = current;
        if comfortable || in_danger {
            if current < cfg.ceiling_for(total) {
                next = current + 1;
            }
        } else if pressed && current > cfg.initial_depth {
            next = current - 1;
        }
        let next = cfg.clamp(next);

        if next != current {
            debug!(
                from = current,
                to = next,
                time_per_move,
                last_move = last,
                total_stones = total,
                "depth limit adjusted"
            );
        }
        self.timing.current_depth_limit = next;
        next
    }
}

#[cfg(test)]
#[path = "depth_tests.rs"]
mod depth_tests;
