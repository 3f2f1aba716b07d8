//! Cheap move ordering for the alpha-beta search.
//!
//! Actions are scored from the point of view of the side on move in the
//! state being expanded, not the searching agent. Only the sort direction
//! follows the node type: descending at maximizing nodes, ascending at
//! minimizing nodes.

use serde::{Deserialize, Serialize};
use shobu_core::{Action, GameState, StoneSet, STONES_PER_BOARD};

use crate::eval::clamp_score;
use crate::search::OrderActions;
use crate::threat::eliminates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingWeights {
    /// Base bonus for a push that eliminates an enemy stone
    pub capture_weight: f64,
    /// Enemy weakest-board count at or below which captures are amplified
    pub critical_min_pieces: u32,
    /// Captures are amplified only with fewer stones than this on the table
    pub endgame_stones: u32,
    /// Bonus per moved stone landing on a central cell
    pub center_weight: f64,
    /// Central bonus while at least `opening_stones` remain
    pub opening_center_weight: f64,
    pub opening_stones: u32,
}

impl Default for OrderingWeights {
    fn default() -> Self {
        Self {
            capture_weight: 100.0,
            critical_min_pieces: 1,
            endgame_stones: 24,
            center_weight: 1.0,
            opening_center_weight: 3.0,
            opening_stones: 28,
        }
    }
}

impl OrderingWeights {
    pub fn is_valid(&self) -> bool {
        self.capture_weight.is_finite()
            && self.center_weight.is_finite()
            && self.opening_center_weight.is_finite()
    }
}

pub struct MoveOrderer<'a> {
    weights: &'a OrderingWeights,
}

impl<'a> MoveOrderer<'a> {
    pub fn new(weights: &'a OrderingWeights) -> Self {
        Self { weights }
    }

    /// Heuristic value of `action` for `state.to_move`.
    pub fn score(&self, state: &GameState, action: &Action) -> f64 {
        let w = self.weights;
        let board = &state.board;
        let enemy = state.to_move.other();
        let total = board.total_stones();
        let mut score = 0.0;

        if eliminates(board, action, enemy) {
            let enemy_min = board.min_pieces(enemy);
            let amplify = enemy_min <= w.critical_min_pieces && total < w.endgame_stones;
            let factor = if amplify {
                f64::from(STONES_PER_BOARD + 1 - enemy_min.min(STONES_PER_BOARD)).powi(3)
            } else {
                1.0
            };
            score += w.capture_weight * factor;
        }

        let center_bonus = if total >= w.opening_stones {
            w.opening_center_weight
        } else {
            w.center_weight
        };
        let landings = [action.passive_target(), action.active_target()];
        let central = landings
            .iter()
            .flatten()
            .filter(|&&cell| StoneSet::CENTER.contains(cell))
            .count();
        score += center_bonus * central as f64;

        clamp_score(score)
    }
}

impl OrderActions<GameState, Action> for MoveOrderer<'_> {
    fn order(&self, state: &GameState, maximizing: bool) -> Vec<Action> {
        let mut scored: Vec<(f64, Action)> = state
            .actions
            .iter()
            .map(|a| (self.score(state, a), *a))
            .collect();

        // Stable sort: equal scores keep rule-engine order.
        if maximizing {
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        } else {
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        scored.into_iter().map(|(_, a)| a).collect()
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
