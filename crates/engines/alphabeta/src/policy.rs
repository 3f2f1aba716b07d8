//! Table-driven attack/defense multipliers.
//!
//! A policy maps a side's weakest-board stone count and the total number of
//! stones on the table to a multiplier. Rules are tried in order and the
//! first match wins; no match means 1.0.

use serde::{Deserialize, Serialize};
use shobu_core::STONES_PER_BOARD;

/// Largest number of stones that can be on the table.
pub const MAX_TOTAL_STONES: u32 = 2 * STONES_PER_BOARD * 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRule {
    /// Matches when the weakest board holds at most this many stones
    pub min_pieces_at_most: u32,
    /// Matches only when fewer stones than this remain in total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_stones_below: Option<u32>,
    pub multiplier: f64,
}

impl WeightRule {
    fn matches(&self, min_pieces: u32, total_stones: u32) -> bool {
        min_pieces <= self.min_pieces_at_most
            && self.total_stones_below.is_none_or(|limit| total_stones < limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPolicy {
    pub rules: Vec<WeightRule>,
}

impl WeightPolicy {
    /// Attack: sharp boost once the opponent is down to one stone on some
    /// board in the endgame, a milder one at two stones.
    pub fn default_attack() -> Self {
        Self {
            rules: vec![
                WeightRule {
                    min_pieces_at_most: 1,
                    total_stones_below: Some(24),
                    multiplier: 10.0,
                },
                WeightRule {
                    min_pieces_at_most: 2,
                    total_stones_below: None,
                    multiplier: 4.0,
                },
            ],
        }
    }

    /// Defense: sharp boost once the agent is down to one stone on some board.
    pub fn default_defense() -> Self {
        Self {
            rules: vec![WeightRule {
                min_pieces_at_most: 1,
                total_stones_below: None,
                multiplier: 5.0,
            }],
        }
    }

    pub fn multiplier(&self, min_pieces: u32, total_stones: u32) -> f64 {
        self.rules
            .iter()
            .find(|r| r.matches(min_pieces, total_stones))
            .map_or(1.0, |r| r.multiplier)
    }

    /// True if losing a stone on the weakest board never lowers the
    /// multiplier, for every reachable stone total.
    pub fn is_monotone(&self) -> bool {
        (0..=MAX_TOTAL_STONES).all(|total| {
            (1..=STONES_PER_BOARD)
                .all(|m| self.multiplier(m - 1, total) >= self.multiplier(m, total))
        })
    }

    pub fn is_finite(&self) -> bool {
        self.rules
            .iter()
            .all(|r| r.multiplier.is_finite() && r.multiplier >= 0.0)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
