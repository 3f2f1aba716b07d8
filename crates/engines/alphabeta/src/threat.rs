//! Push detection for the active half of a move.
//!
//! The active stone travels `length` cells; the first enemy stone on its path
//! is shoved to the cell just past the active stone's landing square. If that
//! cell is off the mini-board, the enemy stone is eliminated.

use shobu_core::{step, Action, Board, Player, StoneSet, NUM_BOARDS};

/// What the active move of an action does to `victim`'s stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    /// No victim stone on the path
    None,
    /// Victim stone moves from one cell to another
    Displace { from: u8, to: u8 },
    /// Victim stone is pushed off the board
    Eliminate { cell: u8 },
}

impl Push {
    pub fn is_elimination(self) -> bool {
        matches!(self, Push::Eliminate { .. })
    }
}

/// Classifies the push made by `action` against `victim` on its active board.
pub fn push_outcome(board: &Board, action: &Action, victim: Player) -> Push {
    let stones = board.stones(action.active_board, victim);
    for l in 1..=action.length {
        let Some(cell) = step(action.active_stone, action.direction, l) else {
            return Push::None;
        };
        if stones.contains(cell) {
            return match step(action.active_stone, action.direction, action.length + 1) {
                Some(to) => Push::Displace { from: cell, to },
                None => Push::Eliminate { cell },
            };
        }
    }
    Push::None
}

/// True if playing `action` removes one of `victim`'s stones.
#[inline]
pub fn eliminates(board: &Board, action: &Action, victim: Player) -> bool {
    push_outcome(board, action, victim).is_elimination()
}

/// Eliminating actions available against one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreatSummary {
    /// Actions that would eliminate at least one victim stone
    pub eliminating_actions: u32,
    /// Distinct victim stones under threat, per board
    pub threatened: [StoneSet; NUM_BOARDS],
}

impl ThreatSummary {
    /// Threatened stones on the most exposed board.
    pub fn peak(&self) -> u32 {
        self.threatened.iter().map(|s| s.len()).max().unwrap_or(0)
    }

    pub fn total_threatened(&self) -> u32 {
        self.threatened.iter().map(|s| s.len()).sum()
    }
}

/// Scans `actions` (played by the victim's opponent) for eliminations.
pub fn threat_summary(board: &Board, actions: &[Action], victim: Player) -> ThreatSummary {
    let mut summary = ThreatSummary::default();
    for action in actions {
        if let Push::Eliminate { cell } = push_outcome(board, action, victim) {
            summary.eliminating_actions += 1;
            summary.threatened[action.active_board as usize].insert(cell);
        }
    }
    summary
}

#[cfg(test)]
#[path = "threat_tests.rs"]
mod threat_tests;
