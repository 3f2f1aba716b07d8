//! Board and game-state snapshots handed to agents by the rule engine.

use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::stones::StoneSet;
use crate::types::*;

/// Stones of both players on all four mini-boards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Indexed by board id, then `Player::idx()`.
    pub stones: [[StoneSet; 2]; NUM_BOARDS],
}

impl Board {
    /// Opening layout: Black on the bottom row and White on the top row of
    /// every mini-board.
    pub fn startpos() -> Self {
        Board {
            stones: [[StoneSet::BOTTOM_ROW, StoneSet::TOP_ROW]; NUM_BOARDS],
        }
    }

    #[inline]
    pub fn stones(&self, board: u8, player: Player) -> StoneSet {
        self.stones[board as usize][player.idx()]
    }

    #[inline]
    pub fn set_stones(&mut self, board: u8, player: Player, set: StoneSet) {
        self.stones[board as usize][player.idx()] = set;
    }

    /// Fewest stones `player` has on any single board.
    pub fn min_pieces(&self, player: Player) -> u32 {
        self.stones
            .iter()
            .map(|b| b[player.idx()].len())
            .min()
            .unwrap_or(0)
    }

    /// Stones `player` has across all boards.
    pub fn total_pieces(&self, player: Player) -> u32 {
        self.stones.iter().map(|b| b[player.idx()].len()).sum()
    }

    /// Stones of both players across all boards.
    pub fn total_stones(&self) -> u32 {
        self.total_pieces(Player::Black) + self.total_pieces(Player::White)
    }

    /// Stones `player` keeps on central cells, summed over boards.
    pub fn center_control(&self, player: Player) -> u32 {
        self.stones
            .iter()
            .map(|b| (b[player.idx()] & StoneSet::CENTER).len())
            .sum()
    }

    /// True when `player` has been wiped off at least one board.
    pub fn has_lost(&self, player: Player) -> bool {
        self.min_pieces(player) == 0
    }
}

/// Snapshot of a game in progress. States are never mutated in place; the
/// rule engine produces a fresh one for every transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub to_move: Player,
    /// Legal actions for `to_move`, in rule-engine order.
    pub actions: Vec<Action>,
    pub board: Board,
}

impl GameState {
    pub fn new(to_move: Player, board: Board, actions: Vec<Action>) -> Self {
        Self {
            to_move,
            actions,
            board,
        }
    }

    /// Sanity check of a state received from the rule engine.
    ///
    /// Rejects boards where both players share a cell or a player holds more
    /// than four stones, and actions that reference unknown boards, cells or
    /// lengths, or that do not start from one of the mover's own stones.
    pub fn validate(&self) -> Result<(), AgentError> {
        for (id, sides) in self.board.stones.iter().enumerate() {
            let [black, white] = *sides;
            if !(black & white).is_empty() {
                return Err(AgentError::InvalidState(format!(
                    "board {id} has cells occupied by both players"
                )));
            }
            for player in Player::ALL {
                let count = sides[player.idx()].len();
                if count > STONES_PER_BOARD {
                    return Err(AgentError::InvalidState(format!(
                        "board {id} holds {count} stones for {player:?}"
                    )));
                }
            }
        }

        for action in &self.actions {
            if action.passive_board as usize >= NUM_BOARDS
                || action.active_board as usize >= NUM_BOARDS
            {
                return Err(AgentError::InvalidState(format!(
                    "action {action} references an unknown board"
                )));
            }
            if action.passive_stone >= CELLS_PER_BOARD || action.active_stone >= CELLS_PER_BOARD {
                return Err(AgentError::InvalidState(format!(
                    "action {action} references a cell outside the board"
                )));
            }
            if !(1..=2).contains(&action.length) {
                return Err(AgentError::InvalidState(format!(
                    "action {action} has length {}",
                    action.length
                )));
            }
            let passive = self.board.stones(action.passive_board, self.to_move);
            let active = self.board.stones(action.active_board, self.to_move);
            if !passive.contains(action.passive_stone) || !active.contains(action.active_stone) {
                return Err(AgentError::InvalidState(format!(
                    "action {action} moves a stone {:?} does not own",
                    self.to_move
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
