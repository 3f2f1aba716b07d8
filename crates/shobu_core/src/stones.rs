//! Stone sets for a single 4x4 mini-board.
//!
//! A stone set is a 16-bit integer where each bit marks an occupied cell.
//! Bit 0 = top-left cell, bit 15 = bottom-right cell.

use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

use crate::error::AgentError;
use crate::types::CELLS_PER_BOARD;

/// Cells occupied by one player on one mini-board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoneSet(pub u16);

impl StoneSet {
    pub const EMPTY: StoneSet = StoneSet(0);

    /// The four central cells: 5, 6, 9 and 10.
    pub const CENTER: StoneSet = StoneSet((1 << 5) | (1 << 6) | (1 << 9) | (1 << 10));

    /// Starting row for Black (bottom edge).
    pub const BOTTOM_ROW: StoneSet = StoneSet(0xF000);
    /// Starting row for White (top edge).
    pub const TOP_ROW: StoneSet = StoneSet(0x000F);

    #[inline(always)]
    pub const fn from_cell(cell: u8) -> Self {
        StoneSet(1u16 << cell)
    }

    /// Builds a set from cell indices, rejecting anything outside 0..16.
    pub fn from_cells<I: IntoIterator<Item = u8>>(cells: I) -> Result<Self, AgentError> {
        let mut set = StoneSet::EMPTY;
        for cell in cells {
            if cell >= CELLS_PER_BOARD {
                return Err(AgentError::InvalidState(format!(
                    "cell index {cell} is outside the 4x4 board"
                )));
            }
            set.insert(cell);
        }
        Ok(set)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, cell: u8) -> bool {
        cell < CELLS_PER_BOARD && (self.0 & (1u16 << cell)) != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, cell: u8) {
        self.0 |= 1u16 << cell;
    }

    #[inline(always)]
    pub fn remove(&mut self, cell: u8) {
        self.0 &= !(1u16 << cell);
    }

    /// Number of stones in the set.
    #[inline(always)]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Get and remove the lowest occupied cell.
    #[inline(always)]
    pub fn pop_lowest(&mut self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            let cell = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(cell)
        }
    }
}

impl BitAnd for StoneSet {
    type Output = StoneSet;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        StoneSet(self.0 & rhs.0)
    }
}

impl BitOr for StoneSet {
    type Output = StoneSet;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        StoneSet(self.0 | rhs.0)
    }
}

/// Iterates occupied cells in ascending order.
impl Iterator for StoneSet {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<u8> {
        self.pop_lowest()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len() as usize;
        (n, Some(n))
    }
}

#[cfg(test)]
#[path = "stones_tests.rs"]
mod stones_tests;
