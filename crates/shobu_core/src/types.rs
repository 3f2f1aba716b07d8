use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of mini-boards in a game.
pub const NUM_BOARDS: usize = 4;
/// Cells per mini-board (4x4).
pub const CELLS_PER_BOARD: u8 = 16;
/// Width and height of a mini-board.
pub const BOARD_WIDTH: i8 = 4;
/// Stones each player starts with on every mini-board.
pub const STONES_PER_BOARD: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

/// One of the eight directions a stone may travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// (row delta, column delta). Row 0 is the top edge of a mini-board.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }
}

// Helpers
pub fn row_of(cell: u8) -> i8 {
    (cell / BOARD_WIDTH as u8) as i8
}
pub fn col_of(cell: u8) -> i8 {
    (cell % BOARD_WIDTH as u8) as i8
}
pub fn cell(row: i8, col: i8) -> Option<u8> {
    if (0..BOARD_WIDTH).contains(&row) && (0..BOARD_WIDTH).contains(&col) {
        Some((row * BOARD_WIDTH + col) as u8)
    } else {
        None
    }
}

/// Cell reached by moving `steps` times from `from` in `dir`, or `None` once
/// the walk leaves the mini-board. Row and column are tracked separately so a
/// step off the right edge never wraps onto the next row.
pub fn step(from: u8, dir: Direction, steps: u8) -> Option<u8> {
    let (dr, dc) = dir.delta();
    let n = steps as i8;
    cell(row_of(from) + dr * n, col_of(from) + dc * n)
}

/// A full Shobu turn: a passive move on one of the mover's home boards
/// followed by the same vector played as an active (pushing) move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub passive_board: u8,
    pub passive_stone: u8,
    pub active_board: u8,
    pub active_stone: u8,
    pub direction: Direction,
    pub length: u8,
}

impl Action {
    pub fn new(
        passive_board: u8,
        passive_stone: u8,
        active_board: u8,
        active_stone: u8,
        direction: Direction,
        length: u8,
    ) -> Self {
        Self {
            passive_board,
            passive_stone,
            active_board,
            active_stone,
            direction,
            length,
        }
    }

    /// Landing cell of the passive stone.
    pub fn passive_target(&self) -> Option<u8> {
        step(self.passive_stone, self.direction, self.length)
    }

    /// Landing cell of the active stone.
    pub fn active_target(&self) -> Option<u8> {
        step(self.active_stone, self.direction, self.length)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "b{}:{} / b{}:{} {:?}x{}",
            self.passive_board,
            self.passive_stone,
            self.active_board,
            self.active_stone,
            self.direction,
            self.length
        )
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
