//! Shared fixtures for the integration tests.
//!
//! `FixtureRules` is a compact Shobu rule engine used only to drive agents
//! through real positions. It follows the usual rules: a passive move on one
//! of the mover's two home boards, then the same vector as an active move on
//! a board of the other colour, pushing at most one enemy stone.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use shobu_core::{step, Action, Agent, Board, Direction, GameState, Player, Rules};

#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRules;

impl FixtureRules {
    /// Boards on the player's side of the rope.
    pub fn home_boards(player: Player) -> [u8; 2] {
        match player {
            Player::Black => [2, 3],
            Player::White => [0, 1],
        }
    }

    /// Boards 0 and 3 share a colour, as do 1 and 2.
    fn same_colour(a: u8, b: u8) -> bool {
        a % 2 == b % 2
    }

    fn passive_ok(board: &Board, id: u8, from: u8, dir: Direction, length: u8) -> bool {
        let occupied = board.stones(id, Player::Black) | board.stones(id, Player::White);
        (1..=length).all(|l| step(from, dir, l).is_some_and(|c| !occupied.contains(c)))
    }

    fn active_ok(board: &Board, id: u8, mover: Player, from: u8, dir: Direction, length: u8) -> bool {
        let own = board.stones(id, mover);
        let enemy = board.stones(id, mover.other());
        if step(from, dir, length).is_none() {
            return false;
        }

        let mut pushed = 0;
        for l in 1..=length {
            let Some(c) = step(from, dir, l) else {
                return false;
            };
            if own.contains(c) {
                return false;
            }
            if enemy.contains(c) {
                pushed += 1;
            }
        }
        if pushed == 0 {
            return true;
        }
        // The cell the enemy stone lands on must be free or off the board.
        pushed == 1
            && step(from, dir, length + 1).is_none_or(|c| !own.contains(c) && !enemy.contains(c))
    }

    pub fn initial_state(&self) -> GameState {
        self.state_for(Board::startpos(), Player::Black)
    }

    pub fn state_for(&self, board: Board, to_move: Player) -> GameState {
        GameState::new(to_move, board, self.compute_actions(&board, to_move))
    }
}

impl Rules for FixtureRules {
    fn is_terminal(&self, state: &GameState) -> bool {
        state.board.has_lost(Player::Black)
            || state.board.has_lost(Player::White)
            || state.actions.is_empty()
    }

    fn result(&self, state: &GameState, action: &Action) -> GameState {
        let mover = state.to_move;
        let mut board = state.board;

        let mut passive = board.stones(action.passive_board, mover);
        passive.remove(action.passive_stone);
        if let Some(to) = action.passive_target() {
            passive.insert(to);
        }
        board.set_stones(action.passive_board, mover, passive);

        let id = action.active_board;
        let mut enemy = board.stones(id, mover.other());
        let path = (1..=action.length).filter_map(|l| step(action.active_stone, action.direction, l));
        for c in path {
            if enemy.contains(c) {
                enemy.remove(c);
                if let Some(to) = step(action.active_stone, action.direction, action.length + 1) {
                    enemy.insert(to);
                }
                break;
            }
        }
        board.set_stones(id, mover.other(), enemy);

        let mut own = board.stones(id, mover);
        own.remove(action.active_stone);
        if let Some(to) = action.active_target() {
            own.insert(to);
        }
        board.set_stones(id, mover, own);

        self.state_for(board, mover.other())
    }

    fn compute_actions(&self, board: &Board, player: Player) -> Vec<Action> {
        if board.has_lost(Player::Black) || board.has_lost(Player::White) {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for passive_board in Self::home_boards(player) {
            for passive_stone in board.stones(passive_board, player) {
                for direction in Direction::ALL {
                    for length in 1..=2u8 {
                        if !Self::passive_ok(board, passive_board, passive_stone, direction, length) {
                            continue;
                        }
                        for active_board in 0..4u8 {
                            if Self::same_colour(passive_board, active_board) {
                                continue;
                            }
                            for active_stone in board.stones(active_board, player) {
                                if Self::active_ok(board, active_board, player, active_stone, direction, length) {
                                    actions.push(Action::new(
                                        passive_board,
                                        passive_stone,
                                        active_board,
                                        active_stone,
                                        direction,
                                        length,
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }
        actions
    }
}

/// Outcome of a game played by [`play_game`].
#[derive(Debug)]
pub struct GameRecord {
    pub plies: usize,
    pub winner: Option<Player>,
    pub final_state: GameState,
}

/// Plays `black` against `white` from the opening, checking every returned
/// action against the legal list. Stops after `max_plies`.
pub fn play_game(
    rules: &FixtureRules,
    black: &mut dyn Agent,
    white: &mut dyn Agent,
    clock: Duration,
    max_plies: usize,
) -> GameRecord {
    let mut state = rules.initial_state();
    let mut clocks = [clock, clock];
    let mut plies = 0;
    black.new_game();
    white.new_game();

    while plies < max_plies && !rules.is_terminal(&state) {
        let mover = state.to_move;
        let agent: &mut dyn Agent = match mover {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };

        let started = Instant::now();
        let action = agent
            .play(&state, clocks[mover.idx()])
            .unwrap_or_else(|e| panic!("{} failed at ply {plies}: {e}", agent.name()));
        clocks[mover.idx()] = clocks[mover.idx()].saturating_sub(started.elapsed());

        assert!(
            state.actions.contains(&action),
            "{} played illegal action {action} at ply {plies}",
            agent.name()
        );
        state = rules.result(&state, &action);
        plies += 1;
    }

    let winner = if state.board.has_lost(Player::White) {
        Some(Player::Black)
    } else if state.board.has_lost(Player::Black) {
        Some(Player::White)
    } else {
        None
    };
    GameRecord {
        plies,
        winner,
        final_state: state,
    }
}
