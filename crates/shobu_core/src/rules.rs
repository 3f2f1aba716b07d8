use crate::state::{Board, GameState};
use crate::types::{Action, Player};

/// Rule engine the agents are driven by.
///
/// Agents never generate or apply moves themselves: legality, transitions and
/// game end all come from here. Implementations must be pure, `result` must
/// not touch its input state.
pub trait Rules {
    /// True when the game is over in `state`.
    fn is_terminal(&self, state: &GameState) -> bool;

    /// The state reached by playing `action` in `state`.
    fn result(&self, state: &GameState, action: &Action) -> GameState;

    /// Legal actions for an arbitrary side on `board`. Used to look at the
    /// side that is not on move, whose actions the state does not carry.
    fn compute_actions(&self, board: &Board, player: Player) -> Vec<Action>;
}

impl<R: Rules + ?Sized> Rules for &R {
    fn is_terminal(&self, state: &GameState) -> bool {
        (**self).is_terminal(state)
    }

    fn result(&self, state: &GameState, action: &Action) -> GameState {
        (**self).result(state, action)
    }

    fn compute_actions(&self, board: &Board, player: Player) -> Vec<Action> {
        (**self).compute_actions(board, player)
    }
}
