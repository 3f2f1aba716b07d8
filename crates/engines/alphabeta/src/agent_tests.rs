use super::*;
use shobu_core::{Board, Direction, StoneSet};

/// One-ply game: the capture removes White's stone from board 1 cell 1, any
/// other action leaves the board alone. Every child is terminal.
struct OnePly {
    capture: Action,
}

impl Rules for OnePly {
    fn is_terminal(&self, state: &GameState) -> bool {
        state.to_move == Player::White
    }

    fn result(&self, state: &GameState, action: &Action) -> GameState {
        let mut board = state.board;
        if *action == self.capture {
            let mut white = board.stones(1, Player::White);
            white.remove(1);
            board.set_stones(1, Player::White, white);
        }
        GameState::new(Player::White, board, Vec::new())
    }

    fn compute_actions(&self, _board: &Board, _player: Player) -> Vec<Action> {
        Vec::new()
    }
}

fn capture_position() -> (OnePly, GameState) {
    let mut board = Board::startpos();
    board.set_stones(1, Player::Black, StoneSet::from_cells([5, 13, 14, 15]).unwrap());
    let capture = Action::new(2, 12, 1, 5, Direction::Up, 1);
    let actions = vec![
        Action::new(2, 12, 1, 15, Direction::Up, 1),
        Action::new(2, 13, 1, 13, Direction::Left, 1),
        capture,
    ];
    (OnePly { capture }, GameState::new(Player::Black, board, actions))
}

#[test]
fn test_plays_the_capture() {
    let (rules, state) = capture_position();
    let capture = rules.capture;
    let mut agent = AlphaBetaAgent::new(rules, Player::Black);

    let action = agent.play(&state, Duration::from_secs(60)).unwrap();
    assert_eq!(action, capture);

    let report = agent.last_report().unwrap();
    assert!(!report.stopped);
    assert_eq!(report.depth, 2);
    assert!(report.value > 0.0);
    assert_eq!(agent.depth_controller().current_depth(), 2);
}

#[test]
fn test_no_actions_is_an_error() {
    let (rules, mut state) = capture_position();
    state.actions.clear();
    let mut agent = AlphaBetaAgent::new(rules, Player::Black);
    assert_eq!(
        agent.play(&state, Duration::from_secs(60)),
        Err(AgentError::NoLegalMove)
    );
    assert!(agent.last_report().is_none());
}

#[test]
fn test_malformed_state_is_rejected() {
    let (rules, mut state) = capture_position();
    // Both players on board 0 cell 0
    state.board.set_stones(0, Player::Black, StoneSet::from_cells([0, 12]).unwrap());
    let mut agent = AlphaBetaAgent::new(rules, Player::Black);
    assert!(matches!(
        agent.play(&state, Duration::from_secs(60)),
        Err(AgentError::InvalidState(_))
    ));
}

#[test]
fn test_expired_clock_still_returns_a_legal_action() {
    let (rules, state) = capture_position();
    let mut config = AgentConfig::default();
    config.search.check_interval = 1;
    let mut agent = AlphaBetaAgent::with_config(rules, Player::Black, config);

    let action = agent.play(&state, Duration::ZERO).unwrap();
    assert!(state.actions.contains(&action));

    let report = agent.last_report().unwrap();
    assert!(report.stopped);
    assert_eq!(report.depth, 0);
    // The ordering fallback puts the capture first.
    assert_eq!(action, Action::new(2, 12, 1, 5, Direction::Up, 1));
}

/// Every transition lands on a live state that offers no actions.
struct DeadEnds;

impl Rules for DeadEnds {
    fn is_terminal(&self, _state: &GameState) -> bool {
        false
    }

    fn result(&self, state: &GameState, _action: &Action) -> GameState {
        GameState::new(state.to_move.other(), state.board, Vec::new())
    }

    fn compute_actions(&self, _board: &Board, _player: Player) -> Vec<Action> {
        Vec::new()
    }
}

#[test]
fn test_dead_end_below_root_still_plays() {
    let state = GameState::new(
        Player::Black,
        Board::startpos(),
        vec![
            Action::new(2, 12, 1, 12, Direction::Up, 1),
            Action::new(3, 13, 0, 13, Direction::Up, 1),
        ],
    );
    let mut agent = AlphaBetaAgent::new(DeadEnds, Player::Black);

    let action = agent.play(&state, Duration::from_secs(30)).unwrap();
    assert!(state.actions.contains(&action));

    let report = agent.last_report().unwrap();
    assert_eq!(report.depth, 1);
    assert!(!report.stopped);
}

#[test]
fn test_new_game_clears_history() {
    let (rules, state) = capture_position();
    let mut agent = AlphaBetaAgent::new(rules, Player::Black);
    agent.play(&state, Duration::from_secs(60)).unwrap();
    assert!(agent.game_stats().nodes > 0);

    agent.new_game();
    assert!(agent.last_report().is_none());
    assert_eq!(agent.game_stats(), SearchStats::default());
    assert_eq!(agent.depth_controller().timing().time_budget, None);
}

#[test]
fn test_explain_lists_root_actions() {
    let (rules, state) = capture_position();
    let agent = AlphaBetaAgent::new(rules, Player::Black);
    let text = agent.explain(&state, 1).unwrap();
    assert!(text.starts_with("Root (depth limit 1)"));
    assert_eq!(text.lines().count(), 1 + state.actions.len());
}

#[test]
fn test_name() {
    let (rules, _) = capture_position();
    let agent = AlphaBetaAgent::new(rules, Player::White);
    assert_eq!(agent.name(), "AlphaBeta v1.0");
    assert_eq!(agent.player(), Player::White);
}
