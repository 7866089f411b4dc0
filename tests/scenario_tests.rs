//! Whole-game scenarios driven the way a host drives them

use blockfall::core::{Board, EngineConfig, GameEvent, GameSnapshot, GameState, Stats};
use blockfall::engine::{Engine, LogCues, RenderSurface, StatsSink};
use blockfall::types::{Cue, GameAction, PieceKind, BOARD_HEIGHT, FLASH_INTERVAL_MS};

#[derive(Default)]
struct Last(Option<GameSnapshot>);

impl RenderSurface for Last {
    fn draw_board(&mut self, snapshot: &GameSnapshot) {
        self.0 = Some(*snapshot);
    }
    fn draw_next_preview(&mut self, _snapshot: &GameSnapshot) {}
    fn draw_hold_preview(&mut self, _snapshot: &GameSnapshot) {}
}

#[derive(Default)]
struct Totals(Vec<Stats>);

impl StatsSink for Totals {
    fn update(&mut self, stats: Stats) {
        self.0.push(stats);
    }
}

/// Rows 2..20 are stacked high with one open column, so nothing spawns after the next lock.
fn nearly_topped_out() -> Board {
    let rows = vec!["111111111."; BOARD_HEIGHT as usize - 2];
    Board::from_ascii(&rows)
}

#[test]
fn test_single_line_clear_end_to_end() {
    let mut engine = Engine::new(
        EngineConfig::default().with_seed(77),
        Some(Last::default()),
        Totals::default(),
        LogCues,
    )
    .unwrap();
    engine.start(0).unwrap();
    *engine.state_mut().board_mut() = Board::from_ascii(&["1111..1111"]);
    engine.state_mut().set_current(PieceKind::O);

    engine.input(GameAction::HardDrop, 5).unwrap();
    let snap = engine.snapshot();
    assert!(snap.flash.is_some());
    assert_eq!(snap.board[19], [1, 1, 1, 1, 4, 4, 1, 1, 1, 1]);

    let mut now = 5;
    for _ in 0..4 {
        now += u64::from(FLASH_INTERVAL_MS);
        engine.frame(now).unwrap();
    }

    let snap = *engine.snapshot();
    assert!(snap.flash.is_none());
    assert_eq!(snap.lines, 1);
    assert_eq!(snap.score, 100);
    // The O's upper half fell into the cleared row.
    assert_eq!(snap.board[19], [0, 0, 0, 0, 4, 4, 0, 0, 0, 0]);
    assert_eq!(engine.state().board().filled_count(), 2);
    assert_eq!(
        engine.stats_sink().0.last(),
        Some(&Stats { score: 100, level: 1, lines: 1 })
    );
    assert_eq!(engine.surface().0, Some(snap));
}

#[test]
fn test_gravity_locks_resting_piece() {
    let mut state = GameState::with_seed(31);
    state.start();
    state.set_current(PieceKind::O);
    let interval = state.drop_interval_ms();

    // 18 gravity steps take the O from row 0 to the floor; the next one locks it.
    for _ in 0..18 {
        assert!(state.tick(interval));
    }
    assert_eq!(state.current().map(|p| p.y), Some(18));
    assert_eq!(state.board().filled_count(), 0);

    assert!(state.tick(interval));
    assert_eq!(state.board().filled_count(), 4);
    assert_eq!(state.current().map(|p| p.y), Some(0));
}

#[test]
fn test_soft_drop_never_locks() {
    let mut state = GameState::with_seed(31);
    state.start();
    state.set_current(PieceKind::O);
    while state.apply_action(GameAction::SoftDrop) {}

    assert_eq!(state.current().map(|p| p.y), Some(18));
    assert!(!state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_top_out_ends_game() {
    let mut state = GameState::with_seed(5);
    state.start();
    *state.board_mut() = nearly_topped_out();
    state.set_current(PieceKind::O);
    state.drain_events().for_each(drop);

    assert!(state.apply_action(GameAction::HardDrop));
    assert!(state.game_over());
    let cues: Vec<Cue> = state
        .drain_events()
        .filter_map(|e| match e {
            GameEvent::Cue(cue) => Some(cue),
            _ => None,
        })
        .collect();
    assert_eq!(cues, vec![Cue::Drop, Cue::PieceLand, Cue::GameOver]);
}

#[test]
fn test_game_over_ignores_everything_but_restart() {
    let mut state = GameState::with_seed(5);
    state.start();
    *state.board_mut() = nearly_topped_out();
    state.set_current(PieceKind::O);
    state.apply_action(GameAction::HardDrop);
    assert!(state.game_over());

    let board = state.board().clone();
    let clock = state.clock_ms();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Stow,
        GameAction::Pause,
    ] {
        assert!(!state.apply_action(action), "{:?}", action);
    }
    assert!(!state.tick(5_000));
    assert_eq!(state.board(), &board);
    assert_eq!(state.clock_ms(), clock);
    assert!(state.snapshot().ghost.is_none());

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_game_over_ignores_direct_piece_calls() {
    let mut state = GameState::with_seed(5);
    state.start();
    *state.board_mut() = nearly_topped_out();
    state.set_current(PieceKind::O);
    assert!(state.hard_drop());
    assert!(state.game_over());
    state.drain_events().for_each(drop);

    let board = state.board().clone();
    let current = state.current();
    let next = state.next();
    assert!(!state.move_piece(-1));
    assert!(!state.move_piece(1));
    assert!(!state.rotate());
    assert!(!state.soft_drop());
    assert!(!state.hard_drop());
    assert!(!state.stow());
    state.lock_current();

    assert_eq!(state.board(), &board);
    assert_eq!(state.current(), current);
    assert_eq!(state.next(), next);
    assert_eq!(state.held(), None);
    assert!(state.game_over());
    assert_eq!(state.drain_events().count(), 0);
}

#[test]
fn test_pause_freezes_gravity() {
    let mut state = GameState::with_seed(8);
    state.start();
    let y0 = state.current().map(|p| p.y);

    assert!(state.apply_action(GameAction::Pause));
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.tick(10_000));
    assert_eq!(state.current().map(|p| p.y), y0);
    assert_eq!(state.clock_ms(), 0);

    assert!(state.apply_action(GameAction::Pause));
    assert!(state.tick(1_000));
    assert_eq!(state.current().map(|p| p.y), y0.map(|y| y + 1));
}

#[test]
fn test_same_seed_replays_identically() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::Stow,
        GameAction::HardDrop,
    ];
    let play = || {
        let mut state = GameState::with_seed(4242);
        state.start();
        for action in script {
            state.apply_action(action);
            state.tick(16);
        }
        state.snapshot()
    };
    assert_eq!(play(), play());
}
