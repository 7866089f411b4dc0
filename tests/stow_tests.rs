//! Stow slot tests

use std::collections::HashSet;

use blockfall::core::{EngineConfig, GameEvent, GameState, StowSlot, StowTransition};
use blockfall::types::{Cue, GameAction, PieceKind, STOW_LOCK_MS};

fn cues(state: &mut GameState) -> Vec<Cue> {
    state
        .drain_events()
        .filter_map(|e| match e {
            GameEvent::Cue(cue) => Some(cue),
            _ => None,
        })
        .collect()
}

#[test]
fn test_slot_cycle() {
    let mut slot = StowSlot::new(100);
    assert_eq!(slot.request(PieceKind::T, 0), StowTransition::Stow);
    assert_eq!(slot.held(), Some(PieceKind::T));

    assert!(slot.is_locked(99));
    assert_eq!(slot.lock_remaining_ms(40), 60);
    assert_eq!(slot.request(PieceKind::I, 99), StowTransition::Rejected);
    assert_eq!(slot.held(), Some(PieceKind::T));

    assert!(!slot.is_locked(100));
    assert_eq!(slot.request(PieceKind::I, 100), StowTransition::Unstow(PieceKind::T));
    assert_eq!(slot.held(), None);
    assert!(slot.is_locked(150));
}

#[test]
fn test_default_lock_duration() {
    assert_eq!(StowSlot::default().lock_ms(), STOW_LOCK_MS);
}

#[test]
fn test_stow_promotes_next_piece() {
    let mut state = GameState::with_seed(4);
    state.start();
    state.drain_events().for_each(drop);
    let first = state.current().map(|p| p.kind);
    let second = state.next();

    assert!(state.apply_action(GameAction::Stow));
    assert_eq!(state.held(), first);
    assert_eq!(state.current().map(|p| p.kind), second);
    assert!(state.next().is_some());
    assert!(state.stow_locked());
    assert_eq!(cues(&mut state), vec![Cue::Stow]);

    let snap = state.snapshot();
    assert_eq!(snap.held, first);
    assert_eq!(snap.stow_lock_remaining_ms, u64::from(STOW_LOCK_MS));
}

#[test]
fn test_stow_rejected_while_locked() {
    let mut state = GameState::with_seed(4);
    state.start();
    assert!(state.apply_action(GameAction::Stow));
    let current = state.current();

    assert!(!state.apply_action(GameAction::Stow));
    assert_eq!(state.current(), current);
}

#[test]
fn test_unstow_queues_held_piece_then_displaced_one() {
    let mut state = GameState::new(EngineConfig {
        stow_lock_ms: 500,
        ..EngineConfig::default().with_seed(9)
    });
    state.start();
    let first = state.current().map(|p| p.kind);
    assert!(state.apply_action(GameAction::Stow));
    let displaced = state.next();
    let falling = state.current();

    state.tick(500);
    assert!(!state.stow_locked());
    state.drain_events().for_each(drop);

    assert!(state.apply_action(GameAction::Stow));
    assert_eq!(state.held(), None);
    assert_eq!(state.next(), first);
    // The falling piece is not swapped.
    assert_eq!(state.current().map(|p| p.kind), falling.map(|p| p.kind));
    assert_eq!(cues(&mut state), vec![Cue::Unstow]);

    // Once the held piece spawns, the displaced one comes back as next.
    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(state.current().map(|p| p.kind), first);
    assert_eq!(state.next(), displaced);
}

#[test]
fn test_unstow_leaves_bag_untouched() {
    let mut state = GameState::new(EngineConfig {
        stow_lock_ms: 500,
        ..EngineConfig::default().with_seed(3)
    });
    state.start();
    assert!(state.apply_action(GameAction::Stow));
    state.tick(500);
    let before = state.bag().remaining().to_vec();

    assert!(state.apply_action(GameAction::Stow));
    assert_eq!(state.bag().remaining(), before.as_slice());

    // Draining the partial bag and the bags after it never repeats a kind per bag.
    let mut bag = state.bag().clone();
    let rest: HashSet<PieceKind> = (0..before.len()).map(|_| bag.draw()).collect();
    assert_eq!(rest.len(), before.len());
    for round in 0..4 {
        let window: HashSet<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        assert_eq!(window.len(), 7, "bag {} repeated a kind", round);
    }
}

#[test]
fn test_restart_empties_slot() {
    let mut state = GameState::with_seed(4);
    state.start();
    state.apply_action(GameAction::Stow);
    state.apply_action(GameAction::Restart);
    assert_eq!(state.held(), None);
    assert!(!state.stow_locked());
}
