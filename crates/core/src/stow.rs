//! Stow slot: `Empty -> Holding -> cooldown -> Empty`
//!
//! The slot keeps one piece kind aside. Every successful stow or unstow
//! engages a cooldown; while it runs, further requests are rejected. There
//! is no unlock event: expiry is checked against the game clock on every
//! query.

use crate::types::{PieceKind, STOW_LOCK_MS};

/// What a stow request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StowTransition {
    /// The slot was empty and now holds the current piece.
    Stow,
    /// The slot was holding this kind and is now empty.
    Unstow(PieceKind),
    /// The cooldown is still running; nothing changed.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StowSlot {
    held: Option<PieceKind>,
    locked_until: Option<u64>,
    lock_ms: u32,
}

impl StowSlot {
    pub fn new(lock_ms: u32) -> Self {
        Self {
            held: None,
            locked_until: None,
            lock_ms,
        }
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn lock_ms(&self) -> u32 {
        self.lock_ms
    }

    pub fn is_locked(&self, now: u64) -> bool {
        matches!(self.locked_until, Some(until) if now < until)
    }

    /// Milliseconds of cooldown left at `now` (0 when unlocked).
    pub fn lock_remaining_ms(&self, now: u64) -> u64 {
        self.locked_until
            .map_or(0, |until| until.saturating_sub(now))
    }

    /// Stow `current` or release the held kind, depending on the slot state.
    pub fn request(&mut self, current: PieceKind, now: u64) -> StowTransition {
        if self.is_locked(now) {
            return StowTransition::Rejected;
        }
        self.locked_until = Some(now + u64::from(self.lock_ms));
        match self.held.take() {
            Some(kind) => StowTransition::Unstow(kind),
            None => {
                self.held = Some(current);
                StowTransition::Stow
            }
        }
    }

    /// Empty the slot and drop any cooldown.
    pub fn reset(&mut self) {
        self.held = None;
        self.locked_until = None;
    }
}

impl Default for StowSlot {
    fn default() -> Self {
        Self::new(STOW_LOCK_MS)
    }
}
