//! Line-clear animation: `Idle -> Flashing -> Idle`
//!
//! When a lock completes rows, the rows are not removed right away. They
//! blink for [`FLASH_TOGGLES`] toggles spaced [`FLASH_INTERVAL_MS`] apart
//! and only then is the board compacted and the score committed. The points
//! are computed at detection time and carried in [`PendingScore`].

use crate::board::FullRows;
use crate::types::{FLASH_INTERVAL_MS, FLASH_TOGGLES};

/// Score held back until the flash finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingScore {
    pub points: u32,
    pub lines: u32,
}

/// Result of advancing the flash to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashStep {
    Running,
    Finished,
}

/// A running flash animation. Exists only while the game is flashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearAnimation {
    rows: FullRows,
    toggles: u8,
    next_toggle_at: u64,
    pending: PendingScore,
}

impl ClearAnimation {
    /// Begin flashing `rows` at game time `now`.
    pub fn start(rows: FullRows, pending: PendingScore, now: u64) -> Self {
        Self {
            rows,
            toggles: 0,
            next_toggle_at: now + u64::from(FLASH_INTERVAL_MS),
            pending,
        }
    }

    /// Rows being cleared, top to bottom.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn toggles(&self) -> u8 {
        self.toggles
    }

    /// Whether the flash overlay is currently drawn (odd toggle count).
    pub fn highlight_on(&self) -> bool {
        self.toggles % 2 == 1
    }

    pub fn pending(&self) -> PendingScore {
        self.pending
    }

    /// Apply every toggle due at or before `now`.
    ///
    /// A late frame catches up on all the toggles it missed, so a long stall
    /// can finish the animation in one call.
    pub fn advance(&mut self, now: u64) -> FlashStep {
        while self.toggles < FLASH_TOGGLES && now >= self.next_toggle_at {
            self.toggles += 1;
            self.next_toggle_at += u64::from(FLASH_INTERVAL_MS);
        }
        if self.toggles >= FLASH_TOGGLES {
            FlashStep::Finished
        } else {
            FlashStep::Running
        }
    }
}
