use crate::piece::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Flash overlay state while rows are waiting to be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlashSnapshot {
    /// `rows[y]` is true when row `y` is being cleared.
    pub rows: [bool; BOARD_HEIGHT as usize],
    /// Whether the overlay is drawn this frame.
    pub highlight: bool,
}

/// Immutable view of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub flash: Option<FlashSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub stow_lock_remaining_ms: u64,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    /// Palette hue in degrees (0..360).
    pub hue: u16,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    pub fn stow_locked(&self) -> bool {
        self.stow_lock_remaining_ms > 0
    }

    /// Whether row `y` is part of the flash animation.
    pub fn is_flashing_row(&self, y: usize) -> bool {
        self.flash
            .map_or(false, |f| f.rows.get(y).copied().unwrap_or(false))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: None,
            held: None,
            flash: None,
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: 0,
            stow_lock_remaining_ms: 0,
            started: false,
            paused: false,
            game_over: false,
            hue: 0,
        }
    }
}
