//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the input map and any renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - Cell value `0` is empty, `1..=7` is the id of the piece kind that locked there.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds of game time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_MIN_MS` | 200 | Gravity interval floor |
//! | `FLASH_INTERVAL_MS` | 120 | Time between flash toggles on cleared rows |
//! | `FLASH_TOGGLES` | 4 | Toggles before the board is compacted |
//! | `STOW_LOCK_MS` | 12000 | Cooldown before the stow slot can be reused |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, GameAction, Cue, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_id(piece.id()), Some(piece));
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(Cue::PieceLand.as_str(), "piece-land");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Per-level multiplier applied to the gravity interval.
pub const DROP_DECAY: f64 = 0.9;

/// Gravity interval floor (200ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 200;

/// Time between two flash toggles of rows waiting to be cleared.
pub const FLASH_INTERVAL_MS: u32 = 120;

/// Number of flash toggles (two full on/off cycles) before rows collapse.
pub const FLASH_TOGGLES: u8 = 4;

/// Cooldown after a stow or unstow before the slot accepts another one.
pub const STOW_LOCK_MS: u32 = 12_000;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Cleared lines between two palette hue shifts.
pub const PALETTE_SHIFT_LINES: u32 = 5;

/// Level a fresh game starts at.
pub const START_LEVEL: u32 = 1;

/// Line clear scoring table
///
/// Base points for clearing N lines simultaneously at level 1:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// A cell on the game board
///
/// - `0`: empty
/// - `1..=7`: locked, holding the [`PieceKind::id`] of the piece that filled it
pub type Cell = u8;

/// Empty cell value.
pub const EMPTY: Cell = 0;

/// The seven piece kinds
///
/// Ids double as color indices and as the cell values written into the board.
/// - **I** (1): `#FF0D72`, 4x4 bar
/// - **J** (2): `#0DC2FF`
/// - **L** (3): `#F538FF`
/// - **O** (4): `#FF8E0D`, 2x2 square
/// - **S** (5): `#FFE138`
/// - **T** (6): `#3877FF`
/// - **Z** (7): `#B525EF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Numeric id (1..=7), also used as the board cell value.
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. Returns `None` for `0` and anything above `7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(4), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Display color as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0xFF, 0x0D, 0x72),
            PieceKind::J => (0x0D, 0xC2, 0xFF),
            PieceKind::L => (0xF5, 0x38, 0xFF),
            PieceKind::O => (0xFF, 0x8E, 0x0D),
            PieceKind::S => (0xFF, 0xE1, 0x38),
            PieceKind::T => (0x38, 0x77, 0xFF),
            PieceKind::Z => (0xB5, 0x25, 0xEF),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Actions that can be applied to the game
///
/// Gameplay actions act on the falling piece; `Pause` and `Restart` are
/// lifecycle controls and are honored even when gameplay input is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Rotate the piece 90° clockwise
    Rotate,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Stow the piece into the side slot, or bring the stowed piece back
    Stow,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("STOW"), Some(GameAction::Stow));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(GameAction::Rotate),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "stow" => Some(GameAction::Stow),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Rotate => "rotate",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Stow => "stow",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether this action moves the falling piece (as opposed to a lifecycle control).
    pub fn is_gameplay(&self) -> bool {
        !matches!(self, GameAction::Pause | GameAction::Restart)
    }
}

/// Named audio cues emitted at game transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Rotate,
    Drop,
    PieceLand,
    LineClear,
    Stow,
    Unstow,
    GameOver,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Rotate => "rotate",
            Cue::Drop => "drop",
            Cue::PieceLand => "piece-land",
            Cue::LineClear => "line-clear",
            Cue::Stow => "stow",
            Cue::Unstow => "unstow",
            Cue::GameOver => "game-over",
        }
    }
}
