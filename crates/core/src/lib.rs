//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management and simulation
//! logic. It has no dependency on a terminal, a window or any I/O beyond
//! reading a config file, making it:
//!
//! - **Deterministic**: the same seed deals the same pieces
//! - **Testable**: every rule is reachable through [`GameState`]
//! - **Portable**: any host that can call `tick` and draw a snapshot can run it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, full-row detection and compaction
//! - [`shape`]: square cell matrices and clockwise rotation
//! - [`piece`]: a shape on the board with commit-or-revert moves and rotations
//! - [`collision`]: placement checks and the ghost (hard-drop preview)
//! - [`rng`]: 7-bag piece generation with a seeded LCG
//! - [`scoring`]: line points, levels and gravity speed
//! - [`line_clear`]: the flash-then-collapse animation
//! - [`stow`]: the stow slot and its cooldown
//! - [`game_state`]: the aggregate that ties the rules together
//! - [`config`]: [`EngineConfig`] loading from JSON and the environment
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::with_seed(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::tick`](game_state::GameState::tick) once per
//! frame with the elapsed milliseconds:
//! - **Gravity**: 1000ms per row at level 1, 10% faster per level, 200ms floor
//! - **Flash**: cleared rows toggle every 120ms, collapsing after 4 toggles
//! - **Stow cooldown**: 12s of game time by default

pub mod board;
pub mod collision;
pub mod config;
pub mod events;
pub mod game_state;
pub mod line_clear;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod stow;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullRows};
pub use collision::{compute_ghost, is_colliding};
pub use config::{ConfigError, EngineConfig};
pub use events::{GameEvent, Stats};
pub use game_state::GameState;
pub use line_clear::{ClearAnimation, FlashStep, PendingScore};
pub use piece::{Piece, RotationPolicy};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_points};
pub use shape::Shape;
pub use snapshot::{FlashSnapshot, GameSnapshot};
pub use stow::{StowSlot, StowTransition};
