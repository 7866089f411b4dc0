//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. It knows
//! nothing about game state: whether an action does anything is decided by
//! the engine.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_char, map_key, should_quit};
