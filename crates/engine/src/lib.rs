//! Game loop driver and host hooks.
//!
//! [`Engine`] owns a [`GameState`](blockfall_core::GameState) and three
//! host-supplied sinks: a [`RenderSurface`], a [`StatsSink`] and a
//! [`CueSink`]. The host feeds it input actions and frame timestamps; the
//! engine does everything else.

pub mod error;
pub mod game_loop;
pub mod hooks;

pub use error::EngineError;
pub use game_loop::Engine;
pub use hooks::{CueSink, LogCues, NoStats, RenderSurface, StatsSink};
