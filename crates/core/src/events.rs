//! Events queued by [`GameState`](crate::GameState) for the host to drain.

use crate::types::Cue;

/// Values pushed to a stats display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An audio cue to play.
    Cue(Cue),
    /// Score, level or lines changed (also sent on start and restart).
    StatsChanged(Stats),
    /// The palette hue moved to `hue` degrees.
    PaletteShift { hue: u16 },
    LevelUp { level: u32 },
}
