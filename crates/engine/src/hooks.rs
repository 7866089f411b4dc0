//! Host hooks: where the engine draws, reports stats and plays sounds.
//!
//! Renderers only ever see a [`GameSnapshot`] by shared reference, so they
//! cannot change game state. Stats and cue sinks return nothing; the engine
//! does not care whether a sound actually played.

use log::debug;

use blockfall_core::{GameSnapshot, Stats};
use blockfall_types::Cue;

/// Something the engine can draw a frame onto.
pub trait RenderSurface {
    /// Draw the locked cells, the ghost, the falling piece and any flash overlay.
    fn draw_board(&mut self, snapshot: &GameSnapshot);

    /// Draw the queued piece.
    fn draw_next_preview(&mut self, snapshot: &GameSnapshot);

    /// Draw the stow slot, including its cooldown state.
    fn draw_hold_preview(&mut self, snapshot: &GameSnapshot);

    /// Push the finished frame to the screen.
    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// The palette hue moved to `hue` degrees.
    fn shift_palette(&mut self, _hue: u16) {}
}

/// Receives score, level and line totals.
pub trait StatsSink {
    fn update(&mut self, stats: Stats);
}

/// Plays named audio cues.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Discards stats.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStats;

impl StatsSink for NoStats {
    fn update(&mut self, _stats: Stats) {}
}

/// Writes cues to the log instead of playing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCues;

impl CueSink for LogCues {
    fn play(&mut self, cue: Cue) {
        debug!("cue {}", cue.as_str());
    }
}

impl<T: RenderSurface + ?Sized> RenderSurface for &mut T {
    fn draw_board(&mut self, snapshot: &GameSnapshot) {
        (**self).draw_board(snapshot)
    }

    fn draw_next_preview(&mut self, snapshot: &GameSnapshot) {
        (**self).draw_next_preview(snapshot)
    }

    fn draw_hold_preview(&mut self, snapshot: &GameSnapshot) {
        (**self).draw_hold_preview(snapshot)
    }

    fn present(&mut self) -> anyhow::Result<()> {
        (**self).present()
    }

    fn shift_palette(&mut self, hue: u16) {
        (**self).shift_palette(hue)
    }
}
