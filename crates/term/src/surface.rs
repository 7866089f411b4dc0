//! Engine hooks backed by the terminal.
//!
//! [`TermSurface`] draws each engine frame through [`GameView`] and flushes
//! it with [`TerminalRenderer`]. Stats reach it through a [`SharedStats`]
//! handle that the engine writes to as its stats sink. [`BellCues`] turns a
//! few audio cues into a terminal bell.

use std::cell::Cell as StdCell;
use std::io::{self, Write};
use std::rc::Rc;

use log::debug;

use crate::core::{GameSnapshot, Stats};
use crate::engine::{CueSink, RenderSurface, StatsSink};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Layout, Viewport};
use crate::palette::Palette;
use crate::renderer::TerminalRenderer;
use crate::types::Cue;

/// Latest stats, shared between the engine (writer) and the surface (reader).
#[derive(Debug, Clone, Default)]
pub struct SharedStats(Rc<StdCell<Stats>>);

impl SharedStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Stats {
        self.0.get()
    }
}

impl StatsSink for SharedStats {
    fn update(&mut self, stats: Stats) {
        self.0.set(stats);
    }
}

pub struct TermSurface<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
    layout: Layout,
    palette: Palette,
    stats: SharedStats,
}

impl<W: Write> TermSurface<W> {
    pub fn new(renderer: TerminalRenderer<W>, viewport: Viewport, stats: SharedStats) -> Self {
        let view = GameView::default();
        Self {
            renderer,
            view,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            layout: view.layout(viewport),
            palette: Palette::default(),
            stats,
        }
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Follow a terminal resize; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.renderer.invalidate();
    }
}

impl<W: Write> RenderSurface for TermSurface<W> {
    /// Starts a new frame: the framebuffer is cleared first.
    fn draw_board(&mut self, snapshot: &GameSnapshot) {
        self.layout = self.view.begin(self.viewport, &mut self.fb);
        self.view
            .draw_board(snapshot, &self.palette, self.layout, &mut self.fb);
        self.view.draw_overlay(snapshot, self.layout, &mut self.fb);
    }

    fn draw_next_preview(&mut self, snapshot: &GameSnapshot) {
        self.view
            .draw_next(snapshot, &self.palette, self.layout, &mut self.fb);
    }

    fn draw_hold_preview(&mut self, snapshot: &GameSnapshot) {
        self.view
            .draw_hold(snapshot, &self.palette, self.layout, &mut self.fb);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.view
            .draw_stats(self.stats.get(), self.layout, &mut self.fb);
        self.renderer.present(&mut self.fb)
    }

    fn shift_palette(&mut self, hue: u16) {
        debug!("palette hue {}", hue);
        self.palette.set_hue(hue);
    }
}

/// Rings the terminal bell for line clears and game over; other cues are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellCues {
    pub muted: bool,
}

impl CueSink for BellCues {
    fn play(&mut self, cue: Cue) {
        debug!("cue {}", cue.as_str());
        if self.muted || !matches!(cue, Cue::LineClear | Cue::GameOver) {
            return;
        }
        let mut out = io::stdout();
        // A bell that fails to ring is not worth interrupting the game for.
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}
