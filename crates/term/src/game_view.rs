//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is drawn inside a frame with each cell `cell_w` columns wide
//! (2 by default, to make cells roughly square). A side panel to the right
//! holds the next and stowed pieces and the score.

use crate::core::{GameSnapshot, Piece, Shape, Stats};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette::Palette;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const FLASH_FG: Rgb = Rgb::new(255, 255, 255);

/// Side panel width in terminal columns.
const PANEL_W: u16 = 12;
/// Gap between the board frame and the side panel.
const PANEL_GAP: u16 = 2;

const BLOCK: char = '█';
const GHOST: char = '░';
const EMPTY_DOT: char = '·';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where things go for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of the board frame.
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Left edge of the side panel.
    pub panel_x: u16,
}

impl Layout {
    /// Top-left terminal cell of board cell (x, y).
    pub fn cell_origin(&self, view: &GameView, x: u16, y: u16) -> (u16, u16) {
        (
            self.frame_x + 1 + x * view.cell_w,
            self.frame_y + 1 + y * view.cell_h,
        )
    }
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Center board and panel together in the viewport.
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = u16::from(BOARD_WIDTH) * self.cell_w + 2;
        let frame_h = u16::from(BOARD_HEIGHT) * self.cell_h + 2;
        let total_w = frame_w + PANEL_GAP + PANEL_W;

        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: frame_x + frame_w + PANEL_GAP,
        }
    }

    /// Resize and blank the framebuffer for a new frame.
    pub fn begin(&self, viewport: Viewport, fb: &mut FrameBuffer) -> Layout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).cell(' '));
        self.layout(viewport)
    }

    /// Draw a whole frame. Equivalent to the surface calls made by the engine.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        stats: Stats,
        palette: &Palette,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let layout = self.begin(viewport, fb);
        self.draw_board(snap, palette, layout, fb);
        self.draw_next(snap, palette, layout, fb);
        self.draw_hold(snap, palette, layout, fb);
        self.draw_stats(stats, layout, fb);
        self.draw_overlay(snap, layout, fb);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        stats: Stats,
        palette: &Palette,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, stats, palette, viewport, &mut fb);
        fb
    }

    /// Frame, locked cells, ghost, falling piece and the flash overlay.
    pub fn draw_board(
        &self,
        snap: &GameSnapshot,
        palette: &Palette,
        layout: Layout,
        fb: &mut FrameBuffer,
    ) {
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        self.draw_border(fb, layout, border);

        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                let (ch, style) = match PieceKind::from_id(snap.board[y][x]) {
                    Some(kind) => (BLOCK, block(palette, kind)),
                    None => (EMPTY_DOT, CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim()),
                };
                self.fill_cell(fb, layout, x as i8, y as i8, ch, style);
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::new(palette.color(ghost.kind), WELL_BG).dim();
            self.draw_piece(fb, layout, &ghost, GHOST, style);
        }

        if let Some(active) = snap.active {
            self.draw_piece(fb, layout, &active, BLOCK, block(palette, active.kind));
        }

        if let Some(flash) = snap.flash.filter(|f| f.highlight) {
            let style = CellStyle::new(FLASH_FG, WELL_BG).bold();
            for y in (0..BOARD_HEIGHT as usize).filter(|&y| flash.rows[y]) {
                for x in 0..BOARD_WIDTH as i8 {
                    self.fill_cell(fb, layout, x, y as i8, BLOCK, style);
                }
            }
        }
    }

    pub fn draw_next(
        &self,
        snap: &GameSnapshot,
        palette: &Palette,
        layout: Layout,
        fb: &mut FrameBuffer,
    ) {
        let y = layout.frame_y;
        fb.put_str(layout.panel_x, y, "NEXT", label());
        if let Some(kind) = snap.next {
            self.draw_preview(fb, layout.panel_x, y + 1, kind, block(palette, kind));
        }
    }

    /// Stowed piece, dimmed with a countdown while the slot is locked.
    pub fn draw_hold(
        &self,
        snap: &GameSnapshot,
        palette: &Palette,
        layout: Layout,
        fb: &mut FrameBuffer,
    ) {
        let y = layout.frame_y + 4;
        fb.put_str(layout.panel_x, y, "HOLD", label());
        if let Some(kind) = snap.held {
            let mut style = block(palette, kind);
            if snap.stow_locked() {
                style = style.dim();
            }
            self.draw_preview(fb, layout.panel_x, y + 1, kind, style);
        }
        if snap.stow_locked() {
            let secs = snap.stow_lock_remaining_ms.div_ceil(1000);
            let dim = value().dim();
            fb.put_str(layout.panel_x + 5, y, "LOCK", dim);
            fb.put_u32(layout.panel_x + 10, y, secs.min(u64::from(u32::MAX)) as u32, dim);
        }
    }

    pub fn draw_stats(&self, stats: Stats, layout: Layout, fb: &mut FrameBuffer) {
        let mut y = layout.frame_y + 8;
        for (name, v) in [
            ("SCORE", stats.score),
            ("LEVEL", stats.level),
            ("LINES", stats.lines),
        ] {
            fb.put_str(layout.panel_x, y, name, label());
            fb.put_u32(layout.panel_x, y + 1, v, value());
            y += 3;
        }
    }

    /// PAUSED / GAME OVER banner across the middle of the board.
    pub fn draw_overlay(&self, snap: &GameSnapshot, layout: Layout, fb: &mut FrameBuffer) {
        let text = if snap.game_over {
            "GAME OVER"
        } else if snap.paused {
            "PAUSED"
        } else {
            return;
        };
        let mid_y = layout.frame_y + layout.frame_h / 2;
        let text_w = text.chars().count() as u16;
        let x = layout.frame_x + layout.frame_w.saturating_sub(text_w) / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
            ..
        } = layout;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Board cells of `piece` that are inside the grid. Rows above the top are skipped.
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        piece: &Piece,
        ch: char,
        style: CellStyle,
    ) {
        for (x, y, _) in piece.cells() {
            self.fill_cell(fb, layout, x, y, ch, style);
        }
    }

    /// Canonical shape at panel position, with empty leading rows cropped.
    fn draw_preview(&self, fb: &mut FrameBuffer, px: u16, py: u16, kind: PieceKind, style: CellStyle) {
        let shape = Shape::canonical(kind);
        let top = shape.occupied().map(|(_, dy, _)| dy).min().unwrap_or(0);
        for (dx, dy, _) in shape.occupied() {
            let x = px + dx as u16 * self.cell_w;
            let y = py + (dy - top) as u16;
            fb.fill_rect(x, y, self.cell_w, 1, BLOCK, style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let (px, py) = layout.cell_origin(self, x as u16, y as u16);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }
}

fn block(palette: &Palette, kind: PieceKind) -> CellStyle {
    CellStyle::new(palette.color(kind), WELL_BG).bold()
}

fn label() -> CellStyle {
    CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold()
}

fn value() -> CellStyle {
    CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG)
}
