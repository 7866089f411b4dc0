//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after [`TerminalRenderer::invalidate`] or
//! a size change) is a full redraw. After that only runs of changed cells
//! are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Frame currently on screen.
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            prev: None,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`]. No-op if it was never entered.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller is expected to redraw;
    /// this avoids cloning a framebuffer every frame.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.prev.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                self.prev = Some(prev);
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                self.prev = Some(prev);
            }
        }
        self.flush_buf()?;

        if let Some(prev) = self.prev.as_mut() {
            std::mem::swap(prev, fb);
        }
        Ok(())
    }

    /// Ring the terminal bell.
    pub fn bell(&mut self) -> Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        // Never leave the user's terminal in raw mode.
        let _ = self.exit();
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_cells(out, row(fb, y), &mut style)?;
    }
    reset_style(out)
}

/// Encode only the runs of cells that differ between `prev` and `next`.
///
/// Both buffers must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for y in 0..next.height() {
        let new_row = row(next, y);
        for (start, end) in changed_runs(row(prev, y), new_row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            write_cells(out, &new_row[start..end], &mut style)?;
        }
    }
    reset_style(out)
}

fn row(fb: &FrameBuffer, y: u16) -> &[Cell] {
    let w = usize::from(fb.width());
    let start = usize::from(y) * w;
    &fb.cells()[start..start + w]
}

/// Half-open column ranges where `a` and `b` differ.
fn changed_runs<'a>(a: &'a [Cell], b: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < b.len() && a.get(x) == Some(&b[x]) {
            x += 1;
        }
        if x >= b.len() {
            return None;
        }
        let start = x;
        while x < b.len() && a.get(x) != Some(&b[x]) {
            x += 1;
        }
        Some((start, x))
    })
}

fn write_cells(out: &mut Vec<u8>, cells: &[Cell], current: &mut Option<CellStyle>) -> Result<()> {
    for cell in cells {
        if *current != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            *current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn reset_style(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(ch: char) -> Cell {
        CellStyle::default().cell(ch)
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = [styled(' '); 6];
        let mut b = a;
        b[1] = styled('X');
        b[2] = styled('X');
        b[3] = styled('X');
        b[5] = styled('Y');

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 4), (5, 6)]);
        assert_eq!(changed_runs(&a, &a).count(), 0);
    }

    #[test]
    fn second_identical_frame_writes_almost_nothing() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(8, 2);
        fb.put_str(0, 0, "blockfall", CellStyle::default());
        let first = fb.clone();

        renderer.present(&mut fb).unwrap();
        let full_len = renderer.writer().len();
        assert!(full_len > 0);

        let mut again = first;
        renderer.present(&mut again).unwrap();
        let diff_len = renderer.writer().len() - full_len;
        assert!(diff_len < full_len / 2, "{diff_len} vs {full_len}");
    }

    #[test]
    fn invalidate_forces_full_redraw() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(4, 1);
        let frame = fb.clone();
        renderer.present(&mut fb).unwrap();
        let first = renderer.writer().len();

        renderer.invalidate();
        let mut fb = frame;
        renderer.present(&mut fb).unwrap();
        assert_eq!(renderer.writer().len(), first * 2);
    }
}
