//! Board module - the locked-cell grid
//!
//! The board is a 10x20 grid where each cell is `0` (empty) or the id of the
//! piece kind that locked there. Uses a flat array for cache locality and
//! zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! For collision purposes everything left, right or below the grid is solid,
//! while rows above row 0 are open so pieces can spawn partially off the top.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices of full rows, top to bottom.
pub type FullRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y), used to build positions for puzzles and tests.
    ///
    /// Values above 7 are rejected along with out-of-bounds coordinates.
    /// Returns false if nothing was written.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if cell > 7 {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Whether a piece cell may not occupy (x, y).
    ///
    /// Walls and floor are solid; rows above the top are open.
    #[inline]
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|&cell| cell != EMPTY)
    }

    /// Indices of every full row, top to bottom.
    pub fn full_rows(&self) -> FullRows {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the given rows and pull everything above them down.
    ///
    /// Surviving rows keep their order; the board is topped up with empty rows
    /// so the height never changes. Uses a two-pointer pass with no allocation.
    /// Returns the number of rows removed.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut removed = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        removed
    }

    /// Write a piece's occupied cells into the grid.
    ///
    /// Cells above row 0 (and any outside the grid) are dropped. Returns the
    /// number of cells written.
    pub fn lock_piece(&mut self, piece: &Piece) -> usize {
        let mut written = 0;
        for (x, y, value) in piece.cells() {
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx] = value;
                written += 1;
            }
        }
        written
    }

    /// Copy the grid into a row-major 2D array (for snapshots and renderers).
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a board from rows of text, bottom-aligned.
    ///
    /// `.` is empty, digits `1`-`7` are locked cells and any other character
    /// is treated as `1`. Fewer than 20 rows fills the bottom of the board.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                let value = match ch {
                    '.' => EMPTY,
                    '1'..='7' => ch as u8 - b'0',
                    _ => 1,
                };
                board.set(x as i8, y, value);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
