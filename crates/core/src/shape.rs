//! Shape module - rotation-aware cell matrices
//!
//! Every piece owns a square matrix of cell ids (0 = empty). The I piece is
//! 4x4, the O piece 2x2 and the rest 3x3. Rotation is the naive
//! transpose-then-reverse-rows turn; there are no kick tables here, see
//! [`crate::piece::Piece::try_rotate`] for the policy that uses it.

use crate::types::{Cell, PieceKind, EMPTY};

/// Largest matrix side (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square cell matrix stored in a fixed 4x4 block; only the top-left
/// `size x size` region is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Spawn orientation for a piece kind.
    pub fn canonical(kind: PieceKind) -> Self {
        let v = kind.id();
        match kind {
            PieceKind::I => Self::from_rows(&[
                [0, 0, 0, 0],
                [v, v, v, v],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]),
            PieceKind::J => Self::from_rows(&[[v, 0, 0], [v, v, v], [0, 0, 0]]),
            PieceKind::L => Self::from_rows(&[[0, 0, v], [v, v, v], [0, 0, 0]]),
            PieceKind::O => Self::from_rows(&[[v, v], [v, v]]),
            PieceKind::S => Self::from_rows(&[[0, v, v], [v, v, 0], [0, 0, 0]]),
            PieceKind::T => Self::from_rows(&[[0, v, 0], [v, v, v], [0, 0, 0]]),
            PieceKind::Z => Self::from_rows(&[[v, v, 0], [0, v, v], [0, 0, 0]]),
        }
    }

    /// Build a shape from an `N x N` array of rows (N <= 4).
    pub fn from_rows<const N: usize>(rows: &[[Cell; N]; N]) -> Self {
        assert!(N <= MAX_SHAPE_SIZE, "shape side {} exceeds {}", N, MAX_SHAPE_SIZE);
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..N].copy_from_slice(row);
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at column `x`, row `y` of the matrix (0 when outside it).
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// Matrix rows, `size` entries each.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.size()]
            .iter()
            .map(move |row| &row[..self.size()])
    }

    /// Occupied cells as `(dx, dy, value)` offsets from the top-left corner.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        let size = self.size();
        (0..size).flat_map(move |y| {
            (0..size).filter_map(move |x| {
                let value = self.cells[y][x];
                (value != EMPTY).then_some((x as i8, y as i8, value))
            })
        })
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let size = self.size();
        let mut out = *self;
        for y in 0..size {
            for x in 0..size {
                out.cells[y][x] = self.cells[x][y];
            }
        }
        for row in out.cells[..size].iter_mut() {
            row[..size].reverse();
        }
        out
    }

    /// Rotate in place.
    pub fn rotate_cw(&mut self) {
        *self = self.rotated_cw();
    }
}
