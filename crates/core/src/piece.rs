//! Piece module - a shape placed on the board
//!
//! Moves and rotations are commit-or-revert: the candidate placement is
//! checked with [`is_colliding`] and discarded when it fails, leaving the
//! piece exactly as it was.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::collision::is_colliding;
use crate::shape::Shape;
use crate::types::{Cell, PieceKind, BOARD_WIDTH};

/// How a rotation that collides is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// Rotate in place; a colliding rotation is discarded.
    #[default]
    Naive,
    /// Retry a colliding rotation at a few nearby offsets before discarding it.
    #[serde(alias = "wall_kick", alias = "kick")]
    WallKick,
}

impl RotationPolicy {
    /// Parse from a config string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "naive" => Some(RotationPolicy::Naive),
            "wallkick" | "wall_kick" | "kick" => Some(RotationPolicy::WallKick),
            _ => None,
        }
    }
}

/// Offsets tried by [`RotationPolicy::WallKick`], in order.
const KICKS: [(i8, i8); 6] = [(0, 0), (1, 0), (-1, 0), (2, 0), (-2, 0), (0, -1)];

/// Active or queued piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Board column of the shape's left edge.
    pub x: i8,
    /// Board row of the shape's top edge.
    pub y: i8,
}

impl Piece {
    /// Create a piece in its canonical orientation at the spawn position:
    /// horizontally centered, top row of the matrix on board row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::canonical(kind);
        Self {
            kind,
            shape,
            x: spawn_column(shape.size()),
            y: 0,
        }
    }

    /// Occupied cells in board coordinates as `(x, y, value)`.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy, v)| (self.x + dx, self.y + dy, v))
    }

    /// Copy of this piece shifted by (dx, dy).
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Move by (dx, dy) unless the destination collides.
    ///
    /// Returns false and leaves the piece untouched on collision.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let candidate = self.translated(dx, dy);
        if is_colliding(&candidate, board) {
            return false;
        }
        *self = candidate;
        true
    }

    /// Rotate clockwise according to `policy`.
    ///
    /// Returns false and leaves shape and position untouched when no
    /// placement is legal.
    pub fn try_rotate(&mut self, board: &Board, policy: RotationPolicy) -> bool {
        let rotated = Self {
            shape: self.shape.rotated_cw(),
            ..*self
        };
        let kicks: &[(i8, i8)] = match policy {
            RotationPolicy::Naive => &KICKS[..1],
            RotationPolicy::WallKick => &KICKS,
        };

        for &(dx, dy) in kicks {
            let candidate = rotated.translated(dx, dy);
            if !is_colliding(&candidate, board) {
                *self = candidate;
                return true;
            }
        }
        false
    }
}

/// Spawn column for a shape of the given side length.
pub fn spawn_column(size: usize) -> i8 {
    (BOARD_WIDTH as i8) / 2 - (size as i8) / 2
}
