//! Collision and ghost resolution.

use crate::board::Board;
use crate::piece::Piece;

/// Whether any occupied cell of `piece` is outside the walls, at or below the
/// floor, or on a locked cell. Cells above row 0 never collide.
pub fn is_colliding(piece: &Piece, board: &Board) -> bool {
    piece.cells().any(|(x, y, _)| board.is_blocked(x, y))
}

/// Lowest legal resting position of `piece` straight below its current one.
///
/// Pure: the input piece is not modified. A piece that already collides is
/// returned unchanged.
pub fn compute_ghost(piece: &Piece, board: &Board) -> Piece {
    let mut ghost = *piece;
    if is_colliding(&ghost, board) {
        return ghost;
    }
    while !is_colliding(&ghost.translated(0, 1), board) {
        ghost.y += 1;
    }
    ghost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn spawn_is_free_on_empty_board() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            assert!(!is_colliding(&Piece::spawn(kind), &board));
        }
    }

    #[test]
    fn above_top_is_allowed() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T).translated(0, -2);
        assert!(!is_colliding(&piece, &board));
    }

    #[test]
    fn ghost_lands_on_floor() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::O);
        let ghost = compute_ghost(&piece, &board);
        assert_eq!(ghost.y, 18);
        assert_eq!(piece.y, 0);
    }

    #[test]
    fn ghost_lands_on_stack() {
        let board = Board::from_ascii(&["....1.....", "....1....."]);
        let ghost = compute_ghost(&Piece::spawn(PieceKind::O), &board);
        // O covers columns 4-5 and rests on the two-high column at x=4.
        assert_eq!(ghost.y, 16);
        assert!(!is_colliding(&ghost, &board));
        assert!(is_colliding(&ghost.translated(0, 1), &board));
    }
}
