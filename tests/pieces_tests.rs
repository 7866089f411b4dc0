//! Piece movement, rotation and ghost tests

use blockfall::core::{compute_ghost, is_colliding, Board, Piece, RotationPolicy, Shape};
use blockfall::types::PieceKind;

fn offsets(shape: &Shape) -> Vec<(i8, i8)> {
    shape.occupied().map(|(x, y, _)| (x, y)).collect()
}

// ============== Shape Tests ==============

#[test]
fn test_matrix_sizes() {
    assert_eq!(Shape::canonical(PieceKind::I).size(), 4);
    assert_eq!(Shape::canonical(PieceKind::O).size(), 2);
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(Shape::canonical(kind).size(), 3, "{:?}", kind);
    }
}

#[test]
fn test_every_shape_has_four_cells_of_its_id() {
    for kind in PieceKind::ALL {
        let shape = Shape::canonical(kind);
        let cells: Vec<_> = shape.occupied().collect();
        assert_eq!(cells.len(), 4, "{:?}", kind);
        assert!(cells.iter().all(|&(_, _, v)| v == kind.id()));
    }
}

#[test]
fn test_t_rotates_clockwise() {
    let shape = Shape::canonical(PieceKind::T);
    assert_eq!(offsets(&shape), vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(
        offsets(&shape.rotated_cw()),
        vec![(1, 0), (1, 1), (2, 1), (1, 2)]
    );
}

#[test]
fn test_i_rotates_into_a_column() {
    let east = Shape::canonical(PieceKind::I).rotated_cw();
    assert_eq!(offsets(&east), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_o_rotation_is_identity() {
    let shape = Shape::canonical(PieceKind::O);
    assert_eq!(shape.rotated_cw(), shape);
}

#[test]
fn test_four_turns_return_to_start() {
    for kind in PieceKind::ALL {
        let start = Shape::canonical(kind);
        let mut shape = start;
        for _ in 0..4 {
            shape.rotate_cw();
        }
        assert_eq!(shape, start, "{:?}", kind);
    }
}

// ============== Movement Tests ==============

#[test]
fn test_move_stops_at_walls() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::O);

    let mut steps = 0;
    while piece.try_move(&board, -1, 0) {
        steps += 1;
    }
    assert_eq!(steps, 4);
    assert_eq!(piece.x, 0);

    let before = piece;
    assert!(!piece.try_move(&board, -1, 0));
    assert_eq!(piece, before);
}

#[test]
fn test_move_blocked_by_stack() {
    let board = Board::from_ascii(&["....11...."]);
    let mut piece = Piece::spawn(PieceKind::O).translated(0, 17);
    assert!(!piece.try_move(&board, 0, 1));
    assert_eq!(piece.y, 17);
}

// ============== Rotation Tests ==============

#[test]
fn test_failed_rotation_leaves_piece_untouched() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);
    assert!(piece.try_rotate(&board, RotationPolicy::Naive));
    while piece.try_move(&board, -1, 0) {}
    // Vertical bar hugging the left wall; a turn would poke through it.
    assert_eq!(piece.x, -2);

    let before = piece;
    assert!(!piece.try_rotate(&board, RotationPolicy::Naive));
    assert_eq!(piece, before);
    assert!(!piece.try_rotate(&board, RotationPolicy::Naive));
    assert_eq!(piece, before);
}

#[test]
fn test_wall_kick_rescues_rotation() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);
    piece.try_rotate(&board, RotationPolicy::Naive);
    while piece.try_move(&board, -1, 0) {}

    assert!(piece.try_rotate(&board, RotationPolicy::WallKick));
    assert!(!is_colliding(&piece, &board));
    assert_eq!(piece.x, 0);
}

#[test]
fn test_rotation_policy_parses() {
    assert_eq!(RotationPolicy::from_str("NAIVE"), Some(RotationPolicy::Naive));
    assert_eq!(RotationPolicy::from_str("wall_kick"), Some(RotationPolicy::WallKick));
    assert_eq!(RotationPolicy::from_str("srs"), None);
}

// ============== Ghost Tests ==============

#[test]
fn test_ghost_is_lowest_legal_row() {
    let board = Board::from_ascii(&["1.........", "11........", "111......."]);
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        let ghost = compute_ghost(&piece, &board);

        assert_eq!(ghost.x, piece.x);
        assert_eq!(ghost.shape, piece.shape);
        assert!(ghost.y >= piece.y);
        assert!(!is_colliding(&ghost, &board), "{:?}", kind);
        assert!(is_colliding(&ghost.translated(0, 1), &board), "{:?}", kind);
    }
}

#[test]
fn test_ghost_of_spawned_t_on_empty_board() {
    let ghost = compute_ghost(&Piece::spawn(PieceKind::T), &Board::new());
    assert_eq!(ghost.y, 18);
}
