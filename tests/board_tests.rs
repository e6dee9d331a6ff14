//! Board tests: occupancy, collision predicate, line mechanics.

use blockfall::core::{Board, Piece};
use blockfall::types::{Shape, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, shape: Shape) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(shape));
    }
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.occupied_cells(), 0);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None));
            assert!(board.is_free(x, y));
        }
    }
}

#[test]
fn test_get_out_of_range() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(Shape::T)));
    assert_eq!(board.get(5, 10), Some(Some(Shape::T)));

    // Overwrites unconditionally.
    assert!(board.set(5, 10, Some(Shape::I)));
    assert_eq!(board.get(5, 10), Some(Some(Shape::I)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
}

#[test]
fn test_set_out_of_range() {
    let mut board = Board::new();
    assert!(!board.set(-1, 0, Some(Shape::T)));
    assert!(!board.set(0, -1, Some(Shape::T)));
    assert!(!board.set(BOARD_WIDTH as i8, 0, Some(Shape::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(Shape::T)));
}

#[test]
fn test_is_free_semantics() {
    let mut board = Board::new();
    assert!(board.is_free(5, 10));

    board.set(5, 10, Some(Shape::T));
    assert!(!board.is_free(5, 10));

    // Off-board is "not placeable", not an error.
    assert!(!board.is_free(-1, 0));
    assert!(!board.is_free(0, -1));
    assert!(!board.is_free(BOARD_WIDTH as i8, 0));
    assert!(!board.is_free(0, BOARD_HEIGHT as i8));
}

#[test]
fn test_lock_piece_writes_shape_cells() {
    let mut board = Board::new();
    let o = Piece::new(Shape::O);

    // O offsets (0,0) (1,0) (0,1) (1,1) lock at (x+dx, y-dy).
    assert!(board.lock_piece(&o, 4, 5));
    assert_eq!(board.get(4, 5), Some(Some(Shape::O)));
    assert_eq!(board.get(5, 5), Some(Some(Shape::O)));
    assert_eq!(board.get(4, 4), Some(Some(Shape::O)));
    assert_eq!(board.get(5, 4), Some(Some(Shape::O)));
    assert_eq!(board.occupied_cells(), 4);
}

#[test]
fn test_lock_piece_rejects_collision() {
    let mut board = Board::new();
    board.set(4, 4, Some(Shape::T));

    let o = Piece::new(Shape::O);
    assert!(!board.lock_piece(&o, 4, 5));

    // Nothing else was written.
    assert_eq!(board.occupied_cells(), 1);
    assert_eq!(board.get(4, 5), Some(None));
}

#[test]
fn test_lock_piece_rejects_out_of_range() {
    let mut board = Board::new();
    let i = Piece::new(Shape::I);

    // Vertical I at the top row would poke above the board.
    assert!(!board.lock_piece(&i, 4, BOARD_HEIGHT as i8));
    assert_eq!(board.occupied_cells(), 0);
}

#[test]
fn test_is_row_full() {
    let mut board = Board::new();
    assert!(!board.is_row_full(3));

    fill_row(&mut board, 3, Shape::S);
    assert!(board.is_row_full(3));

    board.set(7, 3, None);
    assert!(!board.is_row_full(3));

    // Out of range is never full.
    assert!(!board.is_row_full(-1));
    assert!(!board.is_row_full(BOARD_HEIGHT as i8));
}

#[test]
fn test_clear_full_lines_no_full_rows() {
    let mut board = Board::new();
    board.set(0, 0, Some(Shape::J));
    board.set(9, 5, Some(Shape::L));
    let before = board.clone();

    let cleared = board.clear_full_lines();
    assert!(cleared.is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_single_row_shifts_down() {
    let mut board = Board::new();
    fill_row(&mut board, 0, Shape::I);
    board.set(3, 1, Some(Shape::T));
    board.set(4, 2, Some(Shape::O));

    let cleared = board.clear_full_lines();
    assert_eq!(cleared.len(), 1);

    // Rows above the cleared row dropped by exactly one.
    assert_eq!(board.get(3, 0), Some(Some(Shape::T)));
    assert_eq!(board.get(4, 1), Some(Some(Shape::O)));
    assert_eq!(board.get(4, 2), Some(None));
    assert_eq!(board.occupied_cells(), 2);
}

#[test]
fn test_clear_scattered_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 2, Shape::I);
    fill_row(&mut board, 5, Shape::O);
    board.set(0, 3, Some(Shape::J));
    board.set(1, 6, Some(Shape::L));

    let occupied_before = board.occupied_cells();
    let cleared = board.clear_full_lines();
    assert_eq!(cleared.len(), 2);

    // Total occupancy drops by exactly W per cleared row.
    assert_eq!(
        board.occupied_cells(),
        occupied_before - 2 * BOARD_WIDTH as usize
    );

    // J was one above row 2: drops by one. L was one above row 5: drops by two.
    assert_eq!(board.get(0, 2), Some(Some(Shape::J)));
    assert_eq!(board.get(1, 4), Some(Some(Shape::L)));
}

#[test]
fn test_clear_four_stacked_rows() {
    let mut board = Board::new();
    for y in 0..4 {
        fill_row(&mut board, y, Shape::I);
    }
    board.set(9, 4, Some(Shape::Z));

    let cleared = board.clear_full_lines();
    assert_eq!(cleared.len(), 4);
    assert_eq!(board.get(9, 0), Some(Some(Shape::Z)));
    assert_eq!(board.occupied_cells(), 1);
}

#[test]
fn test_clear_resets_everything() {
    let mut board = Board::new();
    fill_row(&mut board, 0, Shape::I);
    fill_row(&mut board, 10, Shape::T);

    board.clear();
    assert_eq!(board.occupied_cells(), 0);
}
