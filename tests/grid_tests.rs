//! Grid tests - collision, merge and row sweep through the public API

use blockfall::core::catalog::{get_shape, spawn_shape};
use blockfall::core::Grid;
use blockfall::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(grid.get(x, y), Some(None), "cell ({x}, {y})");
        }
    }
    assert_eq!(grid.filled_count(), 0);
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new();
    assert!(grid.set(5, 10, Some(PieceKind::T)));
    assert_eq!(grid.get(5, 10), Some(Some(PieceKind::T)));
    assert!(grid.is_occupied(5, 10));

    assert!(grid.set(5, 10, None));
    assert!(!grid.is_occupied(5, 10));

    assert!(!grid.set(-1, 0, Some(PieceKind::T)));
    assert!(!grid.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_collision_with_every_wall() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        let shape = spawn_shape(kind);
        assert!(grid.collides(&shape, -3, 5), "{kind:?} left");
        assert!(grid.collides(&shape, BOARD_WIDTH as i8, 5), "{kind:?} right");
        assert!(grid.collides(&shape, 3, BOARD_HEIGHT as i8), "{kind:?} floor");
        assert!(!grid.collides(&shape, 3, 5), "{kind:?} open space");
    }
}

#[test]
fn test_rows_above_top_are_open() {
    let grid = Grid::new();
    let i_vertical = get_shape(PieceKind::I, Rotation::East);
    // Column 2 of the matrix, all four rows above the grid.
    assert!(!grid.collides(&i_vertical, 0, -4));
    // ...but the side walls still apply up there.
    assert!(grid.collides(&i_vertical, -3, -4));
    assert!(grid.collides(&i_vertical, 8, -4));
}

#[test]
fn test_merge_marks_only_in_bounds_cells() {
    let mut grid = Grid::new();
    let i_vertical = get_shape(PieceKind::I, Rotation::East);
    grid.merge(&i_vertical, 0, -2, PieceKind::I);

    assert_eq!(grid.filled_count(), 2);
    assert_eq!(grid.get(2, 0), Some(Some(PieceKind::I)));
    assert_eq!(grid.get(2, 1), Some(Some(PieceKind::I)));
}

#[test]
fn test_full_row_detection() {
    let mut grid = Grid::new();
    grid.fill_row_except(19, PieceKind::O, &[7]);
    assert!(!grid.is_row_full(19));
    grid.set(7, 19, Some(PieceKind::O));
    assert!(grid.is_row_full(19));
    assert!(!grid.is_row_full(99));
}

#[test]
fn test_sweep_is_idempotent() {
    let mut grid = Grid::new();
    grid.fill_row_except(19, PieceKind::L, &[]);
    grid.fill_row_except(17, PieceKind::J, &[]);
    grid.fill_row_except(18, PieceKind::S, &[2, 3]);

    assert_eq!(grid.sweep_full_rows(), 2);
    let after = grid.clone();
    assert_eq!(grid.sweep_full_rows(), 0);
    assert_eq!(grid, after);

    // The partial row fell to the floor.
    assert_eq!(grid.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(grid.get(2, 19), Some(None));
    assert_eq!(grid.filled_count(), 8);
}

#[test]
fn test_sweep_every_row() {
    let mut grid = Grid::new();
    for y in 0..BOARD_HEIGHT as i8 {
        grid.fill_row_except(y, PieceKind::Z, &[]);
    }
    assert_eq!(grid.sweep_full_rows(), BOARD_HEIGHT as usize);
    assert_eq!(grid, Grid::new());
}

#[test]
fn test_sweep_drops_floating_cells_by_cleared_count_below() {
    let mut grid = Grid::new();
    grid.set(4, 5, Some(PieceKind::T));
    grid.fill_row_except(10, PieceKind::I, &[]);
    grid.fill_row_except(15, PieceKind::I, &[]);

    assert_eq!(grid.sweep_full_rows(), 2);
    assert_eq!(grid.get(4, 7), Some(Some(PieceKind::T)));
    assert_eq!(grid.filled_count(), 1);
}
