//! The falling piece.

use crate::catalog::{get_shape, spawn_shape, Shape};
use crate::grid::Grid;
use crate::types::{PieceKind, Rotation, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// Active falling piece
///
/// `shape` always equals the catalog shape for `kind` in `rotation`; it is
/// cached so collision checks do not go back to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece of `kind` at the spawn position, one row above the grid.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            shape: spawn_shape(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// A piece of `kind` horizontally centered on the top row.
    ///
    /// Used when a held piece is swapped back in.
    pub fn centered(kind: PieceKind) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            rotation: Rotation::North,
            shape,
            x: (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8,
            y: 0,
        }
    }

    /// Same piece moved by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece in `rotation`, at the same origin.
    pub fn with_rotation(&self, rotation: Rotation, shape: Shape) -> Self {
        debug_assert_eq!(shape, get_shape(self.kind, rotation));
        Self {
            rotation,
            shape,
            ..*self
        }
    }

    pub fn collides(&self, grid: &Grid) -> bool {
        grid.collides(&self.shape, self.x, self.y)
    }

    /// One row lower would collide.
    pub fn is_grounded(&self, grid: &Grid) -> bool {
        grid.collides(&self.shape, self.x, self.y + 1)
    }

    /// Absolute grid coordinates of the four minos.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Any mino sits above the top edge.
    pub fn is_above_top(&self) -> bool {
        self.cells().any(|(_, y)| y < 0)
    }

    /// Row the piece would come to rest on if dropped straight down.
    pub fn landing_y(&self, grid: &Grid) -> i8 {
        let mut y = self.y;
        while !grid.collides(&self.shape, self.x, y + 1) {
            y += 1;
        }
        y
    }
}
