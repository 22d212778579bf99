//! Piece catalog - shape matrices for the seven kinds
//!
//! Each kind is defined by its spawn matrix (2x2 for O, 4x4 for I, 3x3 for
//! the rest). The other three orientations are derived at compile time by
//! rotating the matrix clockwise, so the stored orientation for state `n`
//! is always `n` clockwise turns of the spawn matrix.

use crate::types::{PieceKind, Rgb, RotateDirection, Rotation};

/// Largest matrix side used by any kind (the I piece).
pub const MAX_SHAPE: usize = 4;

/// An NxN boolean matrix, stored in a fixed 4x4 block.
///
/// Only the top-left `size x size` corner is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [[bool; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    /// Build a shape from a square 0/1 matrix.
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N > 0 && N <= MAX_SHAPE);
        let mut out = [[false; MAX_SHAPE]; MAX_SHAPE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                out[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            size: N as u8,
            rows: out,
        }
    }

    /// Side length of the matrix.
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at column `x`, row `y` of the matrix is filled.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.rows[y][x]
    }

    /// Quarter turn clockwise: each new row is an old column read bottom-up.
    pub const fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut out = [[false; MAX_SHAPE]; MAX_SHAPE];
        let mut r = 0;
        while r < n {
            let mut c = 0;
            while c < n {
                out[r][c] = self.rows[n - 1 - c][r];
                c += 1;
            }
            r += 1;
        }
        Self {
            size: self.size,
            rows: out,
        }
    }

    /// Quarter turn counter-clockwise: each new row is an old column read
    /// from the right edge inwards.
    pub const fn rotated_ccw(&self) -> Self {
        let n = self.size as usize;
        let mut out = [[false; MAX_SHAPE]; MAX_SHAPE];
        let mut r = 0;
        while r < n {
            let mut c = 0;
            while c < n {
                out[r][c] = self.rows[c][n - 1 - r];
                c += 1;
            }
            r += 1;
        }
        Self {
            size: self.size,
            rows: out,
        }
    }

    pub fn rotated(&self, dir: RotateDirection) -> Self {
        match dir {
            RotateDirection::Cw => self.rotated_cw(),
            RotateDirection::Ccw => self.rotated_ccw(),
        }
    }

    /// Offsets `(dx, dy)` of filled cells, row by row.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.rows[y][x].then_some((x as i8, y as i8)))
        })
    }
}

/// Static definition of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    /// Indexed by [`Rotation::index`].
    pub shapes: [Shape; 4],
}

impl PieceDef {
    const fn new(kind: PieceKind, spawn: Shape) -> Self {
        let east = spawn.rotated_cw();
        let south = east.rotated_cw();
        let west = south.rotated_cw();
        Self {
            kind,
            shapes: [spawn, east, south, west],
        }
    }

    pub fn shape(&self, rotation: Rotation) -> Shape {
        self.shapes[rotation.index()]
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }
}

const I_DEF: PieceDef = PieceDef::new(
    PieceKind::I,
    Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
);
const O_DEF: PieceDef = PieceDef::new(PieceKind::O, Shape::from_rows([[1, 1], [1, 1]]));
const T_DEF: PieceDef = PieceDef::new(
    PieceKind::T,
    Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
);
const S_DEF: PieceDef = PieceDef::new(
    PieceKind::S,
    Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
);
const Z_DEF: PieceDef = PieceDef::new(
    PieceKind::Z,
    Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
);
const J_DEF: PieceDef = PieceDef::new(
    PieceKind::J,
    Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
);
const L_DEF: PieceDef = PieceDef::new(
    PieceKind::L,
    Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
);

/// Catalog entry for `kind`.
pub fn piece_def(kind: PieceKind) -> &'static PieceDef {
    match kind {
        PieceKind::I => &I_DEF,
        PieceKind::O => &O_DEF,
        PieceKind::T => &T_DEF,
        PieceKind::S => &S_DEF,
        PieceKind::Z => &Z_DEF,
        PieceKind::J => &J_DEF,
        PieceKind::L => &L_DEF,
    }
}

/// Shape of `kind` in `rotation`.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> Shape {
    piece_def(kind).shape(rotation)
}

/// Orientation-0 shape used when a piece spawns.
pub fn spawn_shape(kind: PieceKind) -> Shape {
    get_shape(kind, Rotation::North)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minos(shape: Shape) -> Vec<(i8, i8)> {
        shape.minos().collect()
    }

    #[test]
    fn every_orientation_has_four_minos() {
        for kind in PieceKind::ALL {
            for shape in piece_def(kind).shapes {
                assert_eq!(shape.minos().count(), 4, "{kind:?}");
            }
        }
    }

    #[test]
    fn matrix_sizes() {
        assert_eq!(spawn_shape(PieceKind::I).size(), 4);
        assert_eq!(spawn_shape(PieceKind::O).size(), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(spawn_shape(kind).size(), 3);
        }
    }

    #[test]
    fn t_orientations() {
        assert_eq!(
            minos(get_shape(PieceKind::T, Rotation::North)),
            vec![(1, 0), (0, 1), (1, 1), (2, 1)]
        );
        assert_eq!(
            minos(get_shape(PieceKind::T, Rotation::East)),
            vec![(1, 0), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            minos(get_shape(PieceKind::T, Rotation::South)),
            vec![(0, 1), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            minos(get_shape(PieceKind::T, Rotation::West)),
            vec![(1, 0), (0, 1), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn i_east_is_vertical_in_third_column() {
        assert_eq!(
            minos(get_shape(PieceKind::I, Rotation::East)),
            vec![(2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn ccw_matches_catalog_orientation() {
        for kind in PieceKind::ALL {
            let def = piece_def(kind);
            for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
                let ccw = def.shape(rotation).rotated(RotateDirection::Ccw);
                assert_eq!(ccw, def.shape(rotation.rotate_ccw()), "{kind:?} {rotation:?}");
                let cw = def.shape(rotation).rotated(RotateDirection::Cw);
                assert_eq!(cw, def.shape(rotation.rotate_cw()), "{kind:?} {rotation:?}");
            }
        }
    }

    #[test]
    fn o_is_rotation_invariant() {
        let o = spawn_shape(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
        assert_eq!(o.rotated_ccw(), o);
    }

    #[test]
    fn is_filled_ignores_cells_outside_matrix() {
        let o = spawn_shape(PieceKind::O);
        assert!(o.is_filled(1, 1));
        assert!(!o.is_filled(2, 0));
        assert!(!o.is_filled(0, 3));
    }
}
