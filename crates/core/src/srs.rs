//! SRS rotation - wall kick tables and rotation resolution
//! Reference: https://tetris.wiki/Super_Rotation_System
//!
//! Kick offsets are stored as (dx, dy) with y pointing up, the way the
//! reference tables are written. The grid's y axis points down, so the
//! vertical component is negated when a kick is applied.

use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::types::{PieceKind, RotateDirection, Rotation};

/// One kick offset (dx, dy), y up.
pub type Kick = (i8, i8);

/// Five candidate offsets for one transition; the first is always (0, 0).
pub type KickSet = [Kick; 5];

/// Indexed by `[from.index()][direction]`, direction 0 = CW, 1 = CCW.
pub type KickTable = [[KickSet; 2]; 4];

/// Which kick table a piece kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    I,
    Jlstz,
}

impl KickClass {
    /// `None` for O, which never rotates.
    pub fn of(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::O => None,
            PieceKind::I => Some(KickClass::I),
            PieceKind::T | PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L => {
                Some(KickClass::Jlstz)
            }
        }
    }

    fn table(&self) -> &'static KickTable {
        match self {
            KickClass::I => &I_KICKS,
            KickClass::Jlstz => &JLSTZ_KICKS,
        }
    }
}

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // from 0: 0->1, 0->3
    [
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    // from 1: 1->2, 1->0
    [
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    ],
    // from 2: 2->3, 2->1
    [
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    ],
    // from 3: 3->0, 3->2
    [
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    ],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // from 0: 0->1, 0->3
    [
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    ],
    // from 1: 1->2, 1->0
    [
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    ],
    // from 2: 2->3, 2->1
    [
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    ],
    // from 3: 3->0, 3->2
    [
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    ],
];

/// Kick candidates for rotating `kind` out of `from` in `dir`.
pub fn kicks(kind: PieceKind, from: Rotation, dir: RotateDirection) -> Option<&'static KickSet> {
    let class = KickClass::of(kind)?;
    let column = match dir {
        RotateDirection::Cw => 0,
        RotateDirection::Ccw => 1,
    };
    Some(&class.table()[from.index()][column])
}

/// Rotate `piece` in `dir`, trying each kick in order.
///
/// Returns the first placement that does not collide, or `None` when the
/// piece is an O or every kick is blocked.
pub fn try_rotate(piece: &ActivePiece, dir: RotateDirection, grid: &Grid) -> Option<ActivePiece> {
    let kicks = kicks(piece.kind, piece.rotation, dir)?;
    let rotated = piece.with_rotation(piece.rotation.rotate(dir), piece.shape.rotated(dir));

    kicks
        .iter()
        .map(|&(kx, ky)| rotated.shifted(kx, -ky))
        .find(|candidate| !candidate.collides(grid))
}
