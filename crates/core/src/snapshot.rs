//! Read model handed to renderers once per frame.
//!
//! `GameSnapshot` is fixed-size (no heap fields) so the host can keep one around
//! and refill it with [`GameState::snapshot_into`](crate::GameState::snapshot_into)
//! every frame without allocating.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::game_state::Phase;
use crate::piece::ActivePiece;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

pub type CodeGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute (x, y) of each mino.
    pub cells: [(i8, i8); 4],
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        let mut cells = [(0i8, 0i8); 4];
        for (slot, cell) in cells.iter_mut().zip(piece.cells()) {
            *slot = cell;
        }
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            cells,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TimersSnapshot {
    pub drop_ms: u32,
    pub lock_ms: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Locked cells as piece codes, 0 = empty.
    pub board: CodeGrid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next_queue: ArrayVec<PieceKind, PREVIEW_LEN>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub paused: bool,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
    pub game_over_count: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.next_queue.clear();
        self.hold = None;
        self.can_hold = true;
        self.paused = false;
        self.phase = Phase::Falling;
        self.score = 0;
        self.lines = 0;
        self.game_over_count = 0;
        self.timers = TimersSnapshot::default();
    }

    /// Board code at (x, y), 0 when empty or out of range.
    pub fn code_at(&self, x: usize, y: usize) -> u8 {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next_queue: ArrayVec::new(),
            hold: None,
            can_hold: true,
            paused: false,
            phase: Phase::Falling,
            score: 0,
            lines: 0,
            game_over_count: 0,
            timers: TimersSnapshot::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_snapshot_copies_absolute_cells() {
        let piece = ActivePiece::spawn(PieceKind::O).shifted(0, 5);
        let snap = ActiveSnapshot::from(&piece);
        assert_eq!(snap.cells, [(3, 4), (4, 4), (3, 5), (4, 5)]);
        assert_eq!((snap.x, snap.y), (3, 4));
    }

    #[test]
    fn clear_restores_default() {
        let mut snap = GameSnapshot::default();
        snap.board[3][3] = 5;
        snap.score = 700;
        snap.next_queue.push(PieceKind::T);
        snap.paused = true;
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }

    #[test]
    fn code_at_is_bounds_checked() {
        let mut snap = GameSnapshot::default();
        snap.board[19][9] = 7;
        assert_eq!(snap.code_at(9, 19), 7);
        assert_eq!(snap.code_at(10, 19), 0);
        assert_eq!(snap.code_at(0, 20), 0);
    }
}
