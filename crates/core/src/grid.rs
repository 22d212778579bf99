//! Grid module - the 10x20 playfield
//!
//! Cells live in a flat row-major array for cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Pieces may hang above the top edge (negative y); those
//! cells never collide with anything but the side walls.

use crate::catalog::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrite the cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape` placed with its top-left corner at (x, y) overlaps a
    /// wall, the floor, or a locked cell.
    ///
    /// Rows above the top edge are free space: a cell at negative y only
    /// collides if it is also outside the side walls.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.minos().any(|(dx, dy)| {
            let gx = x + dx;
            let gy = y + dy;
            if gx < 0 || gx >= BOARD_WIDTH as i8 || gy >= BOARD_HEIGHT as i8 {
                return true;
            }
            gy >= 0 && self.is_occupied(gx, gy)
        })
    }

    /// Write `kind` into every in-bounds cell covered by `shape` at (x, y).
    ///
    /// Cells outside the grid (typically above the top edge) are skipped.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in shape.minos() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Remaining rows keep their relative order and settle at the bottom;
    /// the vacated rows at the top come back empty. Every row, the topmost
    /// included, can be cleared.
    pub fn sweep_full_rows(&mut self) -> usize {
        let mut cleared = 0usize;
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// One row of cells, left to right. `None` below the floor.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        let start = y.checked_mul(WIDTH)?;
        self.cells.get(start..start + WIDTH)
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Flat row-major view of all cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Fill row `y` with `kind`, leaving the columns in `holes` empty.
    pub fn fill_row_except(&mut self, y: i8, kind: PieceKind, holes: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
    }

    /// Write the grid as cell codes (0 = empty, 1..=7 = kind).
    pub fn write_code_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, cell) in dst.iter_mut().zip(src) {
                *d = cell.map_or(0, |k| k.code());
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
