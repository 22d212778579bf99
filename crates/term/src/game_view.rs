//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::catalog::spawn_shape;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Where the board frame sits on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a cell in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Board frame position for `viewport`, centered.
    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let panel_w = 14;
        BoardLayout {
            origin_x: viewport.width.saturating_sub(frame_w + panel_w) / 2,
            origin_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    ///
    /// Reusing one framebuffer across frames keeps this allocation-free.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();

        self.draw_border(fb, &layout, border);

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_code(snap.code_at(x as usize, y as usize)) {
                    Some(kind) => self.draw_block(fb, &layout, x as i8, y as i8, kind),
                    None => self.fill_board_cell(fb, &layout, x, y, '·', empty),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let drop = ghost_y - active.y;
                let ghost = CellStyle::new(dimmed(active.kind.color()), PLAYFIELD_BG).dim();
                for (x, y) in active.cells {
                    if let Some((cx, cy)) = on_board(x, y + drop) {
                        self.fill_board_cell(fb, &layout, cx, cy, '░', ghost);
                    }
                }
            }
            for (x, y) in active.cells {
                self.draw_block(fb, &layout, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.paused {
            self.draw_overlay_text(fb, &layout, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &BoardLayout, style: CellStyle) {
        let (x, y, w, h) = (layout.origin_x, layout.origin_y, layout.frame_w, layout.frame_h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// A solid block in `kind`'s color. Cells off the board are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, layout: &BoardLayout, x: i8, y: i8, kind: PieceKind) {
        if let Some((cx, cy)) = on_board(x, y) {
            let style = CellStyle::new(kind.color(), PLAYFIELD_BG).bold();
            self.fill_board_cell(fb, layout, cx, cy, '█', style);
        }
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.origin_x + 1 + cell_x * self.cell_w;
        let py = layout.origin_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Spawn-orientation picture of `kind`, two rows tall.
    fn draw_mini(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, faded: bool) {
        let shape = spawn_shape(kind);
        let top = shape.minos().map(|(_, dy)| dy).min().unwrap_or(0);
        let mut style = CellStyle::new(kind.color(), PANEL_BG);
        if faded {
            style = style.dim();
        }
        for (dx, dy) in shape.minos() {
            let px = x.saturating_add(dx as u16 * self.cell_w);
            let py = y.saturating_add((dy - top) as u16);
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.origin_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.origin_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let mut queue = snap.next_queue.iter();
        if let Some(&first) = queue.next() {
            self.draw_mini(fb, panel_x, y, first, false);
        }
        y = y.saturating_add(3);
        for (i, kind) in queue.enumerate() {
            fb.put_str(panel_x + (i as u16) * 2, y, kind.as_str(), value.dim());
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(kind) => self.draw_mini(fb, panel_x, y, kind, !snap.can_hold),
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &BoardLayout, text: &str) {
        let mid_y = layout.origin_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .origin_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn dimmed(rgb: Rgb) -> Rgb {
    Rgb::new(rgb.r / 2, rgb.g / 2, rgb.b / 2)
}
