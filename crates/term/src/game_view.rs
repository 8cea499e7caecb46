//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: the board frame with the side panel to its right,
//! then the slot tray, then the status line.

use crate::core::{GameSnapshot, Piece, Preview};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PIECE_PREVIEW_SIZE;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const FILLED_FG: Rgb = Rgb::new(80, 200, 230);
const VALID_FG: Rgb = Rgb::new(100, 220, 120);
const INVALID_FG: Rgb = Rgb::new(220, 80, 80);
const BURST_FG: Rgb = Rgb::new(255, 220, 90);

/// Gap between slot previews in the tray, in terminal columns.
const TRAY_GAP: u16 = 2;

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

/// Front-end state drawn over the board: the cursor and the hover preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardOverlay {
    pub cursor: Option<(usize, usize)>,
    pub preview: Option<Preview>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen positions of each region for one frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    tray_y: u16,
    status_y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Rows needed to show every region for a board of `board_size`.
    pub fn content_height(&self, board_size: u8) -> u16 {
        let frame_h = board_size as u16 * self.cell_h + 2;
        // gap + tray label + previews + gap + status
        frame_h + 1 + 1 + PIECE_PREVIEW_SIZE as u16 + 1 + 1
    }

    /// Render into an existing framebuffer without a cursor or preview.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_overlay(snap, None, viewport, fb);
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into_with_overlay(
        &self,
        snap: &GameSnapshot,
        overlay: Option<&BoardOverlay>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap, viewport);
        let board_px_w = snap.board_size as u16 * self.cell_w;
        let board_px_h = snap.board_size as u16 * self.cell_h;

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            bg,
        );
        self.draw_border(
            fb,
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        let side = snap.board_size as usize;
        for y in 0..side {
            for x in 0..side {
                if snap.is_bursting(x, y) {
                    let style = CellStyle::new(BURST_FG, BOARD_BG).bold();
                    self.fill_cell_rect(fb, &layout, x, y, '▓', style);
                } else if snap.cell(x, y) {
                    let style = CellStyle::new(FILLED_FG, BOARD_BG).bold();
                    self.fill_cell_rect(fb, &layout, x, y, '█', style);
                } else {
                    self.draw_empty_cell(fb, &layout, x, y);
                }
            }
        }

        if let Some(overlay) = overlay.filter(|_| !snap.game_over) {
            self.draw_overlay(fb, snap, overlay, &layout);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);
        self.draw_tray(fb, snap, &layout);

        let status = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);
        fb.put_str(layout.start_x, layout.status_y, &snap.status, status);

        if snap.game_over {
            self.draw_overlay_text(fb, &layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        self.render_with_overlay(snap, None, viewport)
    }

    pub fn render_with_overlay(
        &self,
        snap: &GameSnapshot,
        overlay: Option<&BoardOverlay>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_overlay(snap, overlay, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let frame_w = snap.board_size as u16 * self.cell_w + 2;
        let frame_h = snap.board_size as u16 * self.cell_h + 2;
        let content_h = self.content_height(snap.board_size);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(content_h) / 2,
            AnchorY::Top => 0,
        };
        let tray_y = start_y.saturating_add(frame_h).saturating_add(1);
        let status_y = tray_y
            .saturating_add(1)
            .saturating_add(PIECE_PREVIEW_SIZE as u16)
            .saturating_add(1);

        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
            tray_y,
            status_y,
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: &Layout, x: usize, y: usize) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, layout, x, y, '·', style);
    }

    /// Preview footprint in green or red, else a bracket cursor.
    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        overlay: &BoardOverlay,
        layout: &Layout,
    ) {
        if let Some(preview) = &overlay.preview {
            let fg = if preview.valid { VALID_FG } else { INVALID_FG };
            let style = CellStyle::new(fg, BOARD_BG);
            for &(x, y) in &preview.cells {
                self.fill_cell_rect(fb, layout, x, y, '▒', style);
            }
            return;
        }

        let Some((cx, cy)) = overlay.cursor else {
            return;
        };
        let side = snap.board_size as usize;
        if cx >= side || cy >= side {
            return;
        }
        let style = CellStyle::new(Rgb::new(255, 255, 255), BOARD_BG).bold();
        let px = layout.start_x + 1 + cx as u16 * self.cell_w;
        let py = layout.start_y + 1 + cy as u16 * self.cell_h;
        fb.put_char(px, py, '[', style);
        fb.put_char(px + self.cell_w.saturating_sub(1), py, ']', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        cell_x: usize,
        cell_y: usize,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.start_x + 1 + cell_x as u16 * self.cell_w;
        let py = layout.start_y + 1 + cell_y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.best, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COMBO", label);
        y = y.saturating_add(1);
        let x = fb.put_str(panel_x, y, "x", value);
        fb.put_u32(x, y, snap.combo, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GOAL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &snap.goal.text, value);
        y = y.saturating_add(1);
        let bar_w = (panel_w - 2).min(20);
        fb.put_bar(
            panel_x,
            y,
            bar_w,
            snap.goal.progress,
            CellStyle::new(VALID_FG, PANEL_BG),
            value.dim(),
        );
    }

    /// Slot previews on a 5x5 grid, "USED" for emptied slots.
    fn draw_tray(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
        let selected = label.bold();
        let slot_w = PIECE_PREVIEW_SIZE as u16 * self.cell_w;

        for (i, slot) in snap.slots.iter().enumerate() {
            let x = layout
                .start_x
                .saturating_add(i as u16 * (slot_w + TRAY_GAP));
            let is_selected = snap.selected == Some(i);
            let style = if is_selected { selected } else { label };

            let mut lx = x;
            if is_selected {
                lx = fb.put_str(lx, layout.tray_y, ">", style);
            }
            fb.put_u32(lx, layout.tray_y, i as u32 + 1, style);

            match slot {
                Some(piece) => self.draw_piece_preview(fb, piece, x, layout.tray_y + 1, is_selected),
                None => {
                    let used = CellStyle::new(Rgb::new(120, 120, 120), PANEL_BG).dim();
                    let mid = layout.tray_y + 1 + PIECE_PREVIEW_SIZE as u16 / 2;
                    fb.put_str(x + slot_w.saturating_sub(4) / 2, mid, "USED", used);
                }
            }
        }
    }

    fn draw_piece_preview(
        &self,
        fb: &mut FrameBuffer,
        piece: &Piece,
        x: u16,
        y: u16,
        highlight: bool,
    ) {
        let fg = if highlight { BURST_FG } else { FILLED_FG };
        let filled = CellStyle::new(fg, PANEL_BG);
        let empty = CellStyle::new(Rgb::new(60, 60, 70), PANEL_BG).dim();

        for dy in 0..PIECE_PREVIEW_SIZE {
            for dx in 0..PIECE_PREVIEW_SIZE {
                let px = x + dx as u16 * self.cell_w;
                let py = y + dy as u16;
                if piece.contains(dx, dy) {
                    fb.fill_rect(px, py, self.cell_w, 1, '█', filled);
                } else {
                    fb.fill_rect(px, py, self.cell_w, 1, '·', empty);
                }
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
