//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable. Board rows are bottom-up
//! in the snapshot; the view flips them to screen rows here.

use crate::core::GameSnapshot;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Shape, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Session info the engine does not own: the stored best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudInfo {
    pub best: Option<u32>,
    /// Set when the just-finished game beat the stored best.
    pub new_best: bool,
}

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(&self, snap: &GameSnapshot, hud: HudInfo, viewport: Viewport, fb: &mut FrameBuffer) {
        // resize also blanks the previous frame.
        fb.resize(viewport.width, viewport.height);

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + HUD_WIDTH) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well = CellStyle::colored(Rgb(70, 70, 80), Rgb(18, 24, 24));
        let border = CellStyle::colored(Rgb(200, 200, 200), Rgb(0, 0, 0));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', well);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                if let Some(shape) = snap.board[y][x] {
                    self.paint_cell(fb, start_x, start_y, x as i8, y as i8, ' ', block_style(shape));
                }
            }
        }

        // Drop shadow first, active piece over it.
        if let Some(shadow) = snap.shadow {
            for &(x, y) in &shadow {
                let shape = snap.active.map(|a| a.shape);
                let style = shape.map(shadow_style).unwrap_or(well).dimmed();
                self.paint_cell(fb, start_x, start_y, x, y, '░', style);
            }
        }
        if let Some(active) = snap.active {
            for &(x, y) in &active.cells {
                self.paint_cell(fb, start_x, start_y, x, y, ' ', block_style(active.shape));
            }
        }

        self.draw_hud(fb, snap, hud, start_x + frame_w + 2, start_y + 1);

        // Overlays.
        if snap.paused {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: HudInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Paint one board cell as a `cell_w` x `cell_h` glyph block.
    fn paint_cell(&self, fb: &mut FrameBuffer, sx: u16, sy: u16, x: i8, y: i8, ch: char, style: CellStyle) {
        let Some((px, py)) = self.cell_origin(sx, sy, x, y) else {
            return;
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Screen origin of board cell (x, y), flipping y to screen rows.
    fn cell_origin(&self, sx: u16, sy: u16, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        let px = sx + 1 + (x as u16) * self.cell_w;
        let py = sy + 1 + (BOARD_HEIGHT as u16 - 1 - y as u16) * self.cell_h;
        Some((px, py))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: HudInfo, x: u16, y: u16) {
        let label = CellStyle::colored(Rgb(150, 150, 160), Rgb(0, 0, 0));
        let value = CellStyle::colored(Rgb(240, 240, 240), Rgb(0, 0, 0)).bold();

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 1, &snap.score.to_string(), value);
        fb.put_str(x, y + 3, "LEVEL", label);
        fb.put_str(x, y + 4, &snap.level.to_string(), value);
        fb.put_str(x, y + 6, "BEST", label);
        match hud.best {
            Some(best) => fb.put_str(x, y + 7, &best.to_string(), value),
            None => fb.put_str(x, y + 7, "-", value),
        }
        if hud.new_best && snap.game_over {
            fb.put_str(x, y + 9, "NEW BEST!", value);
        }

        let hint = CellStyle::colored(Rgb(110, 110, 120), Rgb(0, 0, 0)).dimmed();
        let hints = [
            "←/a →/d  move",
            "↑/w      rotate",
            "z        rotate ccw",
            "↓/s      soft drop",
            "space    hard drop",
            "p        pause",
            "r        restart",
            "q        quit",
        ];
        for (i, line) in hints.iter().enumerate() {
            fb.put_str(x, y + 11 + i as u16, line, hint);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
        let style = CellStyle::colored(Rgb(255, 255, 255), Rgb(60, 0, 0)).bold();
        let tx = x + w.saturating_sub(text.len() as u16) / 2;
        let ty = y + h / 2;
        fb.put_str(tx, ty, text, style);
    }
}

/// HUD panel width reserved to the right of the play field.
const HUD_WIDTH: u16 = 22;

/// Classic per-shape block colors.
fn block_style(shape: Shape) -> CellStyle {
    CellStyle::colored(Rgb(0, 0, 0), shape_rgb(shape))
}

fn shadow_style(shape: Shape) -> CellStyle {
    CellStyle::colored(shape_rgb(shape), Rgb(18, 24, 24))
}

fn shape_rgb(shape: Shape) -> Rgb {
    match shape {
        Shape::I => Rgb(0, 255, 255),
        Shape::J => Rgb(64, 64, 255),
        Shape::L => Rgb(255, 165, 0),
        Shape::O => Rgb(255, 255, 0),
        Shape::S => Rgb(0, 255, 0),
        Shape::T => Rgb(255, 0, 255),
        Shape::Z => Rgb(255, 0, 0),
    }
}
