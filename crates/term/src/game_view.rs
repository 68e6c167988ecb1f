//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{countdown_mask, CellMask, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, GRID_HEIGHT, GRID_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Found words listed in the side panel at most
const PANEL_WORDS: usize = 8;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board frame position inside the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view for the letter board.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns (the letter sits in the middle).
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3 columns per cell keeps the square grid roughly square on screen.
        Self {
            cell_w: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = (GRID_WIDTH as u16) * self.cell_w;
        let board_h = GRID_HEIGHT as u16;
        let w = board_w + 2;
        let h = board_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        if let Some(mask) = snap.countdown.and_then(countdown_mask) {
            self.draw_countdown(fb, frame, mask);
        } else {
            self.draw_board(fb, frame, snap);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            GamePhase::Paused => draw_overlay_text(fb, frame, "PAUSED"),
            GamePhase::GameOver => draw_overlay_text(fb, frame, "GAME OVER"),
            GamePhase::NotStarted => draw_overlay_text(fb, frame, "PRESS R"),
            GamePhase::CountdownToStart | GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        let locked = CellStyle::new(Rgb::new(240, 230, 200), BOARD_BG).bold();
        let flash = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(240, 200, 60)).bold();

        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                let (ch, style) = match snap.cell(x as usize, y as usize) {
                    Some(letter) => (letter.as_char(), locked),
                    None if snap.cleared.contains(x as i8, y as i8) => ('*', flash),
                    None => ('·', empty),
                };
                self.draw_cell(fb, frame, x as i8, y as i8, ch, style);
            }
        }

        let Some(active) = snap.active else {
            return;
        };
        // No ghost while paused.
        let ghost = snap.ghost_y.filter(|&gy| snap.playable() && gy != active.y);
        if let Some(ghost_y) = ghost {
            let ghost = CellStyle::new(Rgb::new(140, 140, 150), BOARD_BG).dim();
            let ch = active.letter.to_lowercase();
            self.draw_cell(fb, frame, active.x, ghost_y, ch, ghost);
        }
        let tile = CellStyle::new(Rgb::new(20, 20, 30), Rgb::new(120, 200, 240)).bold();
        self.draw_cell(fb, frame, active.x, active.y, active.letter.as_char(), tile);
    }

    fn draw_countdown(&self, fb: &mut FrameBuffer, frame: Frame, mask: CellMask) {
        let lit = CellStyle::new(Rgb::new(240, 200, 60), BOARD_BG).bold();
        for (x, y) in mask.iter() {
            let px = frame.x + 1 + (x as u16) * self.cell_w;
            fb.fill_rect(px, frame.y + 1 + y as u16, self.cell_w, 1, '█', lit);
        }
    }

    /// Paint one board cell with `ch` centred in its columns
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        fb.put_char(px + self.cell_w / 2, py, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "COMBO", label);
        y += 1;
        if snap.combo > 0 {
            let x = fb.put_str(panel_x, y, "x", value);
            fb.put_u32(x, y, snap.combo, value);
        } else {
            fb.put_str(panel_x, y, "-", dim);
        }
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let mut x = panel_x;
        for (i, letter) in snap.upcoming.iter().enumerate() {
            let style = if i == 0 { value.bold() } else { dim };
            fb.put_char(x, y, letter.as_char(), style);
            x += 2;
        }
        y += 2;

        fb.put_str(panel_x, y, "WORDS", label);
        y += 1;
        for word in snap.found_words.iter().take(PANEL_WORDS) {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, word, value);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let y = frame.y.saturating_add(frame.h / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}
