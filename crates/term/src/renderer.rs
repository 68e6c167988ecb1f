//! Terminal output: turns framebuffers into crossterm command streams.
//!
//! [`TerminalSession`] owns raw mode and the alternate screen for the life of
//! a game. [`TerminalRenderer`] remembers the frame on screen and rewrites
//! only the patches that differ from it.
//!
//! Board cells are three columns wide with the letter in the middle, so a
//! letter change shows up as changed cells split by one or two untouched
//! blanks. A patch bridges gaps up to [`MAX_BRIDGE`] cells instead of paying
//! for another cursor move.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Unchanged cells a single patch may span
pub const MAX_BRIDGE: u16 = 2;

/// Raw mode plus the alternate screen, restored on drop
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        out.queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        out.flush()?;
        Ok(Self { active: true })
    }

    /// Restore the terminal, reporting failures that `Drop` would swallow
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        leave_session()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = leave_session();
        }
    }
}

fn leave_session() -> Result<()> {
    let mut out = io::stdout();
    out.queue(ResetColor)?
        .queue(SetAttribute(Attribute::Reset))?
        .queue(terminal::EnableLineWrap)?
        .queue(cursor::Show)?
        .queue(terminal::LeaveAlternateScreen)?;
    out.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// A horizontal span of cells to rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

impl Patch {
    fn end(&self) -> u16 {
        self.x + self.len
    }
}

/// What one draw put on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// The whole screen was cleared and repainted
    pub full: bool,
    pub patches: usize,
    pub cells: usize,
    pub bytes: usize,
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Frame currently on screen; `None` forces a full redraw
    shown: Option<FrameBuffer>,
    patches: Vec<Patch>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            patches: Vec::new(),
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Repaint everything on the next draw (after a resize, for one)
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then hand back the previous frame's buffer in its place so
    /// the caller can render the next frame without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<DrawStats> {
        self.buf.clear();
        let mut stats = DrawStats::default();

        let diffable = match &self.shown {
            Some(shown) => diff_patches_into(shown, fb, &mut self.patches),
            None => false,
        };
        if diffable {
            encode_patches_into(fb, &self.patches, &mut self.buf)?;
            stats.patches = self.patches.len();
            stats.cells = self.patches.iter().map(|p| p.len as usize).sum();
        } else {
            encode_full_into(fb, &mut self.buf)?;
            stats.full = true;
            stats.cells = fb.width() as usize * fb.height() as usize;
        }

        stats.bytes = self.buf.len();
        if !self.buf.is_empty() {
            self.out.write_all(&self.buf)?;
            self.out.flush()?;
        }

        match self.shown.as_mut() {
            Some(shown) => std::mem::swap(shown, fb),
            None => {
                let (w, h) = (fb.width(), fb.height());
                self.shown = Some(std::mem::replace(fb, FrameBuffer::new(w, h)));
            }
        }
        Ok(stats)
    }
}

/// Collect the patches that turn `prev` into `next`.
///
/// Returns false (leaving `out` empty) when the sizes differ and only a full
/// redraw will do.
pub fn diff_patches_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<Patch>) -> bool {
    out.clear();
    if prev.width() != next.width() || prev.height() != next.height() {
        return false;
    }

    for y in 0..next.height() {
        let mut open: Option<Patch> = None;
        for x in 0..next.width() {
            if prev.get(x, y) == next.get(x, y) {
                continue;
            }
            match open {
                Some(p) if x - p.end() <= MAX_BRIDGE => {
                    open = Some(Patch {
                        len: x + 1 - p.x,
                        ..p
                    })
                }
                _ => out.extend(open.replace(Patch { x, y, len: 1 })),
            }
        }
        out.extend(open);
    }
    true
}

/// Clear the screen and paint every row of `fb`
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        pen.write_span(
            out,
            fb,
            Patch {
                x: 0,
                y,
                len: fb.width(),
            },
        )?;
    }
    pen.finish(out)
}

/// Paint only `patches` of `fb`. Writes nothing when there are none.
pub fn encode_patches_into(fb: &FrameBuffer, patches: &[Patch], out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for &patch in patches {
        pen.write_span(out, fb, patch)?;
    }
    pen.finish(out)
}

/// Tracks the terminal's current style so only changes are emitted
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn write_span(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, patch: Patch) -> Result<()> {
        out.queue(cursor::MoveTo(patch.x, patch.y))?;
        for x in patch.x..patch.end() {
            let cell = fb.get(x, patch.y).unwrap_or_default();
            self.set_style(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let from = match self.style {
            Some(cur) if cur == style => return Ok(()),
            // Bold and dim can only be switched off by a reset.
            Some(cur) if !(cur.bold && !style.bold) && !(cur.dim && !style.dim) => Some(cur),
            _ => None,
        };

        if from.is_none() {
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        if from.map(|c| c.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if from.map(|c| c.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        if style.bold && !from.is_some_and(|c| c.bold) {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim && !from.is_some_and(|c| c.dim) {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patches(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Patch> {
        let mut out = Vec::new();
        assert!(diff_patches_into(prev, next, &mut out));
        out
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn patches_bridge_short_gaps() {
        let style = CellStyle::default();
        let prev = FrameBuffer::new(12, 2);
        let mut next = prev.clone();

        // Two letters one board cell apart: gap of 2 is bridged.
        next.put_char(1, 0, 'A', style);
        next.put_char(4, 0, 'B', style);
        // Gap of 3 starts a new patch.
        next.put_char(1, 1, 'C', style);
        next.put_char(5, 1, 'D', style);

        assert_eq!(
            patches(&prev, &next),
            vec![
                Patch { x: 1, y: 0, len: 4 },
                Patch { x: 1, y: 1, len: 1 },
                Patch { x: 5, y: 1, len: 1 },
            ]
        );
    }

    #[test]
    fn resize_needs_full_redraw() {
        let mut out = vec![Patch { x: 0, y: 0, len: 1 }];
        assert!(!diff_patches_into(
            &FrameBuffer::new(2, 2),
            &FrameBuffer::new(3, 3),
            &mut out
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(20, 5);
        fb.put_str(2, 2, "WORD", CellStyle::default());

        let first = term.draw_swap(&mut fb).unwrap();
        assert!(first.full);
        assert_eq!(first.cells, 100);
        let written = term.writer().len();
        assert_eq!(first.bytes, written);

        // `fb` now holds a blank buffer; repaint the same frame into it.
        fb.put_str(2, 2, "WORD", CellStyle::default());
        let second = term.draw_swap(&mut fb).unwrap();
        assert!(!second.full);
        assert_eq!(second.patches, 0);
        assert_eq!(second.bytes, 0);
        assert_eq!(term.writer().len(), written);
    }

    #[test]
    fn changed_letter_is_one_patch() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(20, 5);
        term.draw_swap(&mut fb).unwrap();

        fb.put_char(7, 3, 'Q', CellStyle::default().bold());
        let stats = term.draw_swap(&mut fb).unwrap();
        assert_eq!(stats.patches, 1);
        assert_eq!(stats.cells, 1);
        assert!(stats.bytes > 0);

        term.invalidate();
        let mut fb = FrameBuffer::new(20, 5);
        assert!(term.draw_swap(&mut fb).unwrap().full);
    }

    #[test]
    fn pen_resets_only_to_drop_attributes() {
        let plain = CellStyle::default();
        let bold = plain.bold();
        let reset = b"\x1b[0m";

        let mut adding = FrameBuffer::new(2, 1);
        adding.put_char(0, 0, 'A', plain);
        adding.put_char(1, 0, 'B', bold);
        let mut dropping = FrameBuffer::new(2, 1);
        dropping.put_char(0, 0, 'A', bold);
        dropping.put_char(1, 0, 'B', plain);

        let span = [Patch { x: 0, y: 0, len: 2 }];
        let mut add_out = Vec::new();
        let mut drop_out = Vec::new();
        encode_patches_into(&adding, &span, &mut add_out).unwrap();
        encode_patches_into(&dropping, &span, &mut drop_out).unwrap();

        assert_eq!(count(&drop_out, reset), count(&add_out, reset) + 1);
    }

    #[test]
    fn no_patches_encode_to_nothing() {
        let mut out = Vec::new();
        encode_patches_into(&FrameBuffer::new(4, 4), &[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
