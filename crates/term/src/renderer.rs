//! Terminal output for rendered frames
//!
//! The first frame after [`TerminalRenderer::enter`] (or after
//! [`TerminalRenderer::invalidate`]) repaints the whole screen. Later frames
//! rewrite only the horizontal runs of cells that differ from the last frame,
//! which keeps the burst animation cheap on slow terminals.

use std::io::{self, Write};
use std::mem;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Current terminal size as a viewport
pub fn terminal_viewport() -> Result<Viewport> {
    let (width, height) = terminal::size()?;
    Ok(Viewport::new(width, height))
}

/// Owns the raw-mode alternate screen and the last frame drawn to it
pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.write_out()?;
        self.shown = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize)
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then hand the previous frame back through `fb`
    ///
    /// The caller keeps a single buffer and re-renders into it every frame;
    /// no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut previous = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.out)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.out)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.write_out()?;

        mem::swap(&mut previous, fb);
        self.shown = Some(previous);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues glyphs, emitting style changes only when the style differs
struct StyledWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> StyledWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            self.out
                .queue(SetAttribute(Attribute::Reset))?
                .queue(SetForegroundColor(to_color(cell.style.fg)))?
                .queue(SetBackgroundColor(to_color(cell.style.bg)))?;
            if cell.style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if cell.style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Queue a complete repaint of `fb` into `out`
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut w = StyledWriter::new(out);
    for y in 0..fb.height() {
        w.move_to(0, y)?;
        for x in 0..fb.width() {
            w.cell(fb.get(x, y).unwrap_or_default())?;
        }
    }
    w.finish()
}

/// Queue only the cells of `next` that differ from `prev`
///
/// Both buffers must have the same size; a size change needs a full repaint.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut w = StyledWriter::new(out);
    for y in 0..next.height() {
        for (start, len) in changed_runs(prev, next, y) {
            w.move_to(start, y)?;
            for x in start..start + len {
                w.cell(next.get(x, y).unwrap_or_default())?;
            }
        }
    }
    w.finish()
}

/// `(start, len)` of every maximal run of differing cells on row `y`
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let width = next.width();
    let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < width && !differs(x) {
            x += 1;
        }
        if x >= width {
            return None;
        }
        let start = x;
        while x < width && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
