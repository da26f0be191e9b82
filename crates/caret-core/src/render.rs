//! Frame layout — draws an editor session onto an abstract surface.
//!
//! The core doesn't know what it is drawing on. A [`Surface`] takes glyphs
//! and a caret at (line, col) cells; the terminal binary implements it over
//! a cell grid, tests implement it with a recorder.
//!
//! A frame is: clear, every char of the text at its cell (the line-ending
//! char moves to the next line and is not drawn), then the caret. A filled
//! caret covers the char under it, so that char is drawn again with
//! [`Paint::UnderCaret`].

use std::time::Instant;

use crate::editor::Editor;

/// How a glyph is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Normal text.
    Text,
    /// Text sitting on a filled caret, drawn in inverted colors.
    UnderCaret,
}

/// Caret appearance for the current blink phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretStyle {
    /// Solid block.
    Filled,
    /// Hollow block.
    Outline,
}

/// The drawing collaborator.
pub trait Surface {
    /// Wipe the surface.
    fn clear(&mut self);

    /// Draw `ch` at (line, col).
    fn glyph(&mut self, line: usize, col: usize, ch: char, paint: Paint);

    /// Draw the caret at (line, col).
    fn caret(&mut self, line: usize, col: usize, style: CaretStyle);
}

/// Which caret style shows `elapsed_ms` into the session.
///
/// The first half of each period (inclusive) is filled, the rest is an
/// outline. A period of 0 never blinks.
#[must_use]
pub const fn blink_phase(elapsed_ms: u64, period_ms: u64) -> CaretStyle {
    if period_ms == 0 {
        return CaretStyle::Filled;
    }
    if elapsed_ms % period_ms > period_ms / 2 {
        CaretStyle::Outline
    } else {
        CaretStyle::Filled
    }
}

/// Draw one frame of `editor` onto `surface`.
pub fn render_frame<S: Surface + ?Sized>(
    editor: &Editor,
    surface: &mut S,
    elapsed_ms: u64,
    period_ms: u64,
) {
    surface.clear();

    let line_ending = editor.buffer().line_ending();
    let (mut line, mut col) = (0, 0);
    for ch in editor.buffer().chars() {
        if ch == line_ending {
            line += 1;
            col = 0;
        } else {
            surface.glyph(line, col, ch, Paint::Text);
            col += 1;
        }
    }

    let pos = editor.cursor_position();
    let style = blink_phase(elapsed_ms, period_ms);
    surface.caret(pos.line, pos.col, style);

    if style == CaretStyle::Filled {
        if let Some(ch) = editor.current_char().filter(|&ch| ch != line_ending) {
            surface.glyph(pos.line, pos.col, ch, Paint::UnderCaret);
        }
    }
}

/// Session clock for the blink animation.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock started.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
