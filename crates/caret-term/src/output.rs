// SPDX-License-Identifier: MIT
//
// Frame output: a byte buffer and a writer that remembers terminal state.
//
// `OutputBuffer` collects a whole frame so it reaches the terminal in one
// write. `SgrWriter` tracks where the terminal cursor is and which colors
// and attributes are active, and emits a cursor move or SGR sequence only
// when the next cell actually needs one.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::{Attr, Cell, CellColor};

// ─── OutputBuffer ────────────────────────────────────────────────────────────

const DEFAULT_CAPACITY: usize = 16 * 1024;

/// In-memory sink for one frame of ANSI output.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append `ch` as UTF-8.
    pub fn push_char(&mut self, ch: char) {
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Drop the contents, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write everything to `w`, flush it, and empty the buffer.
    ///
    /// # Errors
    ///
    /// Propagates the writer's error; the buffer is kept in that case.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    // Real flushing goes through flush_to.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── SgrWriter ───────────────────────────────────────────────────────────────

/// Emits cells with the fewest escape sequences it can.
///
/// - No cursor move when the cell is directly right of the previous one.
/// - Attribute change: SGR 0 (if anything was set) then the new set. SGR 0
///   also forgets the tracked colors.
/// - Colors are re-sent only when they differ from the tracked ones.
/// - A continuation cell right after its owner emits nothing.
#[allow(clippy::struct_field_names)]
pub struct SgrWriter {
    last_x: Option<u16>,
    last_y: Option<u16>,
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
    last_attrs: Attr,
}

impl SgrWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_x: None,
            last_y: None,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::empty(),
        }
    }

    /// Forget everything. Use after the terminal was reset or cleared.
    #[allow(clippy::missing_const_for_fn)]
    pub fn reset_state(&mut self) {
        *self = Self::new();
    }

    /// Emit `cell` at `(x, y)`.
    pub fn write_cell(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        let follows = self.last_y == Some(y)
            && self.last_x.is_some_and(|lx| u32::from(lx) + 1 == u32::from(x));

        if cell.is_continuation() {
            if follows {
                self.last_x = Some(x);
                return;
            }
            // Owner wasn't drawn this frame: fill the column with a space.
            ansi::cursor_to(out, x, y).ok();
            self.apply_style(out, cell);
            out.push_char(' ');
        } else {
            if !follows {
                ansi::cursor_to(out, x, y).ok();
            }
            self.apply_style(out, cell);
            out.push_char(cell.ch);
        }

        self.last_x = Some(x);
        self.last_y = Some(y);
    }

    fn apply_style(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if cell.attrs != self.last_attrs {
            if !self.last_attrs.is_empty() {
                ansi::reset(out).ok();
                self.last_fg = None;
                self.last_bg = None;
            }
            ansi::attrs(out, cell.attrs).ok();
            self.last_attrs = cell.attrs;
        }
        if self.last_fg != Some(cell.fg) {
            ansi::fg(out, cell.fg).ok();
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            ansi::bg(out, cell.bg).ok();
            self.last_bg = Some(cell.bg);
        }
    }
}

impl Default for SgrWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
