//! Cursor — a char offset with a memorized column for vertical movement.
//!
//! The `Cursor` is a lightweight value: an offset into the buffer and an
//! optional memorized column. It does not own or reference the buffer; every
//! operation that needs the text or the line index takes `&TextBuffer`.
//!
//! # Boundaries
//!
//! Every move is a silent no-op at the edges of the document. Moves return
//! `true` when the offset changed so callers can tell, but nothing is raised.
//!
//! - `prev` stops at 0.
//! - `next` only advances while `offset + 1 < len`.
//! - `up` / `down` do nothing on the first / last line.
//!
//! # Memorized column
//!
//! The first vertical move of a streak records the current column. Later
//! vertical moves aim for that column rather than the one they happened to
//! land on, so passing through a short line doesn't drag the cursor left.
//! Horizontal moves and `move_to` forget it.

use crate::buffer::TextBuffer;
use crate::position::Position;

/// A cursor in a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Char offset into the buffer. Not clamped: `move_to` may leave it past
    /// the end of the text.
    offset: usize,

    /// Column a run of vertical moves is aiming for.
    memorized_col: Option<usize>,
}

impl Cursor {
    /// Create a cursor at offset 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0,
            memorized_col: None,
        }
    }

    /// Create a cursor at a specific offset.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            offset,
            memorized_col: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Current char offset.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The memorized column, if a vertical-move streak is in progress.
    #[inline]
    #[must_use]
    pub const fn memorized_col(&self) -> Option<usize> {
        self.memorized_col
    }

    /// The (line, col) of the cursor.
    ///
    /// `line` is the last line whose start is `<= offset`, and
    /// `line_starts[line] + col == offset`. Works for any offset, including
    /// one past the end of the text.
    #[must_use]
    pub fn position(&self, buf: &TextBuffer) -> Position {
        position_of(buf.line_starts(), self.offset)
    }

    /// The char under the cursor, or `None` if the offset is at or past the
    /// end of the text.
    #[must_use]
    pub fn current_char(&self, buf: &TextBuffer) -> Option<char> {
        buf.char_at(self.offset)
    }

    // -- Horizontal movement ------------------------------------------------

    /// Jump to `offset`. No bounds check.
    pub const fn move_to(&mut self, offset: usize) {
        self.offset = offset;
        self.memorized_col = None;
    }

    /// Move one char right. No-op unless `offset + 1 < len_chars()`.
    pub fn next(&mut self, buf: &TextBuffer) -> bool {
        let len = buf.len_chars();
        let Some(next) = self.offset.checked_add(1).filter(|&n| n < len) else {
            return false;
        };
        self.offset = next;
        self.memorized_col = None;
        true
    }

    /// Move one char left. No-op at offset 0.
    pub const fn prev(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset -= 1;
        self.memorized_col = None;
        true
    }

    // -- Vertical movement --------------------------------------------------

    /// Move to the previous line, aiming for the memorized column.
    pub fn up(&mut self, buf: &TextBuffer) -> bool {
        let line = self.begin_vertical(buf);
        if line == 0 {
            return false;
        }
        self.land_on(buf, line - 1)
    }

    /// Move to the next line, aiming for the memorized column.
    pub fn down(&mut self, buf: &TextBuffer) -> bool {
        let line = self.begin_vertical(buf);
        if line + 1 >= buf.line_count() {
            return false;
        }
        self.land_on(buf, line + 1)
    }

    /// Record the memorized column if this is the first move of a streak and
    /// return the current line.
    fn begin_vertical(&mut self, buf: &TextBuffer) -> usize {
        let pos = self.position(buf);
        self.memorized_col.get_or_insert(pos.col);
        pos.line
    }

    /// Place the cursor on `target` at the memorized column, or at the last
    /// column the line allows. The memorized column is kept.
    fn land_on(&mut self, buf: &TextBuffer, target: usize) -> bool {
        let Some(start) = buf.line_start(target) else {
            return false;
        };
        // The last line ends one short of the text, like `next`.
        let end = buf
            .line_start(target + 1)
            .unwrap_or_else(|| buf.len_chars().saturating_sub(1));

        // A one-char last line has no room at all; stay on its start.
        let max_col = end.saturating_sub(start + 1);
        let col = self.memorized_col.map_or(max_col, |mem| mem.min(max_col));

        let before = self.offset;
        self.offset = start + col;
        self.offset != before
    }
}

/// Binary search for the line holding `offset`.
fn position_of(line_starts: &[usize], offset: usize) -> Position {
    // line_starts[0] == 0, so at least one start is <= offset.
    let line = line_starts
        .partition_point(|&start| start <= offset)
        .saturating_sub(1);
    Position::new(line, offset - line_starts[line])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
