// SPDX-License-Identifier: MIT
//
// Drawing the editor onto the terminal grid.
//
// The core lays text out in (line, char column) cells. The grid works in
// display columns, where a wide char takes two. `GridSurface` converts as
// glyphs arrive: text glyphs of a line come left to right, so it records
// where each char column starts on screen and reuses that for the caret
// and the char under it.
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text                         │  ← height - 1 rows, scrolled vertically
//   ├──────────────────────────────┤
//   │ status line (INVERSE)        │  ← 1 row
//   └──────────────────────────────┘

use caret_core::Position;
use caret_core::render::{CaretStyle, Paint, Surface};
use caret_term::cell::{Attr, Cell, CellColor};
use caret_term::grid::FrameBuffer;

/// Per-row record of where each char column starts.
#[derive(Debug, Clone, Default)]
struct RowLayout {
    starts: Vec<u16>,
    next: u16,
}

impl RowLayout {
    /// Screen x of char column `col`. Columns past the drawn text continue
    /// one cell at a time from the end.
    fn x_of(&self, col: usize) -> Option<u16> {
        match self.starts.get(col) {
            Some(&x) => Some(x),
            None => {
                let extra = u16::try_from(col - self.starts.len()).ok()?;
                self.next.checked_add(extra)
            }
        }
    }
}

/// [`Surface`] over a region of rows of a [`FrameBuffer`], showing the text
/// lines from `top` on.
pub struct GridSurface<'a> {
    frame: &'a mut FrameBuffer,
    top: usize,
    rows: Vec<RowLayout>,
}

impl<'a> GridSurface<'a> {
    pub fn new(frame: &'a mut FrameBuffer, top: usize, height: u16) -> Self {
        let height = height.min(frame.height());
        Self {
            frame,
            top,
            rows: vec![RowLayout::default(); usize::from(height)],
        }
    }

    /// Screen row of text line `line`, if it is visible.
    fn row_of(&self, line: usize) -> Option<usize> {
        line.checked_sub(self.top).filter(|&r| r < self.rows.len())
    }

    fn cell_of(&self, line: usize, col: usize) -> Option<(u16, u16)> {
        let row = self.row_of(line)?;
        let x = self.rows[row].x_of(col)?;
        let y = u16::try_from(row).ok()?;
        (x < self.frame.width()).then_some((x, y))
    }
}

impl Surface for GridSurface<'_> {
    fn clear(&mut self) {
        for (y, layout) in (0u16..).zip(self.rows.iter_mut()) {
            *layout = RowLayout::default();
            for x in 0..self.frame.width() {
                self.frame.set(x, y, Cell::EMPTY);
            }
        }
    }

    fn glyph(&mut self, line: usize, col: usize, ch: char, paint: Paint) {
        let Some(row) = self.row_of(line) else { return };
        let Ok(y) = u16::try_from(row) else { return };

        match paint {
            Paint::Text => {
                let layout = &mut self.rows[row];
                if col != layout.starts.len() {
                    return;
                }
                let x = layout.next;
                layout.starts.push(x);
                if x < self.frame.width() {
                    let used = self.frame.put_char(
                        x,
                        y,
                        ch,
                        CellColor::Default,
                        CellColor::Default,
                        Attr::empty(),
                    );
                    layout.next = x.saturating_add(used);
                }
            }
            Paint::UnderCaret => {
                if let Some((x, y)) = self.cell_of(line, col) {
                    self.frame.put_char(
                        x,
                        y,
                        ch,
                        CellColor::Default,
                        CellColor::Default,
                        Attr::INVERSE,
                    );
                }
            }
        }
    }

    fn caret(&mut self, line: usize, col: usize, style: CaretStyle) {
        let Some((x, y)) = self.cell_of(line, col) else { return };
        let attrs = match style {
            CaretStyle::Filled => Attr::INVERSE,
            CaretStyle::Outline => Attr::UNDERLINE,
        };
        self.frame.add_attrs(x, y, attrs);
    }
}

// -- Scrolling --

/// New top line so that `line` is inside a window of `rows` lines.
pub const fn scroll_to_show(top: usize, line: usize, rows: usize) -> usize {
    if rows == 0 || line < top {
        line
    } else if line >= top + rows {
        line + 1 - rows
    } else {
        top
    }
}

// -- Status line --

/// Paint the status line on row `y`: a label on the left, the char count
/// and 1-indexed cursor position on the right. When the row is too narrow
/// only the position is kept.
pub fn render_status_line(frame: &mut FrameBuffer, y: u16, pos: Position, chars: usize) {
    let width = frame.width();
    if width == 0 || y >= frame.height() {
        return;
    }

    let left = " caret";
    let mut right = format!(" {chars} chars  {pos} ");
    if right.chars().count() > usize::from(width) {
        right = format!(" {pos} ");
    }
    let right_len = u16::try_from(right.chars().count()).unwrap_or(u16::MAX);
    let right_start = width.saturating_sub(right_len);

    for x in 0..width {
        frame.set(x, y, Cell::EMPTY.with_attrs(Attr::INVERSE));
    }
    // The right side is drawn last so it wins where the two overlap.
    let d = CellColor::Default;
    frame.put_str(0, y, left, d, d, Attr::INVERSE);
    frame.put_str(right_start, y, &right, d, d, Attr::INVERSE);
}
