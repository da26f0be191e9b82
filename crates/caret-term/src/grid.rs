// SPDX-License-Identifier: MIT
//
// FrameBuffer — the cell grid a frame is painted into.
//
// Row-major `Vec<Cell>`, so a row is a contiguous slice and the diff
// renderer can compare whole rows at once. All writes are bounds-checked:
// anything painted outside the grid is dropped, which is how long lines and
// documents taller than the window get clipped.
//
// Display width comes from `unicode-width`. A wide char writes its owner
// cell plus a continuation cell; if only one column is left it is replaced
// by a space. Overwriting either half of a wide char blanks the other half.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Attr, Cell, CellColor};

/// A width × height grid of cells.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// A grid of blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// The cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Row `y` as a slice, or `None` below the grid.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        (y < self.height).then(|| {
            let start = self.index(0, y);
            &self.cells[start..start + usize::from(self.width)]
        })
    }

    // ─── Clear, Resize, Copy ─────────────────────────────────────────────

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Change dimensions. Content is discarded.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(usize::from(width) * usize::from(height), Cell::EMPTY);
    }

    /// Copy another grid of the same size into this one without
    /// reallocating. Falls back to a clone when the sizes differ.
    pub fn copy_from(&mut self, other: &Self) {
        if self.width == other.width && self.height == other.height {
            self.cells.copy_from_slice(&other.cells);
        } else {
            self.clone_from(other);
        }
    }

    // ─── Writes ──────────────────────────────────────────────────────────

    /// Store `cell` at `(x, y)` as is. Returns `false` outside the grid.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Add attributes to an existing cell, keeping its char and colors.
    /// A continuation cell passes them to its owner as well.
    pub fn add_attrs(&mut self, x: u16, y: u16, attrs: Attr) -> bool {
        let Some(cell) = self.get_mut(x, y) else {
            return false;
        };
        cell.attrs |= attrs;
        let continuation = cell.is_continuation();
        if continuation && x > 0 {
            let owner = self.index(x - 1, y);
            self.cells[owner].attrs |= attrs;
        }
        true
    }

    /// Paint `ch` at `(x, y)` and return how many columns it took.
    ///
    /// Returns 0 when the char has no width (controls, combining marks) or
    /// falls outside the grid. A wide char with only one column left is
    /// drawn as a space and counts as 1.
    pub fn put_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
    ) -> u16 {
        let w = char_width(ch);
        if w == 0 || !self.in_bounds(x, y) {
            return 0;
        }

        self.break_wide_char_at(x, y);
        let idx = self.index(x, y);

        if w == 1 || x + 1 >= self.width {
            let shown = if w == 1 { ch } else { ' ' };
            self.cells[idx] = Cell { ch: shown, fg, bg, attrs };
            return 1;
        }

        self.break_wide_char_at(x + 1, y);
        self.cells[idx] = Cell { ch, fg, bg, attrs };
        self.cells[idx + 1] = Cell::continuation(fg, bg, attrs);
        2
    }

    /// Paint a string left to right from `(x, y)`, stopping at the right
    /// edge. Returns the columns consumed.
    pub fn put_str(
        &mut self,
        x: u16,
        y: u16,
        s: &str,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
    ) -> u16 {
        let mut col = x;
        for ch in s.chars() {
            if col >= self.width {
                break;
            }
            col += self.put_char(col, y, ch, fg, bg, attrs);
        }
        col - x
    }

    /// Blank the other half of any wide char that `(x, y)` belongs to.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);
        if self.cells[idx].is_continuation() && x > 0 {
            self.cells[idx - 1].ch = ' ';
        }
        if x + 1 < self.width && self.cells[idx + 1].is_continuation() {
            self.cells[idx + 1] = Cell::EMPTY;
        }
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

/// Columns `ch` occupies in a terminal: 0, 1 or 2.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> u16 {
    match ch.width() {
        Some(2) => 2,
        Some(1) => 1,
        _ => 0,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const D: CellColor = CellColor::Default;

    fn row_text(buf: &FrameBuffer, y: u16) -> String {
        buf.row(y)
            .unwrap()
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    // ─── Construction ────────────────────────────────────────────────────

    #[test]
    fn new_is_blank() {
        let buf = FrameBuffer::new(4, 3);
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.cells.len(), 12);
        assert!(buf.cells.iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn zero_sized_grid() {
        let buf = FrameBuffer::new(0, 0);
        assert!(buf.cells.is_empty());
        assert!(buf.get(0, 0).is_none());
        assert!(buf.row(0).is_none());
    }

    // ─── Access ──────────────────────────────────────────────────────────

    #[test]
    fn get_and_set_respect_bounds() {
        let mut buf = FrameBuffer::new(3, 2);
        assert!(buf.set(2, 1, Cell::new('z')));
        assert_eq!(buf.get(2, 1).unwrap().ch, 'z');
        assert!(!buf.set(3, 0, Cell::new('x')));
        assert!(!buf.set(0, 2, Cell::new('x')));
        assert!(buf.get(3, 1).is_none());
    }

    #[test]
    fn rows_are_contiguous() {
        let mut buf = FrameBuffer::new(3, 2);
        buf.put_str(0, 1, "abc", D, D, Attr::empty());
        assert_eq!(row_text(&buf, 0), "   ");
        assert_eq!(row_text(&buf, 1), "abc");
    }

    // ─── Clear / Resize / Copy ───────────────────────────────────────────

    #[test]
    fn clear_blanks_everything() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.put_str(0, 0, "abc", D, D, Attr::BOLD);
        buf.clear();
        assert!(buf.cells.iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn resize_discards_content() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.put_str(0, 0, "abc", D, D, Attr::empty());
        buf.resize(5, 2);
        assert_eq!(buf.cells.len(), 10);
        assert!(buf.cells.iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn copy_from_same_and_different_size() {
        let mut src = FrameBuffer::new(2, 1);
        src.put_str(0, 0, "hi", D, D, Attr::empty());

        let mut same = FrameBuffer::new(2, 1);
        same.copy_from(&src);
        assert_eq!(same, src);

        let mut other = FrameBuffer::new(7, 7);
        other.copy_from(&src);
        assert_eq!(other, src);
    }

    // ─── Painting ────────────────────────────────────────────────────────

    #[test]
    fn put_char_narrow() {
        let mut buf = FrameBuffer::new(3, 1);
        let red = CellColor::Rgb(255, 0, 0);
        assert_eq!(buf.put_char(1, 0, 'a', red, D, Attr::BOLD), 1);
        assert_eq!(
            *buf.get(1, 0).unwrap(),
            Cell {
                fg: red,
                attrs: Attr::BOLD,
                ..Cell::new('a')
            }
        );
    }

    #[test]
    fn put_char_wide_takes_two_columns() {
        let mut buf = FrameBuffer::new(4, 1);
        assert_eq!(buf.put_char(0, 0, '中', D, D, Attr::empty()), 2);
        assert_eq!(buf.get(0, 0).unwrap().ch, '中');
        assert!(buf.get(1, 0).unwrap().is_continuation());
    }

    #[test]
    fn wide_char_at_right_edge_becomes_space() {
        let mut buf = FrameBuffer::new(3, 1);
        assert_eq!(buf.put_char(2, 0, '中', D, D, Attr::empty()), 1);
        assert_eq!(buf.get(2, 0).unwrap().ch, ' ');
    }

    #[test]
    fn zero_width_and_out_of_bounds_take_nothing() {
        let mut buf = FrameBuffer::new(3, 1);
        assert_eq!(buf.put_char(0, 0, '\u{0301}', D, D, Attr::empty()), 0);
        assert_eq!(buf.put_char(0, 0, '\t', D, D, Attr::empty()), 0);
        assert_eq!(buf.put_char(5, 0, 'a', D, D, Attr::empty()), 0);
        assert_eq!(buf.put_char(0, 1, 'a', D, D, Attr::empty()), 0);
        assert!(buf.cells.iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn overwriting_half_a_wide_char_blanks_the_other_half() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.put_char(0, 0, '中', D, D, Attr::empty());
        buf.put_char(1, 0, 'x', D, D, Attr::empty());
        assert_eq!(row_text(&buf, 0), " x  ");

        buf.put_char(2, 0, '文', D, D, Attr::empty());
        buf.put_char(2, 0, 'y', D, D, Attr::empty());
        assert_eq!(row_text(&buf, 0), " xy ");
    }

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut buf = FrameBuffer::new(4, 1);
        assert_eq!(buf.put_str(1, 0, "hello", D, D, Attr::empty()), 3);
        assert_eq!(row_text(&buf, 0), " hel");
    }

    #[test]
    fn add_attrs_keeps_content() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.put_char(0, 0, 'a', D, D, Attr::BOLD);
        assert!(buf.add_attrs(0, 0, Attr::INVERSE));
        let cell = buf.get(0, 0).unwrap();
        assert_eq!(cell.ch, 'a');
        assert_eq!(cell.attrs, Attr::BOLD | Attr::INVERSE);
        assert!(!buf.add_attrs(9, 0, Attr::INVERSE));
    }

    #[test]
    fn add_attrs_on_continuation_reaches_owner() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.put_char(0, 0, '中', D, D, Attr::empty());
        buf.add_attrs(1, 0, Attr::UNDERLINE);
        assert!(buf.get(0, 0).unwrap().attrs.contains(Attr::UNDERLINE));
    }

    #[test]
    fn widths() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('中'), 2);
        assert_eq!(char_width('\n'), 0);
    }
}
