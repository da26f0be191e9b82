// SPDX-License-Identifier: MIT
//
// Cell — one character position on screen.
//
// A cell holds a char, resolved foreground and background colors, and a
// small set of SGR attributes. The grid is a flat vector of these; the diff
// renderer compares them with `==`.
//
// A wide char (CJK, most emoji) spans two columns. Its first cell holds the
// char, the second is a continuation cell (`ch == '\0'`) that produces no
// output of its own.

use bitflags::bitflags;

// ─── Colors ──────────────────────────────────────────────────────────────────

/// A fully resolved terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CellColor {
    /// The terminal's own default (SGR 39 / 49).
    #[default]
    Default,
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
}

// ─── Attributes ──────────────────────────────────────────────────────────────

bitflags! {
    /// SGR text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1.
        const BOLD      = 1 << 0;
        /// SGR 4.
        const UNDERLINE = 1 << 1;
        /// SGR 7 — swap foreground and background.
        const INVERSE   = 1 << 2;
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

const CONTINUATION: char = '\0';

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The char shown, or `'\0'` for the second column of a wide char.
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Cell {
    /// A blank: space, default colors, no attributes.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    /// A cell showing `ch` with default styling.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self { ch, ..Self::EMPTY }
    }

    /// The placeholder right of a wide char. Carries the owner's colors so
    /// the background fill stays continuous.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
            attrs,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    /// Whether this is the second column of a wide char.
    #[inline]
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_a_plain_space() {
        let c = Cell::EMPTY;
        assert_eq!(c.ch, ' ');
        assert_eq!(c.fg, CellColor::Default);
        assert_eq!(c.bg, CellColor::Default);
        assert!(c.attrs.is_empty());
        assert_eq!(Cell::default(), c);
    }

    #[test]
    fn with_attrs_replaces_only_attrs() {
        let c = Cell::new('x').with_attrs(Attr::UNDERLINE).with_attrs(Attr::INVERSE);
        assert_eq!(
            c,
            Cell {
                ch: 'x',
                fg: CellColor::Default,
                bg: CellColor::Default,
                attrs: Attr::INVERSE,
            }
        );
    }

    #[test]
    fn continuation_marker() {
        let c = Cell::continuation(CellColor::Default, CellColor::Rgb(9, 9, 9), Attr::BOLD);
        assert!(c.is_continuation());
        assert_eq!(c.bg, CellColor::Rgb(9, 9, 9));
        assert!(!Cell::new('a').is_continuation());
        assert!(!Cell::EMPTY.is_continuation());
    }

    #[test]
    fn attrs_combine() {
        let a = Attr::BOLD | Attr::UNDERLINE;
        assert!(a.contains(Attr::BOLD));
        assert!(!a.contains(Attr::INVERSE));
    }

    #[test]
    fn equality_covers_every_field() {
        let base = Cell::new('a');
        assert_ne!(base, base.with_attrs(Attr::BOLD));
        assert_ne!(
            base,
            Cell {
                bg: CellColor::Rgb(0, 0, 0),
                ..base
            }
        );
        assert_ne!(base, Cell::new('b'));
    }
}
