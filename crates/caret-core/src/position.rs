//! Line/column positions.
//!
//! A [`Position`] is the (line, column) view of a flat char offset. Both
//! coordinates are **0-indexed** and columns count chars, the unit the
//! buffer uses for offsets, so `line_starts[line] + col == offset`.
//! `Display` is the one place that shows them 1-indexed, for the status line.

use std::cmp::Ordering;
use std::fmt;

/// Where the cursor is, as (line, char column).
///
/// Sorts by line, then column: `(0, 5)` comes before `(1, 0)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.col).cmp(&(other.line, other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

/// 1-indexed `line:col`, as a user reads it.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_origin() {
        assert_eq!(Position::default(), Position::new(0, 0));
    }

    #[test]
    fn ordering_is_line_major() {
        let positions = [
            Position::default(),
            Position::new(0, 1),
            Position::new(0, 100),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(10, 0),
        ];
        for pair in positions.windows(2) {
            assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Position::new(2, 5)), "Pos(2:5)");
    }

    #[test]
    fn display_is_1_indexed() {
        assert_eq!(format!("{}", Position::default()), "1:1");
        assert_eq!(format!("{}", Position::new(9, 14)), "10:15");
    }
}
