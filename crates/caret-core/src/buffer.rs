//! Text buffer — the document and its line-start index.
//!
//! A `TextBuffer` wraps a [`ropey::Rope`] with the char-offset editing
//! operations the editor needs, and keeps a derived index of where every line
//! begins.
//!
//! # Design choices
//!
//! - **ropey** provides O(log n) insert/delete at any char offset, so an edit
//!   splices instead of rebuilding the whole string. The observable text is
//!   the same as replacing everything on each keystroke.
//!
//! - **Offsets are char offsets**, never bytes. Offset `len_chars()` is the
//!   position just past the last char and is a valid insertion point.
//!
//! - **Line structure comes from one delimiter char**, not from the rope's
//!   own line model (which treats `\r`, `\r\n`, U+2028 and friends as breaks).
//!   The delimiter is configurable and defaults to `'\n'`.
//!
//! # Line-start index
//!
//! `line_starts[0] == 0`, and every delimiter at offset `p` contributes a
//! start at `p + 1`. If the text is non-empty and ends with the delimiter,
//! that final start (== `len_chars()`) is dropped: a trailing line ending
//! does not open an empty last line. The index is strictly increasing, never
//! empty, and rebuilt from the text after every mutation — it is never patched
//! by hand.

use ropey::Rope;
use ropey::iter::Chars;

use crate::error::EditError;

/// The line delimiter used when none is configured.
pub const DEFAULT_LINE_ENDING: char = '\n';

/// A text buffer backed by a rope, with a derived line-start index.
#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    line_ending: char,
    line_starts: Vec<usize>,
}

impl TextBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer that splits lines on `line_ending`.
    #[must_use]
    pub fn new(line_ending: char) -> Self {
        Self {
            rope: Rope::new(),
            line_ending,
            line_starts: vec![0],
        }
    }

    /// Create a buffer holding `text`, splitting lines on `line_ending`.
    #[must_use]
    pub fn from_text(text: &str, line_ending: char) -> Self {
        let mut buf = Self::new(line_ending);
        buf.set_text(text);
        buf
    }

    // -- Text access --------------------------------------------------------

    /// Collect the whole document into a `String`.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Iterate the document char by char.
    #[inline]
    pub fn chars(&self) -> Chars<'_> {
        self.rope.chars()
    }

    /// Total char count.
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the buffer contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The char at `offset`, or `None` if `offset >= len_chars()`.
    #[must_use]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    /// The delimiter that separates lines.
    #[inline]
    #[must_use]
    pub const fn line_ending(&self) -> char {
        self.line_ending
    }

    // -- Line index ---------------------------------------------------------

    /// Start offset of every line, in order. Never empty; the first entry is 0.
    #[inline]
    #[must_use]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Number of lines in the index. An empty buffer has one line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Start offset of `line`, or `None` past the last line.
    #[inline]
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Rebuild `line_starts` from the current text. Linear in the text length.
    fn reindex(&mut self) {
        self.line_starts.clear();
        self.line_starts.push(0);

        let delim = self.line_ending;
        self.line_starts.extend(
            self.rope
                .chars()
                .enumerate()
                .filter(|&(_, ch)| ch == delim)
                .map(|(i, _)| i + 1),
        );

        // A document ending in the delimiter doesn't get a dangling empty line.
        let len = self.rope.len_chars();
        if len > 0 && self.line_starts.last().is_some_and(|&start| start >= len) {
            self.line_starts.pop();
        }
    }

    // -- Editing ------------------------------------------------------------

    /// Replace the whole document with `text` and rebuild the line index.
    ///
    /// Never fails. A cursor holding an offset into the old text is not
    /// adjusted; its position is simply computed against the new lines.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.reindex();
    }

    /// Insert `ch` so that it ends up at `offset`.
    ///
    /// Any offset in `0..=len_chars()` succeeds and returns `Ok(true)`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OffsetOutOfRange`] if `offset > len_chars()`.
    pub fn insert(&mut self, offset: usize, ch: char) -> Result<bool, EditError> {
        let len = self.rope.len_chars();
        if offset > len {
            return Err(EditError::OffsetOutOfRange { offset, len });
        }
        self.rope.insert_char(offset, ch);
        self.reindex();
        Ok(true)
    }

    /// Delete the char immediately before `offset` (backspace).
    ///
    /// At `offset == 0` there is nothing before the cursor: returns
    /// `Ok(false)` and leaves the text alone.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OffsetOutOfRange`] if `offset > len_chars()`.
    pub fn remove_before(&mut self, offset: usize) -> Result<bool, EditError> {
        if offset == 0 {
            return Ok(false);
        }
        let len = self.rope.len_chars();
        if offset > len {
            return Err(EditError::OffsetOutOfRange { offset, len });
        }
        self.rope.remove(offset - 1..offset);
        self.reindex();
        Ok(true)
    }

    /// Delete the char at `offset` (forward delete).
    ///
    /// No-op when `offset + 1 >= len_chars()`, which includes the last char
    /// of the document: forward delete never removes it. Returns whether the
    /// text changed.
    pub fn remove_after(&mut self, offset: usize) -> bool {
        let len = self.rope.len_chars();
        if offset.checked_add(1).is_none_or(|n| n >= len) {
            return false;
        }
        self.rope.remove(offset..=offset);
        self.reindex();
        true
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_ENDING)
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("len_chars", &self.rope.len_chars())
            .field("line_ending", &self.line_ending)
            .field("line_starts", &self.line_starts)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn buf(text: &str) -> TextBuffer {
        TextBuffer::from_text(text, '\n')
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn empty_buffer_has_one_line() {
        let b = TextBuffer::default();
        assert!(b.is_empty());
        assert_eq!(b.len_chars(), 0);
        assert_eq!(b.line_starts(), &[0]);
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line_ending(), '\n');
    }

    #[test]
    fn from_text_keeps_content() {
        let b = buf("hello\nworld");
        assert_eq!(b.text(), "hello\nworld");
        assert_eq!(b.len_chars(), 11);
        assert_eq!(b.chars().collect::<String>(), "hello\nworld");
    }

    #[test]
    fn char_at_in_and_out_of_range() {
        let b = buf("ab");
        assert_eq!(b.char_at(0), Some('a'));
        assert_eq!(b.char_at(1), Some('b'));
        assert_eq!(b.char_at(2), None);
        assert_eq!(b.char_at(50), None);
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let b = buf("café\nü");
        assert_eq!(b.len_chars(), 6);
        assert_eq!(b.line_starts(), &[0, 5]);
        assert_eq!(b.char_at(3), Some('é'));
    }

    // -- Reindex ------------------------------------------------------------

    #[test]
    fn single_line_has_single_start() {
        assert_eq!(buf("hello").line_starts(), &[0]);
    }

    #[test]
    fn each_delimiter_opens_a_line() {
        assert_eq!(buf("ab\ncd\nef").line_starts(), &[0, 3, 6]);
    }

    #[test]
    fn trailing_delimiter_is_dropped() {
        assert_eq!(buf("ab\ncd\n").line_starts(), &[0, 3]);
    }

    #[test]
    fn lone_delimiter_is_one_line() {
        assert_eq!(buf("\n").line_starts(), &[0]);
    }

    #[test]
    fn consecutive_delimiters_make_empty_lines() {
        assert_eq!(buf("a\n\n\nb").line_starts(), &[0, 2, 3, 4]);
        // Only the very last one is dropped.
        assert_eq!(buf("\n\n").line_starts(), &[0, 1]);
    }

    #[test]
    fn custom_line_ending() {
        let b = TextBuffer::from_text("a;b;c\nd", ';');
        assert_eq!(b.line_starts(), &[0, 2, 4]);
        assert_eq!(b.line_ending(), ';');
    }

    #[test]
    fn carriage_return_is_not_a_break_by_default() {
        assert_eq!(buf("a\rb\r\nc").line_starts(), &[0, 5]);
    }

    #[test]
    fn line_start_lookup() {
        let b = buf("ab\ncd");
        assert_eq!(b.line_start(0), Some(0));
        assert_eq!(b.line_start(1), Some(3));
        assert_eq!(b.line_start(2), None);
    }

    // -- set_text -----------------------------------------------------------

    #[test]
    fn set_text_replaces_and_reindexes() {
        let mut b = buf("one line");
        b.set_text("a\nb\nc");
        assert_eq!(b.text(), "a\nb\nc");
        assert_eq!(b.line_starts(), &[0, 2, 4]);

        b.set_text("");
        assert_eq!(b.line_starts(), &[0]);
    }

    // -- insert -------------------------------------------------------------

    #[test]
    fn insert_in_middle() {
        let mut b = buf("ab");
        assert_eq!(b.insert(1, 'c'), Ok(true));
        assert_eq!(b.text(), "acb");
    }

    #[test]
    fn insert_at_both_ends() {
        let mut b = buf("b");
        b.insert(0, 'a').unwrap();
        b.insert(2, 'c').unwrap();
        assert_eq!(b.text(), "abc");
    }

    #[test]
    fn insert_line_ending_splits_line() {
        let mut b = buf("ab");
        b.insert(1, '\n').unwrap();
        assert_eq!(b.text(), "a\nb");
        assert_eq!(b.line_starts(), &[0, 2]);
    }

    #[test]
    fn insert_into_empty_buffer() {
        let mut b = TextBuffer::default();
        b.insert(0, 'x').unwrap();
        assert_eq!(b.text(), "x");
    }

    #[test]
    fn insert_past_end_is_an_error() {
        let mut b = buf("ab");
        assert_eq!(
            b.insert(3, 'x'),
            Err(EditError::OffsetOutOfRange { offset: 3, len: 2 })
        );
        assert_eq!(b.text(), "ab");
    }

    // -- remove_before ------------------------------------------------------

    #[test]
    fn remove_before_deletes_previous_char() {
        let mut b = buf("abc");
        assert_eq!(b.remove_before(2), Ok(true));
        assert_eq!(b.text(), "ac");
    }

    #[test]
    fn remove_before_at_start_is_noop() {
        let mut b = buf("ab");
        assert_eq!(b.remove_before(0), Ok(false));
        assert_eq!(b.text(), "ab");
    }

    #[test]
    fn remove_before_at_end_deletes_last_char() {
        let mut b = buf("ab");
        assert_eq!(b.remove_before(2), Ok(true));
        assert_eq!(b.text(), "a");
    }

    #[test]
    fn remove_before_joins_lines() {
        let mut b = buf("ab\ncd");
        b.remove_before(3).unwrap();
        assert_eq!(b.text(), "abcd");
        assert_eq!(b.line_starts(), &[0]);
    }

    #[test]
    fn remove_before_past_end_is_an_error() {
        let mut b = buf("ab");
        assert_eq!(
            b.remove_before(5),
            Err(EditError::OffsetOutOfRange { offset: 5, len: 2 })
        );
        assert_eq!(b.text(), "ab");
    }

    // -- remove_after -------------------------------------------------------

    #[test]
    fn remove_after_deletes_char_at_offset() {
        let mut b = buf("abc");
        assert!(b.remove_after(0));
        assert_eq!(b.text(), "bc");
    }

    #[test]
    fn remove_after_spares_the_last_char() {
        // `offset + 1 >= len` is a no-op, so the final char of the document
        // cannot be forward-deleted.
        let mut b = buf("abc");
        assert!(!b.remove_after(2));
        assert_eq!(b.text(), "abc");
        assert!(b.remove_after(1));
        assert_eq!(b.text(), "ac");
    }

    #[test]
    fn remove_after_on_empty_and_past_end() {
        let mut b = TextBuffer::default();
        assert!(!b.remove_after(0));

        let mut b = buf("ab");
        assert!(!b.remove_after(7));
        assert_eq!(b.text(), "ab");
    }

    #[test]
    fn remove_after_at_max_offset_is_noop() {
        let mut b = buf("abc");
        assert!(!b.remove_after(usize::MAX));
        assert_eq!(b.text(), "abc");
    }

    #[test]
    fn remove_after_deletes_line_ending() {
        let mut b = buf("ab\ncd");
        assert!(b.remove_after(2));
        assert_eq!(b.text(), "abcd");
        assert_eq!(b.line_starts(), &[0]);
    }

    // -- Properties ---------------------------------------------------------

    fn assert_index_invariants(b: &TextBuffer) -> Result<(), TestCaseError> {
        let starts = b.line_starts();
        let text: Vec<char> = b.chars().collect();

        prop_assert!(!starts.is_empty());
        prop_assert_eq!(starts[0], 0);
        for pair in starts.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let line = &text[start..end];
            // The delimiter may only appear as the line's own terminator.
            let interior = line.len().saturating_sub(1);
            prop_assert!(!line[..interior].contains(&'\n'));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn reindex_invariants_hold(text in "[ab\n]{0,40}") {
            assert_index_invariants(&buf(&text))?;
        }

        #[test]
        fn reindex_invariants_survive_edits(
            text in "[ab\n]{0,20}",
            edits in proptest::collection::vec((0usize..25, any::<bool>()), 0..20),
        ) {
            let mut b = buf(&text);
            for (offset, insert_newline) in edits {
                let offset = offset.min(b.len_chars());
                if insert_newline {
                    b.insert(offset, '\n').unwrap();
                } else {
                    b.remove_before(offset).unwrap();
                }
                assert_index_invariants(&b)?;
            }
        }

        #[test]
        fn remove_before_at_zero_never_changes_text(text in "[ab\n]{0,20}") {
            let mut b = buf(&text);
            prop_assert_eq!(b.remove_before(0), Ok(false));
            prop_assert_eq!(b.text(), text);
        }
    }
}
