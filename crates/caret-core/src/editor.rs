//! Editor session — one buffer, one cursor, and the commands that drive them.
//!
//! The input layer turns key events into [`Command`]s and hands them to
//! [`Editor::apply`]; the renderer reads the result back through the
//! accessors. Nothing here knows about terminals or keys.

use tracing::{debug, trace};

use crate::buffer::TextBuffer;
use crate::cursor::Cursor;
use crate::error::EditError;
use crate::options::EditorOptions;
use crate::position::Position;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// An editing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Type a char at the cursor.
    Insert(char),
    /// Break the line at the cursor.
    InsertLineEnding,
    /// Backspace.
    DeleteBefore,
    /// Forward delete.
    DeleteAfter,
    Move(Direction),
}

/// An editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
    options: EditorOptions,
}

impl Editor {
    /// Open a session on `text`, with the cursor at `options.initial_offset`.
    ///
    /// The initial offset is used as given, even if the text is shorter.
    #[must_use]
    pub fn new(text: &str, options: EditorOptions) -> Self {
        let buffer = TextBuffer::from_text(text, options.line_ending);
        let cursor = Cursor::at(options.initial_offset);
        debug!(
            chars = buffer.len_chars(),
            lines = buffer.line_count(),
            offset = cursor.offset(),
            "editor session opened"
        );
        Self {
            buffer,
            cursor,
            options,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// The document as a `String`.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// The cursor's (line, col).
    #[must_use]
    pub fn cursor_position(&self) -> Position {
        self.cursor.position(&self.buffer)
    }

    /// The char under the cursor, if any.
    #[must_use]
    pub fn current_char(&self) -> Option<char> {
        self.cursor.current_char(&self.buffer)
    }

    // -- Commands -----------------------------------------------------------

    /// Run one command. Returns whether the text or the cursor changed.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OffsetOutOfRange`] when the cursor sits past the
    /// end of the text and the command would have to edit there. Nothing is
    /// changed in that case.
    pub fn apply(&mut self, command: Command) -> Result<bool, EditError> {
        let changed = match command {
            Command::Insert(ch) => self.insert_char(ch)?,
            Command::InsertLineEnding => self.insert_line_ending()?,
            Command::DeleteBefore => self.delete_before()?,
            Command::DeleteAfter => self.delete_after(),
            Command::Move(dir) => self.move_cursor(dir),
        };
        if changed {
            trace!(
                ?command,
                offset = self.cursor.offset(),
                memorized = ?self.cursor.memorized_col(),
                "applied"
            );
        }
        Ok(changed)
    }

    /// Insert `ch` at the cursor and leave the cursor just after it.
    /// Appending at the end of the text always advances, unlike `next`,
    /// which stops on the last char.
    ///
    /// # Errors
    ///
    /// Fails if the cursor is past the end of the text.
    pub fn insert_char(&mut self, ch: char) -> Result<bool, EditError> {
        let offset = self.cursor.offset();
        self.buffer.insert(offset, ch)?;
        self.cursor.move_to(offset + 1);
        Ok(true)
    }

    /// Insert the configured line ending at the cursor.
    ///
    /// # Errors
    ///
    /// Fails if the cursor is past the end of the text.
    pub fn insert_line_ending(&mut self) -> Result<bool, EditError> {
        self.insert_char(self.buffer.line_ending())
    }

    /// Delete the char before the cursor and step back onto its place.
    /// No-op at offset 0.
    ///
    /// # Errors
    ///
    /// Fails if the cursor is past the end of the text.
    pub fn delete_before(&mut self) -> Result<bool, EditError> {
        let removed = self.buffer.remove_before(self.cursor.offset())?;
        if removed {
            self.cursor.prev();
        }
        Ok(removed)
    }

    /// Delete the char under the cursor. The cursor stays put.
    pub fn delete_after(&mut self) -> bool {
        self.buffer.remove_after(self.cursor.offset())
    }

    /// Move the cursor one step.
    pub fn move_cursor(&mut self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.cursor.prev(),
            Direction::Right => self.cursor.next(&self.buffer),
            Direction::Up => self.cursor.up(&self.buffer),
            Direction::Down => self.cursor.down(&self.buffer),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
