//! # caret-core — Text and cursor model for caret
//!
//! Everything here is pure logic; the terminal lives in `caret-term`.
//!
//! - **[`position`]** — `Position` (line, col), 0-indexed
//! - **[`buffer`]** — `TextBuffer`: a rope plus the line-start index
//! - **[`cursor`]** — `Cursor`: char offset, horizontal/vertical moves, memorized column
//! - **[`editor`]** — `Editor` session owning buffer, cursor and options; `Command` dispatch
//! - **[`render`]** — frame layout onto an abstract `Surface`, caret blink
//! - **[`options`]** — `EditorOptions` and the `name=value` directive parser
//! - **[`error`]** — `EditError`, `OptionError`

pub mod buffer;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod options;
pub mod position;
pub mod render;

pub use buffer::TextBuffer;
pub use cursor::Cursor;
pub use editor::{Command, Direction, Editor};
pub use error::{EditError, OptionError};
pub use options::{Directive, EditorOptions};
pub use position::Position;
pub use render::{CaretStyle, FrameClock, Paint, Surface};
