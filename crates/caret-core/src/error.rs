//! Error types for the editor core.
//!
//! Boundary conditions (moving or deleting past either end of the text) are
//! not errors — they are reported as `Ok(false)` / `false` no-ops. The types
//! here cover the two things that genuinely can go wrong: an edit addressed
//! to an offset the buffer doesn't have, and a configuration directive that
//! doesn't parse.

use thiserror::Error;

/// An edit that could not be applied to the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The offset lies beyond the end of the text. Happens when a cursor
    /// was repositioned with `move_to` and never brought back in range.
    #[error("offset {offset} is out of range for a buffer of {len} chars")]
    OffsetOutOfRange { offset: usize, len: usize },
}

/// A configuration directive that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error("option {0} requires a value")]
    MissingValue(String),
}
