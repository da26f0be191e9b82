//! Editor options — values and the `:set`-style directive parser.
//!
//! [`EditorOptions`] holds the handful of settings the editor has. Overrides
//! are written as directives, one syntax for both the rc file and the
//! `--set` command-line flag.
//!
//! # Supported syntax
//!
//! | Syntax         | Effect              |
//! |----------------|---------------------|
//! | `option=value` | Assign a value      |
//! | `option?`      | Query current value |
//! | `option`       | Query current value |
//!
//! In an rc file, directives are separated by whitespace or newlines and a
//! line whose first non-blank char is `#` is a comment.
//!
//! # Option names
//!
//! | Full name    | Abbrev | Value                              | Default  |
//! |--------------|--------|------------------------------------|----------|
//! | `lineending` | `le`   | `lf`, `cr`, or any single char     | `lf`     |
//! | `cursor`     | `cur`  | initial cursor offset              | `41`     |
//! | `blink`      | `bl`   | caret blink period in ms, 0 = off  | `1000`   |
//! | `tick`       |        | frame interval in µs               | `16667`  |

use std::time::Duration;

use crate::error::OptionError;

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// The char that separates lines.
    pub line_ending: char,

    /// Where the cursor starts when a session opens.
    pub initial_offset: usize,

    /// Full caret blink cycle in milliseconds. 0 disables blinking.
    pub blink_period_ms: u64,

    /// Time between frames in microseconds.
    pub tick_interval_us: u64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            line_ending: '\n',
            initial_offset: 41,
            blink_period_ms: 1000,
            // 60 Hz
            tick_interval_us: 16_667,
        }
    }
}

/// A parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `option=value` — assign a value.
    Assign(String, String),

    /// `option?` or bare `option` — query the current value.
    Query(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionName {
    LineEnding,
    Cursor,
    Blink,
    Tick,
}

impl OptionName {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "lineending" | "le" => Some(Self::LineEnding),
            "cursor" | "cur" => Some(Self::Cursor),
            "blink" | "bl" => Some(Self::Blink),
            "tick" => Some(Self::Tick),
            _ => None,
        }
    }

    const fn full_name(self) -> &'static str {
        match self {
            Self::LineEnding => "lineending",
            Self::Cursor => "cursor",
            Self::Blink => "blink",
            Self::Tick => "tick",
        }
    }
}

/// Parse a single directive.
#[must_use]
pub fn parse_directive(arg: &str) -> Directive {
    if let Some((name, value)) = arg.split_once('=') {
        return Directive::Assign(name.to_string(), value.to_string());
    }
    let name = arg.strip_suffix('?').unwrap_or(arg);
    Directive::Query(name.to_string())
}

/// Parse a block of directives, such as the contents of an rc file.
#[must_use]
pub fn parse_directives(src: &str) -> Vec<Directive> {
    src.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(parse_directive)
        .collect()
}

impl EditorOptions {
    /// Frame interval as a `Duration`.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_micros(self.tick_interval_us)
    }

    /// Apply one directive. A query validates the name and changes nothing.
    ///
    /// # Errors
    ///
    /// Unknown names, empty values and values that don't parse for the
    /// option are rejected; the options are left untouched.
    pub fn apply(&mut self, directive: &Directive) -> Result<(), OptionError> {
        let (name, value) = match directive {
            Directive::Query(name) => {
                return canonical(name).map(|_| ());
            }
            Directive::Assign(name, value) => (name, value),
        };

        let canon = canonical(name)?;
        if value.is_empty() {
            return Err(OptionError::MissingValue(name.clone()));
        }
        let invalid = || OptionError::InvalidValue {
            name: name.clone(),
            value: value.clone(),
        };

        match canon {
            OptionName::LineEnding => {
                self.line_ending = parse_line_ending(value).ok_or_else(invalid)?;
            }
            OptionName::Cursor => self.initial_offset = value.parse().map_err(|_| invalid())?,
            OptionName::Blink => self.blink_period_ms = value.parse().map_err(|_| invalid())?,
            OptionName::Tick => {
                let us: u64 = value.parse().map_err(|_| invalid())?;
                if us == 0 {
                    return Err(invalid());
                }
                self.tick_interval_us = us;
            }
        }
        Ok(())
    }

    /// Render an option's current value as `name=value`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::UnknownOption`] for an unknown name.
    pub fn describe(&self, name: &str) -> Result<String, OptionError> {
        let canon = canonical(name)?;
        let value = match canon {
            OptionName::LineEnding => format_line_ending(self.line_ending),
            OptionName::Cursor => self.initial_offset.to_string(),
            OptionName::Blink => self.blink_period_ms.to_string(),
            OptionName::Tick => self.tick_interval_us.to_string(),
        };
        Ok(format!("{}={value}", canon.full_name()))
    }
}

fn canonical(name: &str) -> Result<OptionName, OptionError> {
    OptionName::lookup(name).ok_or_else(|| OptionError::UnknownOption(name.to_string()))
}

fn parse_line_ending(value: &str) -> Option<char> {
    match value {
        "lf" => Some('\n'),
        "cr" => Some('\r'),
        _ => {
            let mut chars = value.chars();
            let ch = chars.next()?;
            chars.next().is_none().then_some(ch)
        }
    }
}

fn format_line_ending(ch: char) -> String {
    match ch {
        '\n' => "lf".to_string(),
        '\r' => "cr".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
