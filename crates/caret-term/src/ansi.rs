// SPDX-License-Identifier: MIT
//
// ANSI escape sequences.
//
// Stateless writers for every terminal command caret emits. Deciding when
// a sequence is needed is the `SgrWriter`'s job; this module only knows the
// bytes. Coordinates are 0-indexed here and converted to the terminal's
// 1-indexed form on output.

use std::io::{self, Write};

use crate::cell::{Attr, CellColor};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to column `x`, row `y` (CUP).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Hide the hardware cursor. caret draws its own.
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Erase the whole screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// SGR 0. Clears colors and attributes; callers tracking SGR state must
/// forget it afterwards.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Switch to the alternate screen (DEC 1049).
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Leave the alternate screen, restoring the shell's content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Synchronized Output ─────────────────────────────────────────────────────

/// Start a synchronized update (DEC 2026). The terminal holds the frame
/// until [`end_sync`].
#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Colors & Attributes ─────────────────────────────────────────────────────

/// Set the foreground color (39 or 38;2;r;g;b).
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color (49 or 48;2;r;g;b).
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

/// Emit all set attributes as one SGR sequence, e.g. `\x1b[1;7m`.
/// Writes nothing for an empty set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    const CODES: [(Attr, &str); 3] = [
        (Attr::BOLD, "1"),
        (Attr::UNDERLINE, "4"),
        (Attr::INVERSE, "7"),
    ];

    if attr.is_empty() {
        return Ok(());
    }

    let params: Vec<&str> = CODES
        .iter()
        .filter(|(flag, _)| attr.contains(*flag))
        .map(|&(_, code)| code)
        .collect();
    write!(w, "\x1b[{}m", params.join(";"))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
