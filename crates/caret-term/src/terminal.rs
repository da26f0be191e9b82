// SPDX-License-Identifier: MIT
//
// Terminal session: raw mode, alternate screen, restore on exit.
//
// termios, ioctl and isatty have no safe std wrappers, so this module is
// the one place in caret that uses `unsafe`. Each block wraps a single
// libc call.
#![allow(unsafe_code)]
//
// A panic while the editor owns the terminal would leave the shell with no
// echo and a hidden cursor. The panic hook writes a fixed restore sequence
// straight to fd 1 (not through the stdout lock, which the panicking frame
// may hold), restores termios from a global backup, then hands off to the
// previous hook.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use tracing::debug;

use crate::ansi;

/// Size used when the terminal can't be queried (pipes, CI).
pub const FALLBACK_SIZE: Size = Size { cols: 80, rows: 24 };

// ─── Size ────────────────────────────────────────────────────────────────────

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Current size of the terminal on stdout, via `TIOCGWINSZ`.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };
    (rc == 0 && ws.ws_col > 0 && ws.ws_row > 0).then_some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Whether stdin is a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic Restore ───────────────────────────────────────────────────────────

/// Copy of the pre-raw termios for the panic hook, which can't reach the
/// `Terminal` that owns the real one.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(original) = guard.as_ref() {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// End sync, reset SGR, show the cursor, leave the alternate screen.
/// The alt-screen exit goes last so the shell comes back clean.
#[rustfmt::skip]
const EMERGENCY_RESTORE: &[u8] = b"\
    \x1b[?2026l\
    \x1b[0m\
    \x1b[?25h\
    \x1b[?1049l";

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            #[cfg(unix)]
            restore_termios_from_backup();
            previous(info);
        }));
    });
}

fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let mut out = io::stdout();
        let _ = out.write_all(EMERGENCY_RESTORE);
        let _ = out.flush();
    }
}

// ─── Terminal ────────────────────────────────────────────────────────────────

/// Owns the terminal while the editor runs.
///
/// [`enter`](Self::enter) switches to raw mode and the alternate screen;
/// dropping the handle (or [`leave`](Self::leave)) puts everything back.
///
/// ```no_run
/// use caret_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // draw frames, read keys
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    #[cfg(unix)]
    original_termios: Option<libc::termios>,
    size: Size,
    active: bool,
}

impl Terminal {
    /// A handle sized to the current terminal, or 80x24 if that can't be
    /// determined. Does not touch terminal modes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            original_termios: None,
            size: get_size().unwrap_or(FALLBACK_SIZE),
            active: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-read the size from the OS, keeping the cached one on failure.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(size) = get_size() {
            self.size = size;
        }
        self.size
    }

    /// Raw mode, alternate screen, hidden cursor, cleared screen.
    /// A no-op when already active.
    ///
    /// # Errors
    ///
    /// Returns an error if termios setup or writing to stdout fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        install_panic_hook();
        self.enable_raw_mode()?;

        let mut out = io::stdout().lock();
        ansi::enter_alt_screen(&mut out)?;
        ansi::cursor_hide(&mut out)?;
        ansi::clear_screen(&mut out)?;
        out.flush()?;

        self.active = true;
        debug!(cols = self.size.cols, rows = self.size.rows, "terminal entered");
        Ok(())
    }

    /// Undo [`enter`](Self::enter). A no-op when inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or restoring termios fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let mut out = io::stdout().lock();
        ansi::end_sync(&mut out)?;
        ansi::reset(&mut out)?;
        ansi::cursor_show(&mut out)?;
        ansi::exit_alt_screen(&mut out)?;
        out.flush()?;
        drop(out);

        self.disable_raw_mode()?;
        self.active = false;
        debug!("terminal restored");
        Ok(())
    }

    // ── termios ─────────────────────────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        if !is_tty() {
            return Ok(());
        }
        let fd = libc::STDIN_FILENO;

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            self.original_termios = Some(termios);
            if let Ok(mut backup) = TERMIOS_BACKUP.lock() {
                *backup = Some(termios);
            }

            // Same flags as cfmakeraw(3).
            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        let Some(original) = self.original_termios.take() else {
            return Ok(());
        };
        unsafe {
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const original) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        if let Ok(mut backup) = TERMIOS_BACKUP.lock() {
            *backup = None;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
