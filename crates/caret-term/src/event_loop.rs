// SPDX-License-Identifier: MIT
//
// Frame loop.
//
// Waits on the stdin channel with the tick interval as timeout, so input is
// handled as soon as it arrives and the app still gets a tick every
// interval (the caret blink needs one). A frame is painted only when
// something made it dirty: input, a resize, or a tick the app reports as
// visible.
//
// Resize arrives as SIGWINCH. The handler only sets a flag; the loop polls
// it once per iteration.
#![allow(unsafe_code)]

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::diff::DiffRenderer;
use crate::grid::FrameBuffer;
use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::terminal::{Size, Terminal};

// ─── Signals ─────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── Single-Run Guard ────────────────────────────────────────────────────────

/// Only one loop may own the terminal at a time.
static RUNNING: AtomicBool = AtomicBool::new(false);

struct RunGuard;

impl RunGuard {
    fn acquire() -> io::Result<Self> {
        if RUNNING.swap(true, Ordering::AcqRel) {
            return Err(io::Error::other("event loop already running"));
        }
        Ok(Self)
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        RUNNING.store(false, Ordering::Release);
    }
}

// ─── App ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// What the loop drives.
pub trait App {
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    fn on_resize(&mut self, _size: Size) {}

    /// Called every iteration. Return `true` if the frame needs repainting.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Draw the whole frame into `frame`, which arrives cleared.
    fn paint(&mut self, frame: &mut FrameBuffer);
}

/// Hand `events` to `app`. Stops at the first `Quit`.
fn dispatch(app: &mut impl App, events: &[Event]) -> Action {
    for event in events {
        if app.on_event(event) == Action::Quit {
            return Action::Quit;
        }
    }
    Action::Continue
}

// ─── Loop ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Longest wait for input before the app gets a tick.
    pub tick_interval: Duration,
}

pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: DiffRenderer,
    config: LoopConfig,
}

impl EventLoop {
    #[must_use]
    pub fn new(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            parser: Parser::new(),
            renderer: DiffRenderer::new(),
            config,
        }
    }

    /// Take over the terminal and run `app` until it quits or stdin closes.
    /// The terminal is restored on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if another loop is already running, or if terminal
    /// setup, reading or output fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        let _guard = RunGuard::acquire()?;

        self.terminal.enter()?;
        install_sigwinch_handler();
        app.on_resize(self.terminal.size());

        let result = StdinReader::spawn().and_then(|(mut reader, rx)| {
            info!(tick = ?self.config.tick_interval, "event loop started");
            let result = self.run_inner(app, &rx);
            reader.stop();
            result
        });

        self.terminal.leave()?;
        debug!(ok = result.is_ok(), "event loop stopped");
        result
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        let timeout = self.config.tick_interval;
        let mut dirty = true;

        loop {
            let events = match rx.recv_timeout(timeout) {
                Ok(bytes) => self.parser.advance(&bytes),
                Err(RecvTimeoutError::Timeout) if self.parser.has_pending() => self.parser.flush(),
                Err(RecvTimeoutError::Timeout) => Vec::new(),
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            };
            if dispatch(app, &events) == Action::Quit {
                return Ok(());
            }
            dirty |= !events.is_empty();

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let size = self.terminal.refresh_size();
                debug!(cols = size.cols, rows = size.rows, "resize");
                frame.resize(size.cols, size.rows);
                self.renderer.force_redraw();
                app.on_resize(size);
                dirty = true;
            }

            dirty |= app.on_tick();

            if dirty {
                frame.clear();
                app.paint(&mut frame);
                let stats = self.renderer.render(&frame);
                trace!(
                    rendered = stats.cells_rendered,
                    skipped = stats.cells_skipped,
                    bytes = stats.bytes_written,
                    "frame"
                );
                self.renderer.flush(&mut io::stdout().lock())?;
                dirty = false;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
