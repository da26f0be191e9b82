// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// Keeps the previous frame and, on each render, emits output only for the
// cells that changed. Identical rows are skipped with one slice compare.
// The first frame, and any frame after a resize or `force_redraw`, clears
// the screen and draws everything. Each frame is wrapped in synchronized
// output so the terminal never shows half of it.

use std::io::{self, Write};

use crate::ansi;
use crate::grid::FrameBuffer;
use crate::output::{OutputBuffer, SgrWriter};

/// Counters from one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub cells_rendered: usize,
    pub cells_skipped: usize,
    pub bytes_written: usize,
}

/// Renders frames as diffs against the previous one.
pub struct DiffRenderer {
    output: OutputBuffer,
    writer: SgrWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: SgrWriter::new(),
            previous: None,
        }
    }

    /// Build the output for `current`. Nothing reaches the terminal until
    /// [`flush`](Self::flush).
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();
        self.writer.reset_state();

        let mut stats = RenderStats::default();
        let (width, height) = (current.width(), current.height());
        if width == 0 || height == 0 {
            self.remember(current);
            return stats;
        }

        let previous = self
            .previous
            .take()
            .filter(|p| p.width() == width && p.height() == height);

        ansi::begin_sync(&mut self.output).ok();
        if previous.is_none() {
            ansi::clear_screen(&mut self.output).ok();
        }

        for y in 0..height {
            let Some(row) = current.row(y) else { break };
            let prev_row = previous.as_ref().and_then(|p| p.row(y));

            if prev_row == Some(row) {
                stats.cells_skipped += row.len();
                continue;
            }

            for (x, cell) in (0..width).zip(row) {
                if prev_row.is_some_and(|pr| pr[usize::from(x)] == *cell) {
                    stats.cells_skipped += 1;
                } else {
                    self.writer.write_cell(&mut self.output, x, y, cell);
                    stats.cells_rendered += 1;
                }
            }
        }

        // Leave the terminal's own SGR state clean between frames.
        ansi::reset(&mut self.output).ok();
        ansi::end_sync(&mut self.output).ok();
        stats.bytes_written = self.output.len();

        self.previous = previous;
        self.remember(current);
        stats
    }

    /// Write the pending output to `w`, usually locked stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Forget the previous frame so the next render redraws everything.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    fn remember(&mut self, current: &FrameBuffer) {
        match &mut self.previous {
            Some(prev) => prev.copy_from(current),
            None => self.previous = Some(current.clone()),
        }
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
