// SPDX-License-Identifier: MIT
//
// The running editor: wires key events into the core and paints frames.

use caret_core::Editor;
use caret_core::render::{CaretStyle, FrameClock, blink_phase, render_frame};
use caret_term::event_loop::{Action, App};
use caret_term::grid::FrameBuffer;
use caret_term::input::Event;
use caret_term::terminal::Size;
use tracing::{info, warn};

use crate::keymap::{KeyAction, map_key};
use crate::screen::{GridSurface, render_status_line, scroll_to_show};

pub struct Session {
    editor: Editor,
    clock: FrameClock,
    /// First text line on screen.
    top: usize,
    /// Caret phase of the last painted frame.
    painted_phase: Option<CaretStyle>,
}

impl Session {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            clock: FrameClock::start(),
            top: 0,
            painted_phase: None,
        }
    }

    #[cfg(test)]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    fn phase(&self) -> CaretStyle {
        blink_phase(self.clock.elapsed_ms(), self.editor.options().blink_period_ms)
    }
}

impl App for Session {
    fn on_event(&mut self, event: &Event) -> Action {
        let Event::Key(key) = event;
        match map_key(key) {
            KeyAction::Quit => {
                info!("quit requested");
                Action::Quit
            }
            KeyAction::Edit(command) => {
                if let Err(err) = self.editor.apply(command) {
                    warn!(?command, %err, "edit rejected");
                }
                Action::Continue
            }
            KeyAction::Ignore => Action::Continue,
        }
    }

    fn on_resize(&mut self, size: Size) {
        let rows = usize::from(size.rows.saturating_sub(1));
        self.top = scroll_to_show(self.top, self.editor.cursor_position().line, rows);
    }

    fn on_tick(&mut self) -> bool {
        self.painted_phase != Some(self.phase())
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        let text_rows = frame.height().saturating_sub(1);
        let pos = self.editor.cursor_position();
        self.top = scroll_to_show(self.top, pos.line, usize::from(text_rows));

        let elapsed_ms = self.clock.elapsed_ms();
        let period_ms = self.editor.options().blink_period_ms;
        let mut surface = GridSurface::new(frame, self.top, text_rows);
        render_frame(&self.editor, &mut surface, elapsed_ms, period_ms);
        self.painted_phase = Some(blink_phase(elapsed_ms, period_ms));

        if let Some(status_y) = frame.height().checked_sub(1) {
            render_status_line(frame, status_y, pos, self.editor.buffer().len_chars());
        }
    }
}
