// SPDX-License-Identifier: MIT
//
// caret-term — the terminal side of caret.
//
// Raw mode and the alternate screen, a background stdin reader, a key
// parser, a cell grid, and a differential renderer that writes only the
// cells that changed since the last frame. The event loop ties them
// together and drives an `App` once per input burst or frame tick.
//
// No TUI framework underneath: termios through libc and hand-written ANSI.

pub mod ansi;
pub mod cell;
pub mod diff;
pub mod event_loop;
pub mod grid;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
