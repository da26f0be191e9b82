// SPDX-License-Identifier: MIT
//
// Key-to-command mapping.

use caret_core::{Command, Direction};
use caret_term::input::{KeyCode, KeyEvent, Modifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Edit(Command),
    Quit,
    Ignore,
}

/// Printable chars insert unless Ctrl or Alt is held (Shift is part of the
/// char). Enter, Backspace, Delete and the arrows edit or move. Ctrl+Q quits.
/// Everything else is ignored.
pub fn map_key(key: &KeyEvent) -> KeyAction {
    let chord = key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT);

    match key.code {
        KeyCode::Char('q') if key.modifiers == Modifiers::CTRL => KeyAction::Quit,
        KeyCode::Char(ch) if !chord && !ch.is_control() => KeyAction::Edit(Command::Insert(ch)),
        KeyCode::Enter if !chord => KeyAction::Edit(Command::InsertLineEnding),
        KeyCode::Backspace if !chord => KeyAction::Edit(Command::DeleteBefore),
        KeyCode::Delete if !chord => KeyAction::Edit(Command::DeleteAfter),
        KeyCode::Up => KeyAction::Edit(Command::Move(Direction::Up)),
        KeyCode::Down => KeyAction::Edit(Command::Move(Direction::Down)),
        KeyCode::Left => KeyAction::Edit(Command::Move(Direction::Left)),
        KeyCode::Right => KeyAction::Edit(Command::Move(Direction::Right)),
        _ => KeyAction::Ignore,
    }
}
