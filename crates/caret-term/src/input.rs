// SPDX-License-Identifier: MIT
//
// Key input parser.
//
// Turns raw stdin bytes into key events. Understands what a terminal in
// raw mode sends without any extra protocols enabled:
//
// - C0 control bytes (Ctrl+letter, Enter, Tab, Backspace)
// - legacy CSI sequences, both letter-final (arrows, Home/End) and
//   `~`-final (Delete, PageUp/PageDown), with xterm modifier parameters
// - SS3 sequences (arrows in application cursor mode)
// - ESC-prefixed keys as Alt
// - UTF-8 multi-byte characters
//
// Sequences can be split across reads, so the parser keeps unconsumed
// bytes. A lone ESC is ambiguous until more bytes arrive or time passes;
// the loop calls `flush` after a short quiet period to settle it as the
// Escape key.

use bitflags::bitflags;

// ─── Events ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// xterm modifier bits; a CSI modifier parameter is `1 + bits`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b001;
        const ALT   = 0b010;
        const CTRL  = 0b100;
    }
}

// ─── Parser ──────────────────────────────────────────────────────────────────

/// Incremental byte-to-event parser.
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
        }
    }

    /// Feed bytes and return every event that is now complete.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match parse_one(&self.buf[pos..]) {
                Parsed::Key(key, used) => {
                    events.push(Event::Key(key));
                    pos += used;
                }
                Parsed::Skip(used) => pos += used,
                Parsed::Incomplete => break,
            }
        }

        self.buf.drain(..pos);
        events
    }

    /// Whether bytes are waiting for the rest of a sequence.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Give up waiting: pending bytes become keys on their own.
    pub fn flush(&mut self) -> Vec<Event> {
        let events = self
            .buf
            .iter()
            .filter_map(|&b| match b {
                0x1B => Some(KeyEvent::plain(KeyCode::Escape)),
                0x20..=0x7E => Some(KeyEvent::plain(KeyCode::Char(char::from(b)))),
                _ => None,
            })
            .map(Event::Key)
            .collect();
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Sequences ───────────────────────────────────────────────────────────────

enum Parsed {
    Key(KeyEvent, usize),
    Skip(usize),
    Incomplete,
}

fn parse_one(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),
        0x09 => Parsed::Key(KeyEvent::plain(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Key(KeyEvent::plain(KeyCode::Enter), 1),
        0x08 | 0x7F => Parsed::Key(KeyEvent::plain(KeyCode::Backspace), 1),
        b @ 0x01..=0x1A => Parsed::Key(KeyEvent::new(ctrl_letter(b), Modifiers::CTRL), 1),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::plain(KeyCode::Char(char::from(b))), 1),
        0xC0..=0xF7 => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    let Some(&second) = buf.get(1) else {
        return Parsed::Incomplete;
    };
    match second {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => Parsed::Key(
            KeyEvent::new(KeyCode::Char(char::from(b)), Modifiers::ALT),
            2,
        ),
        0x7F => Parsed::Key(KeyEvent::new(KeyCode::Backspace, Modifiers::ALT), 2),
        b @ 0x01..=0x1A => Parsed::Key(
            KeyEvent::new(ctrl_letter(b), Modifiers::ALT | Modifiers::CTRL),
            2,
        ),
        // ESC ESC: the first one stands alone.
        _ => Parsed::Key(KeyEvent::plain(KeyCode::Escape), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    // Parameter and intermediate bytes run until a final byte in 0x40..=0x7E.
    let mut end = 2;
    loop {
        let Some(&b) = buf.get(end) else {
            return Parsed::Incomplete;
        };
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    let used = end + 1;
    let params = parse_params(&buf[2..end]);
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = match buf[end] {
        b'~' => match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            _ => return Parsed::Skip(used),
        },
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'Z' => return Parsed::Key(KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT), used),
        _ => return Parsed::Skip(used),
    };
    Parsed::Key(KeyEvent::new(code, modifiers), used)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    let Some(&b) = buf.get(2) else {
        return Parsed::Incomplete;
    };
    let code = match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        _ => return Parsed::Skip(3),
    };
    Parsed::Key(KeyEvent::plain(code), 3)
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let len = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    };
    if buf.len() < len {
        // A non-continuation byte inside the window means it can never complete.
        if buf[1..].iter().any(|&b| b & 0xC0 != 0x80) {
            return Parsed::Skip(1);
        }
        return Parsed::Incomplete;
    }
    match std::str::from_utf8(&buf[..len]).ok().and_then(|s| s.chars().next()) {
        Some(ch) => Parsed::Key(KeyEvent::plain(KeyCode::Char(ch)), len),
        None => Parsed::Skip(1),
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// 0x01 is Ctrl+A, 0x1A is Ctrl+Z.
fn ctrl_letter(b: u8) -> KeyCode {
    KeyCode::Char(char::from(b + b'a' - 1))
}

fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|part| {
            part.iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &d| {
                    acc.saturating_mul(10).saturating_add(u16::from(d - b'0'))
                })
        })
        .collect()
}

fn decode_modifiers(param: u16) -> Modifiers {
    let bits = u8::try_from(param.saturating_sub(1)).unwrap_or(0);
    Modifiers::from_bits_truncate(bits)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(bytes: &[u8]) -> Vec<KeyEvent> {
        Parser::new()
            .advance(bytes)
            .into_iter()
            .map(|Event::Key(k)| k)
            .collect()
    }

    fn one(bytes: &[u8]) -> KeyEvent {
        let ks = keys(bytes);
        assert_eq!(ks.len(), 1, "expected one key from {bytes:?}, got {ks:?}");
        ks[0]
    }

    // ── Plain bytes ─────────────────────────────────────────────────────

    #[test]
    fn printable_ascii() {
        assert_eq!(keys(b"hi"), vec![
            KeyEvent::plain(KeyCode::Char('h')),
            KeyEvent::plain(KeyCode::Char('i')),
        ]);
    }

    #[test]
    fn control_bytes() {
        assert_eq!(one(b"\r"), KeyEvent::plain(KeyCode::Enter));
        assert_eq!(one(b"\n"), KeyEvent::plain(KeyCode::Enter));
        assert_eq!(one(b"\t"), KeyEvent::plain(KeyCode::Tab));
        assert_eq!(one(b"\x7f"), KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(one(b"\x11"), KeyEvent::new(KeyCode::Char('q'), Modifiers::CTRL));
    }

    #[test]
    fn utf8_chars() {
        assert_eq!(one("é".as_bytes()), KeyEvent::plain(KeyCode::Char('é')));
        assert_eq!(one("日".as_bytes()), KeyEvent::plain(KeyCode::Char('日')));
        assert_eq!(one("🦀".as_bytes()), KeyEvent::plain(KeyCode::Char('🦀')));
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "日".as_bytes();
        let mut p = Parser::new();
        assert!(p.advance(&bytes[..1]).is_empty());
        assert!(p.has_pending());
        assert_eq!(
            p.advance(&bytes[1..]),
            vec![Event::Key(KeyEvent::plain(KeyCode::Char('日')))]
        );
        assert!(!p.has_pending());
    }

    #[test]
    fn broken_utf8_is_skipped() {
        assert_eq!(keys(b"\xC3a"), vec![KeyEvent::plain(KeyCode::Char('a'))]);
    }

    // ── Escape sequences ────────────────────────────────────────────────

    #[test]
    fn csi_arrows_and_navigation() {
        assert_eq!(one(b"\x1b[A"), KeyEvent::plain(KeyCode::Up));
        assert_eq!(one(b"\x1b[B"), KeyEvent::plain(KeyCode::Down));
        assert_eq!(one(b"\x1b[C"), KeyEvent::plain(KeyCode::Right));
        assert_eq!(one(b"\x1b[D"), KeyEvent::plain(KeyCode::Left));
        assert_eq!(one(b"\x1b[H"), KeyEvent::plain(KeyCode::Home));
        assert_eq!(one(b"\x1b[F"), KeyEvent::plain(KeyCode::End));
    }

    #[test]
    fn csi_tilde_keys() {
        assert_eq!(one(b"\x1b[3~"), KeyEvent::plain(KeyCode::Delete));
        assert_eq!(one(b"\x1b[5~"), KeyEvent::plain(KeyCode::PageUp));
        assert_eq!(one(b"\x1b[6~"), KeyEvent::plain(KeyCode::PageDown));
        assert_eq!(one(b"\x1b[1~"), KeyEvent::plain(KeyCode::Home));
        assert_eq!(one(b"\x1b[4~"), KeyEvent::plain(KeyCode::End));
    }

    #[test]
    fn csi_modifier_parameter() {
        assert_eq!(one(b"\x1b[1;5C"), KeyEvent::new(KeyCode::Right, Modifiers::CTRL));
        assert_eq!(one(b"\x1b[1;2A"), KeyEvent::new(KeyCode::Up, Modifiers::SHIFT));
        assert_eq!(one(b"\x1b[3;3~"), KeyEvent::new(KeyCode::Delete, Modifiers::ALT));
    }

    #[test]
    fn ss3_arrows() {
        assert_eq!(one(b"\x1bOA"), KeyEvent::plain(KeyCode::Up));
        assert_eq!(one(b"\x1bOD"), KeyEvent::plain(KeyCode::Left));
    }

    #[test]
    fn alt_prefix() {
        assert_eq!(one(b"\x1bx"), KeyEvent::new(KeyCode::Char('x'), Modifiers::ALT));
    }

    #[test]
    fn unknown_sequences_are_dropped() {
        assert_eq!(keys(b"\x1b[99~a"), vec![KeyEvent::plain(KeyCode::Char('a'))]);
        assert_eq!(keys(b"\x1b[?1;2cb"), vec![KeyEvent::plain(KeyCode::Char('b'))]);
    }

    #[test]
    fn sequence_split_across_reads() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[").is_empty());
        assert!(p.advance(b"1;5").is_empty());
        assert_eq!(
            p.advance(b"D"),
            vec![Event::Key(KeyEvent::new(KeyCode::Left, Modifiers::CTRL))]
        );
    }

    // ── Lone ESC ────────────────────────────────────────────────────────

    #[test]
    fn lone_escape_waits_for_flush() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert!(p.has_pending());
        assert_eq!(p.flush(), vec![Event::Key(KeyEvent::plain(KeyCode::Escape))]);
        assert!(!p.has_pending());
    }

    #[test]
    fn double_escape_emits_first() {
        let mut p = Parser::new();
        assert_eq!(
            p.advance(b"\x1b\x1b"),
            vec![Event::Key(KeyEvent::plain(KeyCode::Escape))]
        );
        assert!(p.has_pending());
    }

    #[test]
    fn flush_of_partial_csi() {
        let mut p = Parser::new();
        p.advance(b"\x1b[");
        assert_eq!(
            p.flush(),
            vec![
                Event::Key(KeyEvent::plain(KeyCode::Escape)),
                Event::Key(KeyEvent::plain(KeyCode::Char('['))),
            ]
        );
    }
}
