//! Input decoding
//!
//! Turns a raw byte stream into logical keys. Each byte read may time out;
//! a lone ESC, an ESC followed by nothing in time, or an unknown sequence all
//! decode to `Key::Escape`.

use crate::key::Key;
use std::collections::VecDeque;
use std::io;

const ESC: u8 = 0x1b;

/// Longest cursor position report accepted
const MAX_REPORT_LEN: usize = 32;

/// A byte stream read with a bounded wait
pub trait ByteSource {
    /// Read one byte; `Ok(None)` means the wait expired with no input
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Scripted input for tests and replays
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

/// Decode one key; `Ok(None)` when no byte arrived in time
pub fn decode_key<S: ByteSource + ?Sized>(src: &mut S) -> io::Result<Option<Key>> {
    let Some(byte) = src.read_byte()? else {
        return Ok(None);
    };
    if byte != ESC {
        return Ok(Some(Key::from_byte(byte)));
    }

    let Some(first) = src.read_byte()? else {
        return Ok(Some(Key::Escape));
    };
    let Some(second) = src.read_byte()? else {
        return Ok(Some(Key::Escape));
    };

    let key = match (first, second) {
        (b'[', digit @ b'0'..=b'9') => match src.read_byte()? {
            Some(b'~') => match digit {
                b'1' | b'7' => Some(Key::Home),
                b'4' | b'8' => Some(Key::End),
                b'3' => Some(Key::Delete),
                b'5' => Some(Key::PageUp),
                b'6' => Some(Key::PageDown),
                _ => None,
            },
            _ => None,
        },
        (b'[', b'A') => Some(Key::ArrowUp),
        (b'[', b'B') => Some(Key::ArrowDown),
        (b'[', b'C') => Some(Key::ArrowRight),
        (b'[', b'D') => Some(Key::ArrowLeft),
        (b'[', b'H') | (b'O', b'H') => Some(Key::Home),
        (b'[', b'F') | (b'O', b'F') => Some(Key::End),
        (b'[', b'Z') => Some(Key::BackTab),
        _ => None,
    };

    Ok(Some(key.unwrap_or_else(|| {
        tracing::trace!(first, second, "unknown escape sequence");
        Key::Escape
    })))
}

/// Parse a cursor position report of the form `ESC [ rows ; cols R`
///
/// The trailing `R` is optional. Returns `(rows, cols)`.
#[must_use]
pub fn parse_cursor_report(bytes: &[u8]) -> Option<(usize, usize)> {
    let body = bytes.strip_prefix(&[ESC, b'['])?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Read bytes up to the `R` that ends a cursor position report and parse them
///
/// This is separate from `decode_key` because the report starts with ESC `[`
/// like an escape sequence.
pub fn read_cursor_report<S: ByteSource + ?Sized>(src: &mut S) -> io::Result<Option<(usize, usize)>> {
    let mut buf = Vec::with_capacity(MAX_REPORT_LEN);
    while buf.len() < MAX_REPORT_LEN {
        match src.read_byte()? {
            Some(b'R') | None => break,
            Some(b) => buf.push(b),
        }
    }
    Ok(parse_cursor_report(&buf))
}
