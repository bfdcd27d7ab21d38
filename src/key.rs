//! Key representation for editor input

/// One logical key produced by the input decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Literal byte (printable or otherwise unmapped)
    Char(u8),
    /// Control key combination, stored as the lowercase letter (Ctrl+Q is `Ctrl(b'q')`)
    Ctrl(u8),
    /// Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Navigation keys
    Home,
    End,
    PageUp,
    PageDown,
    /// Editing keys
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    BackTab,
}

impl Key {
    /// Byte values below this are control codes
    const CONTROL_LIMIT: u8 = 0x20;

    /// Map a single raw byte (not part of an escape sequence) to a key
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'\r' => Key::Enter,
            b'\t' => Key::Tab,
            0x1b => Key::Escape,
            0x7f => Key::Backspace,
            1..=26 => Key::Ctrl(b'a' + byte - 1),
            _ => Key::Char(byte),
        }
    }

    /// Whether this key inserts its byte into the document
    #[must_use]
    pub fn is_printable(&self) -> bool {
        matches!(self, Key::Char(b) if *b >= Self::CONTROL_LIMIT && *b != 0x7f)
    }
}
