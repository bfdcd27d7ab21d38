//! Command dispatch and keybindings
//! Translates keys into editor commands

/// ## command/ Invariants
///
/// - Translation is a pure function of the key.
/// - Commands never mutate state; the editor executes them.
/// - Unbound keys yield `Noop`.
use crate::key::Key;

/// Editor commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveToLineStart,
    MoveToLineEnd,
    PageUp,
    PageDown,

    // Editing
    InsertChar(u8),
    InsertNewline,
    /// Indent the selection, or insert a tab without one
    Tab,
    Unindent,
    Backspace,
    DeleteForward,

    // Selection and clipboard
    ToggleSelection,
    CancelSelection,
    Copy,
    Cut,
    Paste,

    // Control
    Save,
    Find,
    Redraw,
    Quit,
    Noop,
}

/// Translate a key into a command
#[must_use]
pub fn translate_key(key: Key) -> Command {
    match key {
        Key::ArrowLeft => Command::MoveLeft,
        Key::ArrowRight => Command::MoveRight,
        Key::ArrowUp => Command::MoveUp,
        Key::ArrowDown => Command::MoveDown,
        Key::Home => Command::MoveToLineStart,
        Key::End => Command::MoveToLineEnd,
        Key::PageUp => Command::PageUp,
        Key::PageDown => Command::PageDown,

        Key::Enter => Command::InsertNewline,
        Key::Tab => Command::Tab,
        Key::BackTab => Command::Unindent,
        Key::Backspace | Key::Ctrl(b'h') => Command::Backspace,
        Key::Delete => Command::DeleteForward,
        Key::Escape => Command::CancelSelection,

        Key::Ctrl(b'q') => Command::Quit,
        Key::Ctrl(b's') => Command::Save,
        Key::Ctrl(b'f') => Command::Find,
        Key::Ctrl(b'b') => Command::ToggleSelection,
        Key::Ctrl(b'c') => Command::Copy,
        Key::Ctrl(b'x') => Command::Cut,
        Key::Ctrl(b'v') => Command::Paste,
        Key::Ctrl(b'l') => Command::Redraw,

        Key::Char(ch) if key.is_printable() => Command::InsertChar(ch),
        _ => Command::Noop,
    }
}
