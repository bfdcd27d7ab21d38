//! ANSI escape sequences for terminal control
//! The whole output protocol of the compositor

pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const RESET_CURSOR: &str = "\x1b[H";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const CLEAR_TO_EOL: &str = "\x1b[K";
pub const REVERSE_VIDEO: &str = "\x1b[7m";
pub const RESET_ATTRIBUTES: &str = "\x1b[m";
/// Default foreground color
pub const DEFAULT_FG: &str = "\x1b[39m";
/// Background used for selected text
pub const SELECTION_BG: &str = "\x1b[44m";
pub const DEFAULT_BG: &str = "\x1b[49m";
/// Push the cursor as far right and down as the terminal allows
pub const CURSOR_TO_BOTTOM_RIGHT: &str = "\x1b[999C\x1b[999B";
/// Ask for a cursor position report (`ESC [ rows ; cols R`)
pub const REQUEST_CURSOR_POSITION: &str = "\x1b[6n";

/// Format cursor position escape sequence (0-indexed input)
#[must_use]
pub fn format_cursor_position(row: usize, col: usize) -> String {
    format!("\x1b[{};{}H", row + 1, col + 1)
}

/// SGR foreground color sequence for `code` (30 to 39)
#[must_use]
pub fn format_foreground(code: u8) -> String {
    format!("\x1b[{code}m")
}
