//! Global constants for the Flit editor

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ui {
    /// Display text for documents with no file path
    pub const NO_NAME: &str = "[No Name]";

    /// Status bar marker for documents with unsaved changes
    pub const MODIFIED: &str = "(modified)";

    /// Status bar language label when no rule set is active
    pub const NO_FILETYPE: &str = "no ft";

    /// Filler drawn on screen rows past the end of the document
    pub const EMPTY_ROW: &str = "~";

    pub const HELP: &str = "HELP: Ctrl-S save | Ctrl-Q quit | Ctrl-F find | Ctrl-B select";

    /// Longest filename shown in the status bar
    pub const MAX_STATUS_NAME: usize = 20;

    pub fn welcome() -> String {
        format!("Flit editor -- version {}", super::VERSION)
    }
}

pub mod prompts {
    /// Marker replaced by the text typed so far
    pub const INPUT: &str = "{}";
    pub const SAVE_AS: &str = "Save as: {} (ESC to cancel)";
    pub const SEARCH: &str = "Search: {} (Use ESC/Arrows/Enter)";
}

pub mod messages {
    pub const SAVE_ABORTED: &str = "Save aborted";
    pub const NO_SELECTION: &str = "No active selection";
    pub const CLIPBOARD_EMPTY: &str = "Clipboard is empty";
    pub const SELECTION_STARTED: &str = "Selection started";
    pub const SELECTION_CLEARED: &str = "Selection cleared";

    pub fn unsaved_quit(times: usize) -> String {
        format!("WARNING!!! File has unsaved changes. Press Ctrl-Q {times} more times to quit.")
    }

    pub fn bytes_written(n: usize) -> String {
        format!("{n} bytes written to disk")
    }

    pub fn no_match(query: &str) -> String {
        format!("No match for: {query}")
    }

    pub fn copied(n: usize) -> String {
        format!("Copied {n} bytes")
    }

    pub fn cut(n: usize) -> String {
        format!("Cut {n} bytes")
    }

    pub fn pasted(n: usize) -> String {
        format!("Pasted {n} bytes")
    }
}

pub mod errors {
    // Error Codes
    pub const LOAD_FAILED: &str = "LOAD_FAILED";
    pub const SAVE_FAILED: &str = "SAVE_FAILED";
    pub const READ_FAILED: &str = "READ_FAILED";
    pub const WRITE_FAILED: &str = "WRITE_FAILED";
    pub const TERMINAL_INIT: &str = "TERMINAL_INIT";
    pub const TERMINAL_SIZE: &str = "TERMINAL_SIZE";
    pub const CURSOR_REPORT: &str = "CURSOR_REPORT";
    pub const NO_SELECTION: &str = "NO_SELECTION";
    pub const CLIPBOARD_EMPTY: &str = "CLIPBOARD_EMPTY";
    pub const SETTING_VALUE: &str = "SETTING_VALUE";
    pub const SETTING_RANGE: &str = "SETTING_RANGE";
    pub const UNKNOWN_SETTING: &str = "UNKNOWN_SETTING";
}

pub mod defaults {
    /// Columns between tab stops
    pub const TAB_STOP: usize = 8;
    /// Extra Ctrl-Q presses needed to quit with unsaved changes
    pub const QUIT_TIMES: usize = 3;
    /// Seconds a status message stays visible
    pub const MESSAGE_TIMEOUT: u64 = 5;
    /// Bounded wait for one input byte, in milliseconds
    pub const READ_TIMEOUT_MS: i32 = 100;
    /// Minimum digits reserved for the line number gutter
    pub const GUTTER_MIN_DIGITS: usize = 3;
}

pub mod env {
    /// Path of the log file; logging is off when unset
    pub const LOG_FILE: &str = "FLIT_LOG";
    /// `EnvFilter` directive for the log file
    pub const LOG_LEVEL: &str = "FLIT_LOG_LEVEL";
    /// Comma separated `name=value` option list
    pub const OPTIONS: &str = "FLIT_OPTIONS";
}
