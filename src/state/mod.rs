//! Editor session state
//! Everything one editing session owns, passed explicitly to every operation

/// ## state/ Invariants
///
/// - There is exactly one document per session.
/// - The selection anchor and the cursor both refer to positions in `document`.
/// - `scroll` runs before every frame and is the only place `cursor.rx` is refreshed.
/// - State changes are observable by the renderer but never influenced by it.
use crate::cursor::Cursor;
use crate::document::Document;
use crate::error::{ErrorSeverity, FlitError};
use crate::selection::{Clipboard, Selection};
use crate::settings::EditorOptions;
use crate::status::{MessageKind, StatusMessage};
use crate::viewport::Viewport;
use std::time::Instant;

/// Minimum width of the line number column, in digits
const GUTTER_MIN_DIGITS: usize = crate::constants::defaults::GUTTER_MIN_DIGITS;

pub struct EditorState {
    pub document: Document,
    pub cursor: Cursor,
    pub viewport: Viewport,
    pub selection: Selection,
    pub clipboard: Clipboard,
    pub options: EditorOptions,
    message: Option<StatusMessage>,
}

impl EditorState {
    #[must_use]
    pub fn new(document: Document, options: EditorOptions, term_rows: usize, term_cols: usize) -> Self {
        EditorState {
            document,
            cursor: Cursor::new(),
            viewport: Viewport::new(term_rows, term_cols),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            options,
            message: None,
        }
    }

    /// Show an informational message
    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::new(MessageKind::Info, text));
    }

    /// Show a recoverable failure to the user
    pub fn report(&mut self, err: &FlitError) {
        match err.severity {
            ErrorSeverity::Warning => tracing::warn!(code = err.code, kind = %err.kind, "{}", err.message),
            ErrorSeverity::Error | ErrorSeverity::Fatal => {
                tracing::error!(code = err.code, kind = %err.kind, "{}", err.message)
            }
        }
        self.message = Some(StatusMessage::new(err.severity.into(), err.message.clone()));
    }

    #[must_use]
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// The message if it is still young enough to draw
    #[must_use]
    pub fn visible_message(&self, now: Instant) -> Option<&StatusMessage> {
        self.message
            .as_ref()
            .filter(|m| m.is_visible(now, self.options.message_ttl()))
    }

    /// Columns taken by the line number gutter, 0 when it is off
    #[must_use]
    pub fn gutter_width(&self) -> usize {
        if !self.options.line_numbers {
            return 0;
        }
        let digits = self.document.num_rows().max(1).ilog10() as usize + 1;
        digits.max(GUTTER_MIN_DIGITS) + 1
    }

    /// Clamp the cursor, refresh `rx` and move the viewport to keep it visible
    pub fn scroll(&mut self) {
        self.cursor.clamp(&self.document);
        self.cursor.update_rx(&self.document);
        let gutter = self.gutter_width();
        self.viewport.scroll(self.cursor.cy, self.cursor.rx, gutter);
    }

    /// Terminal rows and columns the viewport was built for
    pub fn resize(&mut self, term_rows: usize, term_cols: usize) {
        let (row_offset, col_offset) = self.viewport.get_scroll();
        self.viewport = Viewport::new(term_rows, term_cols);
        self.viewport.set_scroll(row_offset, col_offset);
    }
}
