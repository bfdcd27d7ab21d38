//! Status bar and transient message
//!
//! ## status/ Invariants
//!
//! - Status content is derived entirely from editor state.
//! - Status rendering does not influence editor behavior.
//! - A message stops rendering once it is older than the configured timeout.

use crate::constants::ui;
use crate::document::Document;
use crate::error::ErrorSeverity;
use std::time::{Duration, Instant};

/// Kind of status message, which picks its color on the message bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

impl From<ErrorSeverity> for MessageKind {
    fn from(severity: ErrorSeverity) -> Self {
        match severity {
            ErrorSeverity::Warning => MessageKind::Warning,
            ErrorSeverity::Error | ErrorSeverity::Fatal => MessageKind::Error,
        }
    }
}

/// The single transient message line
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
    /// When the message was set
    pub timestamp: Instant,
}

impl StatusMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp: Instant::now(),
        }
    }

    /// Whether the message should still be drawn at `now`
    #[must_use]
    pub fn is_visible(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.timestamp) < ttl
    }
}

/// Status bar text
pub struct StatusBar;

impl StatusBar {
    /// `NAME - N lines (modified)`, with the name cut to a fixed width
    #[must_use]
    pub fn left(doc: &Document) -> String {
        let name: String = doc.display_name().chars().take(ui::MAX_STATUS_NAME).collect();
        let mut text = format!("{name} - {} lines", doc.num_rows());
        if doc.is_dirty() {
            text.push(' ');
            text.push_str(ui::MODIFIED);
        }
        text
    }

    /// `LANG | line/total`
    #[must_use]
    pub fn right(doc: &Document, cy: usize) -> String {
        let lang = doc.syntax().map_or(ui::NO_FILETYPE, |rules| rules.name);
        format!("{lang} | {}/{}", cy + 1, doc.num_rows())
    }

    /// Lay out the bar across `width` columns: left text, padding, right text
    ///
    /// The right text is dropped when both do not fit.
    #[must_use]
    pub fn compose(doc: &Document, cy: usize, width: usize) -> Vec<u8> {
        let left = Self::left(doc);
        let right = Self::right(doc, cy);
        let mut out: Vec<u8> = left.bytes().take(width).collect();
        if out.len() + right.len() <= width {
            out.resize(width - right.len(), b' ');
            out.extend_from_slice(right.as_bytes());
        } else {
            out.resize(width, b' ');
        }
        out
    }
}
