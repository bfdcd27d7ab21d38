//! Incremental search
//!
//! Plain substring search over each row's rendered text, re-run on every
//! keystroke of the search prompt.
//!
//! ## search/ Invariants
//!
//! - The scan is circular and visits every row once. Arrow keys start one row
//!   past the last match; editing the query starts on the last match row itself.
//! - At most one row carries `Highlight::Match` tags, and its previous tags are
//!   restored before the next scan and when the prompt closes.
//! - Cancelling puts the cursor and scroll position back where they were.

use crate::cursor::Position;
use crate::document::Document;
use crate::editor::PromptHandler;
use crate::key::Key;
use crate::state::EditorState;
use crate::syntax::Highlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// A hit: row index and offset into the rendered row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub row: usize,
    pub offset: usize,
}

/// First occurrence of `needle` in `haystack`
#[must_use]
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn step(row: usize, direction: SearchDirection, num_rows: usize) -> usize {
    match direction {
        SearchDirection::Forward => (row + 1) % num_rows,
        SearchDirection::Backward => row.checked_sub(1).unwrap_or(num_rows - 1),
    }
}

/// Scan rows circularly, beginning with row `start` itself
#[must_use]
pub fn find_from(
    doc: &Document,
    needle: &[u8],
    start: usize,
    direction: SearchDirection,
) -> Option<SearchMatch> {
    let num_rows = doc.num_rows();
    if num_rows == 0 || needle.is_empty() {
        return None;
    }

    let mut current = start % num_rows;
    for _ in 0..num_rows {
        let row = doc.row(current)?;
        if let Some(offset) = find_bytes(row.rendered(), needle) {
            return Some(SearchMatch {
                row: current,
                offset,
            });
        }
        current = step(current, direction, num_rows);
    }
    None
}

/// Scan rows circularly starting next to `last_match`
///
/// With no previous match the scan starts at the first row.
#[must_use]
pub fn find_next(
    doc: &Document,
    needle: &[u8],
    last_match: Option<usize>,
    direction: SearchDirection,
) -> Option<SearchMatch> {
    let num_rows = doc.num_rows();
    if num_rows == 0 {
        return None;
    }
    match last_match {
        Some(row) => find_from(doc, needle, step(row % num_rows, direction, num_rows), direction),
        None => find_from(doc, needle, 0, SearchDirection::Forward),
    }
}

/// Per-keystroke search behaviour for the search prompt
#[derive(Debug, Clone)]
pub struct IncrementalSearch {
    last_match: Option<usize>,
    direction: SearchDirection,
    /// Row whose tags were replaced by the match overlay, and its old tags
    saved_highlight: Option<(usize, Vec<Highlight>)>,
    /// Whether the latest scan found anything
    matched: bool,
    saved_cursor: Position,
    saved_scroll: (usize, usize),
}

impl IncrementalSearch {
    /// Remember where the search started
    #[must_use]
    pub fn new(state: &EditorState) -> Self {
        IncrementalSearch {
            last_match: None,
            direction: SearchDirection::Forward,
            saved_highlight: None,
            matched: false,
            saved_cursor: state.cursor.position(),
            saved_scroll: state.viewport.get_scroll(),
        }
    }

    /// Whether the most recent keystroke found a match
    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Put the cursor and scroll position back to where the search began
    pub fn restore(&self, state: &mut EditorState) {
        state.cursor.set_position(self.saved_cursor);
        let (row_offset, col_offset) = self.saved_scroll;
        state.viewport.set_scroll(row_offset, col_offset);
    }
}

impl PromptHandler for IncrementalSearch {
    fn on_update(&mut self, state: &mut EditorState, query: &str, key: Key) {
        if let Some((row, saved)) = self.saved_highlight.take() {
            state.document.restore_highlight(row, saved);
        }

        match key {
            Key::Enter | Key::Escape => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
                return;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = SearchDirection::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = SearchDirection::Backward,
            _ => self.direction = SearchDirection::Forward,
        }
        let stepping = matches!(
            key,
            Key::ArrowRight | Key::ArrowDown | Key::ArrowLeft | Key::ArrowUp
        );

        if query.is_empty() {
            self.matched = false;
            return;
        }

        let needle = query.as_bytes();
        let found = match self.last_match {
            // An edited query is tried on the current match row first
            Some(row) if !stepping => find_from(&state.document, needle, row, self.direction),
            last => find_next(&state.document, needle, last, self.direction),
        };
        self.matched = found.is_some();
        let Some(hit) = found else {
            tracing::trace!(query, "no match");
            return;
        };
        tracing::debug!(row = hit.row, offset = hit.offset, "search hit");

        self.last_match = Some(hit.row);
        let doc = &state.document;
        state.cursor.cy = hit.row;
        state.cursor.cx = doc
            .row(hit.row)
            .map_or(0, |row| row.rx_to_cx(hit.offset, doc.tab_stop()));
        // Push the viewport past the end so the next scroll brings the hit to the top
        let col_offset = state.viewport.col_offset();
        state.viewport.set_scroll(doc.num_rows(), col_offset);

        self.saved_highlight = state
            .document
            .overlay_match(hit.row, hit.offset, query.len())
            .map(|saved| (hit.row, saved));
    }
}
