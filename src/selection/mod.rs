//! Selection and clipboard
//!
//! ## selection/ Invariants
//!
//! - A selection is an anchor plus the live cursor; the normalized span is
//!   recomputed from both on every use and never cached.
//! - Normalized endpoints are valid positions in the current document.
//! - `Span::len` counts one byte per row boundary crossed and always equals
//!   `Span::bytes(..).len()`, which is also the number of backward deletes `cut` performs.
//! - The clipboard is replaced wholesale on copy and cut, never edited in place.

use crate::constants::errors;
use crate::cursor::{Cursor, Position};
use crate::document::Document;
use crate::edit;
use crate::error::{ErrorKind, FlitError, Result};

/// The selection anchor; the other end is always the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    anchor: Option<Position>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Start selecting from `at`
    pub fn start(&mut self, at: Position) {
        self.anchor = Some(at);
    }

    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// Start a selection at `at` or clear the active one; returns the new state
    pub fn toggle(&mut self, at: Position) -> bool {
        if self.anchor.take().is_none() {
            self.anchor = Some(at);
        }
        self.is_active()
    }

    /// Ordered span between the anchor and `cursor`, clamped into `doc`
    #[must_use]
    pub fn normalized(&self, cursor: Position, doc: &Document) -> Option<Span> {
        let anchor = clamp_position(self.anchor?, doc);
        let cursor = clamp_position(cursor, doc);
        let (start, end) = if (anchor.y, anchor.x) <= (cursor.y, cursor.x) {
            (anchor, cursor)
        } else {
            (cursor, anchor)
        };
        Some(Span { start, end })
    }
}

/// Clamp a position onto real text; the virtual row maps to the end of the last row
fn clamp_position(pos: Position, doc: &Document) -> Position {
    let num_rows = doc.num_rows();
    if num_rows == 0 {
        return Position::default();
    }
    if pos.y >= num_rows {
        return Position::new(doc.row_size(num_rows - 1), num_rows - 1);
    }
    Position::new(pos.x.min(doc.row_size(pos.y)), pos.y)
}

/// A normalized selection, `start <= end` in reading order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Number of bytes spanned, counting one newline per row boundary
    #[must_use]
    pub fn len(&self, doc: &Document) -> usize {
        if self.start.y == self.end.y {
            return self.end.x - self.start.x;
        }
        let first = doc.row_size(self.start.y) - self.start.x;
        let middle: usize = (self.start.y + 1..self.end.y)
            .map(|y| doc.row_size(y) + 1)
            .sum();
        first + 1 + middle + self.end.x
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The spanned text with crossed rows joined by `\n`
    #[must_use]
    pub fn bytes(&self, doc: &Document) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len(doc));
        for y in self.start.y..=self.end.y {
            let Some(row) = doc.row(y) else { break };
            let from = if y == self.start.y { self.start.x } else { 0 };
            let to = if y == self.end.y { self.end.x } else { row.size() };
            out.extend_from_slice(&row.raw()[from..to]);
            if y != self.end.y {
                out.push(b'\n');
            }
        }
        out
    }

    /// Raw column range of row `y` covered by the span
    ///
    /// Rows in the middle of a multi-row span are covered to their end.
    #[must_use]
    pub fn columns_on_row(&self, y: usize, doc: &Document) -> Option<(usize, usize)> {
        if y < self.start.y || y > self.end.y {
            return None;
        }
        let from = if y == self.start.y { self.start.x } else { 0 };
        let to = if y == self.end.y { self.end.x } else { doc.row_size(y) };
        Some((from, to))
    }

    /// Rows touched by the span
    #[must_use]
    pub fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.start.y..=self.end.y
    }
}

/// Owned copy buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    data: Vec<u8>,
}

impl Clipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents
    pub fn set(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn no_selection() -> FlitError {
    FlitError::warning(ErrorKind::Selection, errors::NO_SELECTION, crate::constants::messages::NO_SELECTION)
}

/// Copy the selected text into the clipboard and end the selection
///
/// Returns the number of bytes copied.
pub fn copy(
    doc: &Document,
    cursor: &Cursor,
    selection: &mut Selection,
    clipboard: &mut Clipboard,
) -> Result<usize> {
    let span = selection
        .normalized(cursor.position(), doc)
        .ok_or_else(no_selection)?;
    clipboard.set(span.bytes(doc));
    selection.clear();
    Ok(clipboard.len())
}

/// Remove the selected text, leaving the cursor at its start
///
/// The cursor is moved to the end of the span and the span is erased with
/// ordinary backward deletes. Returns the number of bytes removed.
pub fn delete_selection(doc: &mut Document, cursor: &mut Cursor, selection: &mut Selection) -> usize {
    let Some(span) = selection.normalized(cursor.position(), doc) else {
        return 0;
    };
    selection.clear();
    let count = span.len(doc);
    cursor.set_position(span.end);
    for _ in 0..count {
        edit::delete_char(doc, cursor);
    }
    count
}

/// Copy the selected text into the clipboard, then delete it
pub fn cut(
    doc: &mut Document,
    cursor: &mut Cursor,
    selection: &mut Selection,
    clipboard: &mut Clipboard,
) -> Result<usize> {
    let span = selection
        .normalized(cursor.position(), doc)
        .ok_or_else(no_selection)?;
    clipboard.set(span.bytes(doc));
    Ok(delete_selection(doc, cursor, selection))
}

/// Insert the clipboard at the cursor, replacing an active selection
///
/// `\n` splits the row; every other byte is inserted as-is.
pub fn paste(
    doc: &mut Document,
    cursor: &mut Cursor,
    selection: &mut Selection,
    clipboard: &Clipboard,
) -> Result<usize> {
    if clipboard.is_empty() {
        return Err(FlitError::warning(
            ErrorKind::Selection,
            errors::CLIPBOARD_EMPTY,
            crate::constants::messages::CLIPBOARD_EMPTY,
        ));
    }
    delete_selection(doc, cursor, selection);
    for &b in clipboard.contents() {
        if b == b'\n' {
            edit::insert_newline(doc, cursor);
        } else {
            edit::insert_char(doc, cursor, b);
        }
    }
    Ok(clipboard.len())
}

/// Insert a leading tab on every selected row
///
/// The selection stays active and both ends shift right with their text.
pub fn indent(doc: &mut Document, cursor: &mut Cursor, selection: &mut Selection) -> Result<usize> {
    let span = selection
        .normalized(cursor.position(), doc)
        .ok_or_else(no_selection)?;
    let mut changed = 0;
    for y in span.rows() {
        if doc.insert_char(y, 0, b'\t') {
            changed += 1;
        }
    }
    shift_ends(doc, cursor, selection, span, |_| true, |x| x + 1);
    Ok(changed)
}

/// Remove one leading tab from every selected row that has one
pub fn unindent(doc: &mut Document, cursor: &mut Cursor, selection: &mut Selection) -> Result<usize> {
    let span = selection
        .normalized(cursor.position(), doc)
        .ok_or_else(no_selection)?;
    let mut touched = Vec::new();
    for y in span.rows() {
        let starts_with_tab = doc.row(y).is_some_and(|r| r.raw().first() == Some(&b'\t'));
        if starts_with_tab && doc.delete_char(y, 0) {
            touched.push(y);
        }
    }
    shift_ends(doc, cursor, selection, span, |y| touched.contains(&y), |x| x.saturating_sub(1));
    Ok(touched.len())
}

/// Move the anchor and cursor along with the text of rows `shifted` reports
fn shift_ends(
    doc: &Document,
    cursor: &mut Cursor,
    selection: &mut Selection,
    span: Span,
    shifted: impl Fn(usize) -> bool,
    shift: impl Fn(usize) -> usize,
) {
    let move_pos = |pos: Position| {
        if span.rows().contains(&pos.y) && shifted(pos.y) {
            Position::new(shift(pos.x).min(doc.row_size(pos.y)), pos.y)
        } else {
            pos
        }
    };
    if let Some(anchor) = selection.anchor() {
        selection.start(move_pos(anchor));
    }
    cursor.set_position(move_pos(cursor.position()));
}
