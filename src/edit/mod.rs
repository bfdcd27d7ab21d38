//! Cursor-level editing primitives
//!
//! Shared by key dispatch, cut and paste so that every path mutates the
//! document the same way.

use crate::cursor::Cursor;
use crate::document::Document;

/// Insert `ch` at the cursor and advance past it
///
/// On the virtual row past the end a new row is appended first.
pub fn insert_char(doc: &mut Document, cursor: &mut Cursor, ch: u8) {
    cursor.clamp(doc);
    if cursor.cy == doc.num_rows() {
        doc.insert_row(doc.num_rows(), b"");
    }
    if doc.insert_char(cursor.cy, cursor.cx, ch) {
        cursor.cx += 1;
    }
}

/// Break the row at the cursor and move to the start of the new row
pub fn insert_newline(doc: &mut Document, cursor: &mut Cursor) {
    cursor.clamp(doc);
    if cursor.cy == doc.num_rows() {
        doc.insert_row(cursor.cy, b"");
    } else {
        doc.split_row(cursor.cy, cursor.cx);
    }
    cursor.cy += 1;
    cursor.cx = 0;
}

/// Delete the byte before the cursor, joining with the previous row at column 0
///
/// Returns false when there is nothing to delete.
pub fn delete_char(doc: &mut Document, cursor: &mut Cursor) -> bool {
    cursor.clamp(doc);
    if cursor.cy == doc.num_rows() || (cursor.cx == 0 && cursor.cy == 0) {
        return false;
    }
    if cursor.cx > 0 {
        cursor.cx -= 1;
        doc.delete_char(cursor.cy, cursor.cx)
    } else {
        cursor.cx = doc.row_size(cursor.cy - 1);
        cursor.cy -= 1;
        doc.join_with_next(cursor.cy)
    }
}

/// Delete the byte under the cursor
pub fn delete_forward(doc: &mut Document, cursor: &mut Cursor) -> bool {
    cursor.clamp(doc);
    let at_row_end = cursor.cx >= doc.row_size(cursor.cy);
    if cursor.cy >= doc.num_rows() || (at_row_end && cursor.cy + 1 >= doc.num_rows()) {
        return false;
    }
    if at_row_end {
        doc.join_with_next(cursor.cy)
    } else {
        doc.delete_char(cursor.cy, cursor.cx)
    }
}
