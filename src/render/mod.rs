//! Screen compositor
//! Builds one terminal frame as a single byte buffer

/// ## render/ Invariants
///
/// - Rendering reads editor state only and never mutates it.
/// - Rendering performs no input handling.
/// - `scroll` must run before `draw_frame`; rendering tolerates stale offsets but never corrects them.
/// - A frame is one buffer written in one call; the cursor is hidden while it is drawn.
/// - Consecutive bytes of one display class share a single color escape.
/// - Displayed cursor position always matches the session cursor.
use crate::constants::ui;
use crate::document::Document;
use crate::row::Row;
use crate::selection::Span;
use crate::state::EditorState;
use crate::status::{MessageKind, StatusBar};
use crate::syntax::Highlight;
use crate::term::ansi;
use std::time::Instant;

/// SGR foreground code for a display class
#[must_use]
pub fn color_code(hl: Highlight) -> u8 {
    match hl {
        Highlight::Comment | Highlight::BlockComment => 36,
        Highlight::Keyword => 33,
        Highlight::KeywordSecondary => 32,
        Highlight::String => 35,
        Highlight::Number => 31,
        Highlight::Match => 34,
        Highlight::Normal => 37,
    }
}

/// Compose a complete frame for the current state
#[must_use]
pub fn draw_frame(state: &EditorState, now: Instant) -> Vec<u8> {
    let screen_cols = state.viewport.screen_cols();
    let mut out = Vec::with_capacity((state.viewport.screen_rows() + 2) * (screen_cols + 16));

    push(&mut out, ansi::HIDE_CURSOR);
    push(&mut out, ansi::RESET_CURSOR);

    draw_rows(state, &mut out);
    draw_status_bar(state, &mut out);
    draw_message_bar(state, now, &mut out);

    let vp = &state.viewport;
    let row = state.cursor.cy.saturating_sub(vp.row_offset());
    let col = state.cursor.rx.saturating_sub(vp.col_offset()) + state.gutter_width();
    push(&mut out, &ansi::format_cursor_position(row, col));
    push(&mut out, ansi::SHOW_CURSOR);
    out
}

fn push(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
}

fn draw_rows(state: &EditorState, out: &mut Vec<u8>) {
    let doc = &state.document;
    let vp = &state.viewport;
    let gutter = state.gutter_width();
    let text_cols = vp.text_cols(gutter);
    let span = state.selection.normalized(state.cursor.position(), doc);

    for y in 0..vp.screen_rows() {
        let filerow = y + vp.row_offset();
        match doc.row(filerow) {
            Some(row) => {
                if gutter > 0 {
                    push(out, &format!("{:>width$} ", filerow + 1, width = gutter - 1));
                }
                let selected = span.and_then(|s| selected_columns(&s, row, doc));
                draw_row(row, vp.col_offset(), text_cols, selected, out);
            }
            None => {
                // Filler rows keep the text column aligned with numbered rows
                out.resize(out.len() + gutter, b' ');
                if doc.num_rows() == 0 && y == vp.screen_rows() / 3 {
                    draw_welcome(text_cols, out);
                } else {
                    push(out, ui::EMPTY_ROW);
                }
            }
        }
        push(out, ansi::CLEAR_TO_EOL);
        push(out, "\r\n");
    }
}

fn draw_welcome(cols: usize, out: &mut Vec<u8>) {
    let welcome = ui::welcome();
    let len = welcome.len().min(cols);
    let mut padding = (cols - len) / 2;
    if padding > 0 {
        push(out, ui::EMPTY_ROW);
        padding -= 1;
    }
    out.resize(out.len() + padding, b' ');
    out.extend_from_slice(&welcome.as_bytes()[..len]);
}

/// Rendered column range of `row` covered by the selection
fn selected_columns(span: &Span, row: &Row, doc: &Document) -> Option<(usize, usize)> {
    let (from, to) = span.columns_on_row(row.idx, doc)?;
    let tab_stop = doc.tab_stop();
    Some((row.cx_to_rx(from, tab_stop), row.cx_to_rx(to, tab_stop)))
}

/// Draw the visible slice of one row with colors and selection background
fn draw_row(
    row: &Row,
    col_offset: usize,
    text_cols: usize,
    selected: Option<(usize, usize)>,
    out: &mut Vec<u8>,
) {
    let start = col_offset.min(row.rsize());
    let end = col_offset.saturating_add(text_cols).min(row.rsize());
    let text = &row.rendered()[start..end];
    let hl = &row.highlight()[start..end];

    let mut current_color: Option<u8> = None;
    let mut in_selection = false;

    for (i, (&c, &class)) in text.iter().zip(hl).enumerate() {
        let rx = start + i;
        let is_selected = selected.is_some_and(|(s, e)| rx >= s && rx < e);
        if is_selected != in_selection {
            push(out, if is_selected { ansi::SELECTION_BG } else { ansi::DEFAULT_BG });
            in_selection = is_selected;
        }

        if c.is_ascii_control() {
            let sym = if c <= 26 { b'@' + c } else { b'?' };
            push(out, ansi::REVERSE_VIDEO);
            out.push(sym);
            // The reset drops every attribute; put back the ones still in effect
            push(out, ansi::RESET_ATTRIBUTES);
            if let Some(color) = current_color {
                push(out, &ansi::format_foreground(color));
            }
            if in_selection {
                push(out, ansi::SELECTION_BG);
            }
        } else if class == Highlight::Normal {
            if current_color.take().is_some() {
                push(out, ansi::DEFAULT_FG);
            }
            out.push(c);
        } else {
            let color = color_code(class);
            if current_color != Some(color) {
                current_color = Some(color);
                push(out, &ansi::format_foreground(color));
            }
            out.push(c);
        }
    }

    if in_selection {
        push(out, ansi::DEFAULT_BG);
    }
    push(out, ansi::DEFAULT_FG);
}

fn draw_status_bar(state: &EditorState, out: &mut Vec<u8>) {
    push(out, ansi::REVERSE_VIDEO);
    out.extend_from_slice(&StatusBar::compose(
        &state.document,
        state.cursor.cy,
        state.viewport.screen_cols(),
    ));
    push(out, ansi::RESET_ATTRIBUTES);
    push(out, "\r\n");
}

/// SGR foreground code for a message, `None` for plain text
fn message_color(kind: MessageKind) -> Option<u8> {
    match kind {
        MessageKind::Info => None,
        MessageKind::Warning => Some(33),
        MessageKind::Error => Some(31),
    }
}

fn draw_message_bar(state: &EditorState, now: Instant, out: &mut Vec<u8>) {
    push(out, ansi::CLEAR_TO_EOL);
    let Some(message) = state.visible_message(now) else {
        return;
    };
    let len = message.text.len().min(state.viewport.screen_cols());
    let color = message_color(message.kind);
    if let Some(code) = color {
        push(out, &ansi::format_foreground(code));
    }
    out.extend_from_slice(&message.text.as_bytes()[..len]);
    if color.is_some() {
        push(out, ansi::DEFAULT_FG);
    }
}
