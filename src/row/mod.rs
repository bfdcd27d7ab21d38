//! Row storage and the render model
//!
//! ## row/ Invariants
//!
//! - `raw` never contains a newline byte.
//! - `rendered` is `raw` with every tab expanded to spaces up to the next tab stop.
//! - `highlight.len() == rendered.len()` after every update.
//! - `rendered` and `highlight` are rebuilt together by `Row::update`; callers
//!   that mutate `raw` must call it before the row is observed again.
//! - Byte offsets past the end of `raw` are clamped, never read.

use crate::syntax::{self, Highlight, LanguageRules};

/// Column width of one byte of `raw` starting at rendered column `rx`
///
/// A tab stop of 0 counts as 1.
#[inline]
fn byte_width(byte: u8, rx: usize, tab_stop: usize) -> usize {
    if byte == b'\t' {
        let tab_stop = tab_stop.max(1);
        tab_stop - rx % tab_stop
    } else {
        1
    }
}

/// One stored line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position of this row in its document
    pub idx: usize,
    raw: Vec<u8>,
    rendered: Vec<u8>,
    highlight: Vec<Highlight>,
    /// An unterminated block comment is open at the end of this row
    continues_block_comment: bool,
}

impl Row {
    /// Create a row with derived data already computed (no syntax rules)
    #[must_use]
    pub fn new(idx: usize, bytes: &[u8], tab_stop: usize) -> Self {
        let mut row = Row {
            idx,
            raw: bytes.to_vec(),
            rendered: Vec::new(),
            highlight: Vec::new(),
            continues_block_comment: false,
        };
        row.update(tab_stop, None, false);
        row
    }

    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    #[must_use]
    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    #[must_use]
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Length of `raw` in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Length of `rendered` in columns
    #[must_use]
    pub fn rsize(&self) -> usize {
        self.rendered.len()
    }

    #[must_use]
    pub fn continues_block_comment(&self) -> bool {
        self.continues_block_comment
    }

    /// Rendered column of raw offset `cx`
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let cx = cx.min(self.raw.len());
        self.raw[..cx]
            .iter()
            .fold(0, |rx, &b| rx + byte_width(b, rx, tab_stop))
    }

    /// Raw offset of the byte covering rendered column `rx`
    ///
    /// Returns `size()` when `rx` lies past the end of the row.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &b) in self.raw.iter().enumerate() {
            cur_rx += byte_width(b, cur_rx, tab_stop);
            if cur_rx > rx {
                return cx;
            }
        }
        self.raw.len()
    }

    /// Rebuild `rendered` from `raw`
    pub(crate) fn update_render(&mut self, tab_stop: usize) {
        let mut rendered = Vec::with_capacity(self.raw.len());
        for &b in &self.raw {
            if b == b'\t' {
                let width = byte_width(b, rendered.len(), tab_stop);
                rendered.resize(rendered.len() + width, b' ');
            } else {
                rendered.push(b);
            }
        }
        self.rendered = rendered;
    }

    /// Re-run the highlighter over `rendered`
    ///
    /// Returns true when the open-block-comment state at the end of the row changed,
    /// meaning the following row must be highlighted again.
    pub(crate) fn update_syntax(&mut self, rules: Option<&LanguageRules>, starts_in_comment: bool) -> bool {
        let open = syntax::highlight_line(&self.rendered, rules, starts_in_comment, &mut self.highlight);
        let changed = open != self.continues_block_comment;
        self.continues_block_comment = open;
        changed
    }

    /// Rebuild both derived representations
    pub(crate) fn update(&mut self, tab_stop: usize, rules: Option<&LanguageRules>, starts_in_comment: bool) -> bool {
        self.update_render(tab_stop);
        self.update_syntax(rules, starts_in_comment)
    }

    /// Replace the highlight tags of `range` with `class` (clamped to the row)
    pub(crate) fn overlay_highlight(&mut self, start: usize, len: usize, class: Highlight) {
        let start = start.min(self.highlight.len());
        let end = start.saturating_add(len).min(self.highlight.len());
        self.highlight[start..end].fill(class);
    }

    /// Put back a previously captured highlight array of the same length
    pub(crate) fn restore_highlight(&mut self, saved: Vec<Highlight>) {
        if saved.len() == self.rendered.len() {
            self.highlight = saved;
        }
    }

    // Raw mutations below leave derived data stale; the document refreshes it.

    /// Insert one byte; `at` past the end appends
    pub(crate) fn insert_byte(&mut self, at: usize, byte: u8) {
        let at = at.min(self.raw.len());
        self.raw.insert(at, byte);
    }

    /// Remove the byte at `at`; returns false when `at` is out of range
    pub(crate) fn delete_byte(&mut self, at: usize) -> bool {
        if at < self.raw.len() {
            self.raw.remove(at);
            true
        } else {
            false
        }
    }

    /// Insert a byte string; `at` past the end appends
    pub(crate) fn insert_bytes(&mut self, at: usize, bytes: &[u8]) {
        let at = at.min(self.raw.len());
        self.raw.splice(at..at, bytes.iter().copied());
    }

    /// Cut the row at `at`, returning the tail
    pub(crate) fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.raw.len());
        self.raw.split_off(at)
    }
}
