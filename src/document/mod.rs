//! Document: the row store
//!
//! ## document/ Invariants
//!
//! - Rows are addressed densely as `0..num_rows()` and each row's `idx` equals its position.
//! - Every mutation refreshes `rendered` and `highlight` of the touched rows before returning.
//! - A change in a row's open-block-comment state re-highlights the rows after it
//!   until the state stops changing.
//! - Out-of-range rows are ignored and out-of-range columns are clamped; nothing panics.
//! - Every successful mutation bumps the dirty counter; load and save reset it.

use crate::constants::{errors, ui};
use crate::error::{ErrorKind, FlitError, Result};
use crate::row::Row;
use crate::settings::EditorOptions;
use crate::syntax::{self, Highlight, LanguageRules};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An ordered sequence of rows plus file metadata
#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    /// Number of edits since the last load or save
    dirty: usize,
    file_path: Option<PathBuf>,
    syntax: Option<&'static LanguageRules>,
    syntax_enabled: bool,
    tab_stop: usize,
}

impl Document {
    /// Create a new empty document
    #[must_use]
    pub fn new(options: &EditorOptions) -> Self {
        Document {
            rows: Vec::new(),
            dirty: 0,
            file_path: None,
            syntax: None,
            syntax_enabled: options.syntax,
            tab_stop: options.tab_stop.max(1),
        }
    }

    /// Build a document from file contents
    ///
    /// Lines are split on `\n`; trailing `\r` bytes are dropped. A final newline
    /// does not produce an extra empty row.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], options: &EditorOptions) -> Self {
        let mut doc = Self::new(options);
        if !bytes.is_empty() {
            let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
            for line in body.split(|&b| b == b'\n') {
                let end = line
                    .iter()
                    .rposition(|&b| b != b'\r' && b != b'\n')
                    .map_or(0, |i| i + 1);
                let idx = doc.rows.len();
                doc.rows.push(Row::new(idx, &line[..end], doc.tab_stop));
            }
        }
        doc.rehighlight_all();
        doc.dirty = 0;
        doc
    }

    /// Load document from file
    ///
    /// Failing to read a file requested at startup is fatal, so the error is fatal.
    pub fn open(path: impl AsRef<Path>, options: &EditorOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            FlitError::fatal(
                ErrorKind::File,
                errors::LOAD_FAILED,
                format!("{}: {e}", path.display()),
            )
        })?;

        let mut doc = Self::from_bytes(&bytes, options);
        doc.file_path = Some(path.to_path_buf());
        doc.select_syntax();
        tracing::info!(path = %path.display(), rows = doc.num_rows(), "opened file");
        Ok(doc)
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Raw length of row `at`, or 0 past the end
    #[must_use]
    pub fn row_size(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::size)
    }

    #[must_use]
    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Number of edits since the last load or save
    #[must_use]
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get display name for UI (filename or "[No Name]")
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(ui::NO_NAME)
    }

    /// Set the file path and pick the matching language rules
    pub fn set_path(&mut self, path: impl AsRef<Path>) {
        self.file_path = Some(path.as_ref().to_path_buf());
        self.select_syntax();
    }

    /// The active language rule set
    #[must_use]
    pub fn syntax(&self) -> Option<&'static LanguageRules> {
        self.syntax
    }

    /// Choose the language rule set from the filename and re-highlight every row
    pub fn select_syntax(&mut self) {
        let name = self
            .file_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        let rules = match name {
            Some(ref name) if self.syntax_enabled => syntax::select_rules(name),
            _ => None,
        };
        tracing::debug!(language = rules.map(|r| r.name), "selected syntax");
        self.set_syntax(rules);
    }

    /// Replace the language rule set and re-highlight every row
    pub fn set_syntax(&mut self, rules: Option<&'static LanguageRules>) {
        self.syntax = rules;
        self.rehighlight_all();
    }


    /// Insert a new row at `at`; `at == num_rows()` appends, larger values are ignored
    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) -> bool {
        if at > self.rows.len() {
            return false;
        }
        self.rows.insert(at, Row::new(at, bytes, self.tab_stop));
        self.renumber_from(at + 1);
        // The row below now starts from the new row's comment state
        self.rehighlight(at, at + 1);
        self.dirty += 1;
        true
    }

    /// Remove row `at`
    pub fn delete_row(&mut self, at: usize) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.rows.remove(at);
        self.renumber_from(at);
        // The row now at `at` may start in a different comment state
        self.rehighlight(at, at);
        self.dirty += 1;
        true
    }

    /// Insert one byte into row `row`; `at` past the end appends
    pub fn insert_char(&mut self, row: usize, at: usize, ch: u8) -> bool {
        let Some(r) = self.rows.get_mut(row) else {
            return false;
        };
        r.insert_byte(at, ch);
        self.update_row(row);
        self.dirty += 1;
        true
    }

    /// Remove the byte at `at` in row `row`
    pub fn delete_char(&mut self, row: usize, at: usize) -> bool {
        let Some(r) = self.rows.get_mut(row) else {
            return false;
        };
        if !r.delete_byte(at) {
            return false;
        }
        self.update_row(row);
        self.dirty += 1;
        true
    }

    /// Insert a byte string into row `row`; `at` past the end appends
    pub fn insert_string(&mut self, row: usize, at: usize, bytes: &[u8]) -> bool {
        let Some(r) = self.rows.get_mut(row) else {
            return false;
        };
        r.insert_bytes(at, bytes);
        self.update_row(row);
        self.dirty += 1;
        true
    }

    /// Append a byte string to the end of row `row`
    pub fn append_string(&mut self, row: usize, bytes: &[u8]) -> bool {
        self.insert_string(row, usize::MAX, bytes)
    }

    /// Break row `row` at `at`, moving the tail into a new row below it
    pub fn split_row(&mut self, row: usize, at: usize) -> bool {
        let Some(r) = self.rows.get_mut(row) else {
            return false;
        };
        let tail = r.split_off(at);
        self.update_row(row);
        self.insert_row(row + 1, &tail)
    }

    /// Append row `row + 1` to row `row` and remove it
    pub fn join_with_next(&mut self, row: usize) -> bool {
        if row + 1 >= self.rows.len() {
            return false;
        }
        let next = self.rows.remove(row + 1);
        self.renumber_from(row + 1);
        self.rows[row].insert_bytes(usize::MAX, next.raw());
        self.update_row(row);
        self.dirty += 1;
        true
    }

    /// Serialize every row followed by `\n`
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = self.rows.iter().map(|r| r.size() + 1).sum();
        let mut buf = Vec::with_capacity(len);
        for row in &self.rows {
            buf.extend_from_slice(row.raw());
            buf.push(b'\n');
        }
        buf
    }

    /// Save document to its current path, returning the number of bytes written
    ///
    /// On failure the document, including its dirty counter, is left unchanged.
    pub fn save(&mut self) -> Result<usize> {
        let path = self.file_path.clone().ok_or_else(|| {
            FlitError::error(ErrorKind::File, errors::SAVE_FAILED, "No file name")
        })?;
        let buf = self.to_bytes();

        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)?;
            file.set_len(buf.len() as u64)?;
            file.write_all(&buf)?;
            Ok(())
        };

        if let Err(e) = write() {
            tracing::warn!(path = %path.display(), error = %e, "save failed");
            return Err(FlitError::error(
                ErrorKind::File,
                errors::SAVE_FAILED,
                format!("Can't save! I/O error: {e}"),
            ));
        }

        self.dirty = 0;
        tracing::info!(path = %path.display(), bytes = buf.len(), "saved file");
        Ok(buf.len())
    }

    /// Save document to a new path
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let previous = self.file_path.replace(path.as_ref().to_path_buf());
        match self.save() {
            Ok(written) => {
                self.select_syntax();
                Ok(written)
            }
            Err(e) => {
                self.file_path = previous;
                Err(e)
            }
        }
    }

    /// Tag `len` rendered bytes of row `row` as a search match
    ///
    /// Returns the tags that were replaced so they can be restored later.
    pub(crate) fn overlay_match(&mut self, row: usize, start: usize, len: usize) -> Option<Vec<Highlight>> {
        let r = self.rows.get_mut(row)?;
        let saved = r.highlight().to_vec();
        r.overlay_highlight(start, len, Highlight::Match);
        Some(saved)
    }

    /// Put back tags captured by `overlay_match`
    pub(crate) fn restore_highlight(&mut self, row: usize, saved: Vec<Highlight>) {
        if let Some(r) = self.rows.get_mut(row) {
            r.restore_highlight(saved);
        }
    }

    fn renumber_from(&mut self, from: usize) {
        for (idx, row) in self.rows.iter_mut().enumerate().skip(from) {
            row.idx = idx;
        }
    }

    /// Re-render row `at` and re-highlight it and any rows its comment state reaches
    fn update_row(&mut self, at: usize) {
        if let Some(row) = self.rows.get_mut(at) {
            row.update_render(self.tab_stop);
            self.rehighlight(at, at);
        }
    }

    /// Highlight rows `from..=through`, then keep going while the open-comment state changes
    fn rehighlight(&mut self, from: usize, through: usize) {
        let rules = self.syntax;
        let mut idx = from;
        while idx < self.rows.len() {
            let starts_in_comment = idx > 0 && self.rows[idx - 1].continues_block_comment();
            let changed = self.rows[idx].update_syntax(rules, starts_in_comment);
            if !changed && idx >= through {
                break;
            }
            idx += 1;
        }
    }

    fn rehighlight_all(&mut self) {
        let rules = self.syntax;
        let mut open = false;
        for row in &mut self.rows {
            row.update_syntax(rules, open);
            open = row.continues_block_comment();
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
