//! Cursor position and movement
//!
//! ## cursor/ Invariants
//!
//! - `cy <= num_rows`; `cy == num_rows` is the virtual empty row past the end.
//! - `cx <= row(cy).size()` when `cy < num_rows`, otherwise `cx == 0`.
//! - `rx` is derived from (`cx`, `cy`) and refreshed before every frame.
//! - Vertical motion keeps the rendered column, not the byte offset.

use crate::document::Document;

/// A (column, row) position in raw document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    /// Byte offset in the row
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Position {
    #[must_use]
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// Cursor movement requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// Page up; needs the viewport's first row and height
    PageUp { row_offset: usize, screen_rows: usize },
    PageDown { row_offset: usize, screen_rows: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
    /// Rendered column, valid after `update_rx`
    pub rx: usize,
}

impl Cursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.cx, self.cy)
    }

    pub fn set_position(&mut self, pos: Position) {
        self.cx = pos.x;
        self.cy = pos.y;
    }

    /// Pull the cursor back inside the document
    pub fn clamp(&mut self, doc: &Document) {
        self.cy = self.cy.min(doc.num_rows());
        self.cx = self.cx.min(doc.row_size(self.cy));
    }

    /// Recompute `rx` from (`cx`, `cy`)
    pub fn update_rx(&mut self, doc: &Document) {
        self.rx = doc
            .row(self.cy)
            .map_or(0, |row| row.cx_to_rx(self.cx, doc.tab_stop()));
    }

    /// Apply one movement, then snap `cx` to the new row
    pub fn apply(&mut self, doc: &Document, motion: Motion) {
        let num_rows = doc.num_rows();
        match motion {
            Motion::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = doc.row_size(self.cy);
                }
            }
            Motion::Right => {
                if let Some(row) = doc.row(self.cy) {
                    if self.cx < row.size() {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Motion::Up => {
                if self.cy > 0 {
                    self.goto_row(doc, self.cy - 1);
                }
            }
            Motion::Down => {
                if self.cy < num_rows {
                    self.goto_row(doc, self.cy + 1);
                }
            }
            Motion::Home => self.cx = 0,
            Motion::End => self.cx = doc.row_size(self.cy),
            Motion::PageUp {
                row_offset,
                screen_rows,
            } => {
                // Jump to the top of the screen, then one screen further up
                self.goto_row(doc, row_offset.saturating_sub(screen_rows));
            }
            Motion::PageDown {
                row_offset,
                screen_rows,
            } => {
                let bottom = (row_offset + screen_rows).saturating_sub(1).min(num_rows);
                self.goto_row(doc, (bottom + screen_rows).min(num_rows));
            }
        }
        self.clamp(doc);
    }

    /// Move to row `cy`, keeping the rendered column
    fn goto_row(&mut self, doc: &Document, cy: usize) {
        let tab_stop = doc.tab_stop();
        let rx = doc.row(self.cy).map_or(0, |row| row.cx_to_rx(self.cx, tab_stop));
        self.cy = cy.min(doc.num_rows());
        self.cx = doc.row(self.cy).map_or(0, |row| row.rx_to_cx(rx, tab_stop));
    }
}
