//! Viewport management
//! Tracks which window of the document is visible

//! ## viewport/ Invariants
//!
//! - After `scroll`, the cursor row lies in `[row_offset, row_offset + rows)`.
//! - After `scroll`, the cursor's rendered column lies in `[col_offset, col_offset + text_cols)`.
//! - The viewport never mutates document contents.
//! - `scroll` is a pure clamp run before every frame.

/// Rows reserved below the text area for the status bar and message bar
pub const RESERVED_ROWS: usize = 2;

/// Viewport manages which portion of the document is visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// First visible document row
    row_offset: usize,
    /// First visible rendered column
    col_offset: usize,
    /// Number of text rows (terminal rows minus the two bars)
    screen_rows: usize,
    /// Terminal width in columns
    screen_cols: usize,
}

impl Viewport {
    /// Build a viewport for a terminal of `term_rows` x `term_cols`
    #[must_use]
    pub fn new(term_rows: usize, term_cols: usize) -> Self {
        Viewport {
            row_offset: 0,
            col_offset: 0,
            screen_rows: term_rows.saturating_sub(RESERVED_ROWS),
            screen_cols: term_cols,
        }
    }

    /// Clamp offsets so that (`cy`, `rx`) is visible
    ///
    /// `gutter_width` columns on the left are taken by line numbers.
    /// Returns true if either offset changed.
    pub fn scroll(&mut self, cy: usize, rx: usize, gutter_width: usize) -> bool {
        let before = (self.row_offset, self.col_offset);

        if cy < self.row_offset {
            self.row_offset = cy;
        }
        if self.screen_rows > 0 && cy >= self.row_offset + self.screen_rows {
            self.row_offset = cy + 1 - self.screen_rows;
        }

        let text_cols = self.text_cols(gutter_width);
        if rx < self.col_offset {
            self.col_offset = rx;
        }
        if text_cols > 0 && rx >= self.col_offset + text_cols {
            self.col_offset = rx + 1 - text_cols;
        }

        (self.row_offset, self.col_offset) != before
    }

    /// Columns left for text once the gutter is drawn
    #[must_use]
    pub fn text_cols(&self, gutter_width: usize) -> usize {
        self.screen_cols.saturating_sub(gutter_width)
    }

    #[must_use]
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    #[must_use]
    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    #[must_use]
    pub fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    #[must_use]
    pub fn screen_cols(&self) -> usize {
        self.screen_cols
    }

    /// Set the scroll position (used when restoring view state)
    pub fn set_scroll(&mut self, row_offset: usize, col_offset: usize) {
        self.row_offset = row_offset;
        self.col_offset = col_offset;
    }

    /// Get current scroll position as (row_offset, col_offset)
    #[must_use]
    pub fn get_scroll(&self) -> (usize, usize) {
        (self.row_offset, self.col_offset)
    }
}
