//! Test utilities
//! Shared testing helpers and mocks

use crate::error::{ErrorKind, FlitError, Result};
use crate::input;
use crate::key::Key;
use crate::term::{Size, TerminalBackend};
use std::collections::VecDeque;

/// Mock terminal backend for testing
/// Replays scripted keys and records all writes for verification
pub struct MockTerminal {
    pub writes: Vec<Vec<u8>>,
    /// Scripted reads; `None` entries simulate a read timeout
    pub keys: VecDeque<Option<Key>>,
    pub clear_screen_calls: usize,
    pub init_calls: usize,
    pub deinit_calls: usize,
    pub size: (u16, u16),
}

impl MockTerminal {
    /// Create a new mock terminal with specified dimensions
    pub fn new(rows: u16, cols: u16) -> Self {
        MockTerminal {
            writes: Vec::new(),
            keys: VecDeque::new(),
            clear_screen_calls: 0,
            init_calls: 0,
            deinit_calls: 0,
            size: (rows, cols),
        }
    }

    /// Queue keys to be returned by `read_key`
    pub fn push_keys(&mut self, keys: &[Key]) {
        self.keys.extend(keys.iter().copied().map(Some));
    }

    /// Queue raw input bytes, decoded the way a real terminal's input would be
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let mut src: VecDeque<u8> = bytes.iter().copied().collect();
        while let Ok(Some(key)) = input::decode_key(&mut src) {
            self.keys.push_back(Some(key));
        }
    }

    /// Queue typing of a plain string
    pub fn push_str(&mut self, text: &str) {
        self.push_bytes(text.as_bytes());
    }

    /// Queue one read timeout
    pub fn push_timeout(&mut self) {
        self.keys.push_back(None);
    }

    /// Get all written bytes as a single vector
    pub fn get_written_bytes(&self) -> Vec<u8> {
        self.writes.iter().flatten().copied().collect()
    }

    /// Get all written bytes as a string (lossy UTF-8 conversion)
    pub fn get_written_string(&self) -> String {
        String::from_utf8_lossy(&self.get_written_bytes()).to_string()
    }

    /// The most recent write as a string
    pub fn last_frame(&self) -> String {
        self.writes
            .last()
            .map(|w| String::from_utf8_lossy(w).to_string())
            .unwrap_or_default()
    }

    /// Clear all recorded operations (useful for testing multiple renders)
    pub fn clear(&mut self) {
        self.writes.clear();
        self.clear_screen_calls = 0;
    }
}

impl TerminalBackend for MockTerminal {
    fn init(&mut self) -> Result<()> {
        self.init_calls += 1;
        Ok(())
    }

    fn deinit(&mut self) {
        self.deinit_calls += 1;
    }

    fn read_key(&mut self) -> Result<Option<Key>> {
        self.keys.pop_front().ok_or_else(|| {
            FlitError::fatal(ErrorKind::Terminal, "SCRIPT_EXHAUSTED", "No more scripted keys")
        })
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writes.push(bytes.to_vec());
        Ok(())
    }

    fn get_size(&mut self) -> Result<Size> {
        Ok(Size {
            rows: self.size.0,
            cols: self.size.1,
        })
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.clear_screen_calls += 1;
        Ok(())
    }
}
