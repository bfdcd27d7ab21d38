//! Terminal backend abstraction
//! Provides platform-agnostic interface for terminal operations

/// ## term/ Invariants
///
/// - Terminal handling is isolated behind a strict abstraction boundary.
/// - Raw mode is enabled before input processing begins.
/// - Terminal state is restored on normal exit, error exit and panic.
/// - Reads wait a bounded time and report "no key" instead of blocking.
/// - Terminal code never depends on editor internals.
use crate::error::Result;
use crate::key::Key;

pub mod ansi;
pub mod crossterm;

/// Terminal size information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

/// Terminal backend trait
/// All terminal backends must implement these operations
pub trait TerminalBackend {
    /// Initialize terminal and enter raw mode
    fn init(&mut self) -> Result<()>;

    /// Restore terminal to original state
    fn deinit(&mut self);

    /// Read and decode a single keypress
    ///
    /// Returns `Ok(None)` when no key arrived within the bounded wait.
    fn read_key(&mut self) -> Result<Option<Key>>;

    /// Write bytes to the terminal in one call
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Get terminal dimensions
    ///
    /// Takes `&mut self` because a backend may have to ask the terminal and read the reply.
    fn get_size(&mut self) -> Result<Size>;

    /// Clear entire screen and home the cursor
    fn clear_screen(&mut self) -> Result<()> {
        let mut seq = Vec::with_capacity(ansi::CLEAR_SCREEN.len() + ansi::RESET_CURSOR.len());
        seq.extend_from_slice(ansi::CLEAR_SCREEN.as_bytes());
        seq.extend_from_slice(ansi::RESET_CURSOR.as_bytes());
        self.write(&seq)
    }
}
