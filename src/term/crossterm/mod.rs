//! Crossterm-based terminal backend
//! Raw mode and the alternate screen come from crossterm; input is read a byte
//! at a time with a bounded `poll` and decoded by `crate::input`.

use crossterm::{execute, terminal};
use std::io::{self, stdout, Write};
use std::os::fd::RawFd;

use crate::constants::{defaults, errors};
use crate::error::{ErrorKind, FlitError, Result};
use crate::input::{self, ByteSource};
use crate::key::Key;
use crate::term::{ansi, Size, TerminalBackend};

/// Standard input read one byte at a time with a bounded wait
pub struct StdinSource {
    fd: RawFd,
    timeout_ms: i32,
}

impl StdinSource {
    #[must_use]
    pub fn new(timeout_ms: i32) -> Self {
        Self::from_fd(libc::STDIN_FILENO, timeout_ms)
    }

    /// Read from another descriptor the caller keeps open
    pub(crate) fn from_fd(fd: RawFd, timeout_ms: i32) -> Self {
        StdinSource { fd, timeout_ms }
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut fds = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `fds` is a valid pollfd and the count is 1
        let ready = unsafe { libc::poll(&mut fds, 1, self.timeout_ms) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            return if err.kind() == io::ErrorKind::Interrupted {
                Ok(None)
            } else {
                Err(err)
            };
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a one-byte buffer
        let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            // Ready with nothing to read means the other end hung up
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }
}

/// Crossterm-based terminal backend implementation
pub struct CrosstermBackend {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
    input: StdinSource,
}

impl CrosstermBackend {
    #[must_use]
    pub fn new() -> Self {
        CrosstermBackend {
            raw_mode_enabled: false,
            alternate_screen_enabled: false,
            input: StdinSource::new(defaults::READ_TIMEOUT_MS),
        }
    }

    /// Ask the terminal where the cursor lands after moving to the far corner
    fn size_from_cursor_report(&mut self) -> Result<Size> {
        let mut query = String::from(ansi::CURSOR_TO_BOTTOM_RIGHT);
        query.push_str(ansi::REQUEST_CURSOR_POSITION);
        self.write(query.as_bytes())?;

        let report = input::read_cursor_report(&mut self.input).map_err(|e| {
            FlitError::fatal(ErrorKind::Terminal, errors::CURSOR_REPORT, e.to_string())
        })?;
        match report {
            Some((rows, cols)) if rows > 0 && cols > 0 => Ok(Size {
                rows: u16::try_from(rows).unwrap_or(u16::MAX),
                cols: u16::try_from(cols).unwrap_or(u16::MAX),
            }),
            _ => Err(FlitError::fatal(
                ErrorKind::Terminal,
                errors::TERMINAL_SIZE,
                "Could not determine terminal size",
            )),
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn init_error(what: &str, e: io::Error) -> FlitError {
    FlitError::fatal(ErrorKind::Terminal, errors::TERMINAL_INIT, format!("{what}: {e}"))
}

impl TerminalBackend for CrosstermBackend {
    fn init(&mut self) -> Result<()> {
        // Enable alternate screen buffer (prevents scrolling in main buffer)
        execute!(stdout(), terminal::EnterAlternateScreen)
            .map_err(|e| init_error("Failed to enter alternate screen", e))?;
        self.alternate_screen_enabled = true;

        terminal::enable_raw_mode().map_err(|e| init_error("Failed to enable raw mode", e))?;
        self.raw_mode_enabled = true;

        tracing::debug!("terminal initialized");
        Ok(())
    }

    fn deinit(&mut self) {
        if !self.raw_mode_enabled && !self.alternate_screen_enabled {
            return;
        }
        let _ = self.clear_screen();
        let _ = self.write(ansi::SHOW_CURSOR.as_bytes());

        if self.raw_mode_enabled {
            let _ = terminal::disable_raw_mode();
            self.raw_mode_enabled = false;
        }

        // Exit alternate screen buffer
        if self.alternate_screen_enabled {
            let _ = execute!(stdout(), terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }
        tracing::debug!("terminal restored");
    }

    fn read_key(&mut self) -> Result<Option<Key>> {
        input::decode_key(&mut self.input)
            .map_err(|e| FlitError::fatal(ErrorKind::Terminal, errors::READ_FAILED, e.to_string()))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let mut out = stdout().lock();
        out.write_all(bytes)
            .and_then(|()| out.flush())
            .map_err(|e| FlitError::fatal(ErrorKind::Terminal, errors::WRITE_FAILED, e.to_string()))
    }

    fn get_size(&mut self) -> Result<Size> {
        match terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => Ok(Size { rows, cols }),
            _ => self.size_from_cursor_report(),
        }
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        self.deinit();
    }
}
