//! Error model for Flit
//!
//! Failures come in two tiers. A fatal error ends the session: the terminal is
//! restored, the error is printed and the process exits. Anything else is
//! shown on the message bar and the editor keeps running with its state as it
//! was before the failed operation.

use std::fmt;

/// How the editor reacts to a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// The request had nothing to act on (no selection, empty clipboard)
    Warning,
    /// The operation failed and the document is unchanged
    Error,
    /// The session cannot continue
    Fatal,
}

impl ErrorSeverity {
    fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

/// The part of the editor a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading or writing the document's file
    File,
    /// Raw mode, size queries, key reads and frame writes
    Terminal,
    /// Startup options
    Settings,
    /// Selection and clipboard commands
    Selection,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Terminal => "terminal",
            Self::Settings => "settings",
            Self::Selection => "selection",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlitError {
    pub severity: ErrorSeverity,
    pub kind: ErrorKind,
    /// One of `constants::errors`
    pub code: &'static str,
    /// Text shown to the user
    pub message: String,
}

impl FlitError {
    fn with_severity(
        severity: ErrorSeverity,
        kind: ErrorKind,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            code,
            message: message.into(),
        }
    }

    /// A failure the session cannot recover from
    pub fn fatal(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self::with_severity(ErrorSeverity::Fatal, kind, code, message)
    }

    /// A failed operation, reported on the message bar
    pub fn error(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self::with_severity(ErrorSeverity::Error, kind, code, message)
    }

    /// A request with nothing to act on, reported on the message bar
    pub fn warning(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self::with_severity(ErrorSeverity::Warning, kind, code, message)
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == ErrorSeverity::Fatal
    }
}

impl fmt::Display for FlitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} error [{}]: {}",
            self.severity.label(),
            self.kind,
            self.code,
            self.message
        )
    }
}

impl std::error::Error for FlitError {}

pub type Result<T> = std::result::Result<T, FlitError>;
