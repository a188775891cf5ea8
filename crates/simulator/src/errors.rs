//! Located error reporting for the simulator front-end.
//!
//! Errors render in the usual compiler style:
//! ```text
//! messages.txt:3: error: rotor `VII` is not in the catalog
//! ```

use std::fmt;

use enigma_core::EnigmaError;
use thiserror::Error;

/// A line in a named input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLoc {
    /// File path, or a placeholder such as `<config>`.
    pub origin: String,
    /// 1-indexed line number.
    pub line: usize,
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.line)
    }
}

/// Classification of simulator errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorErrorKind {
    /// The engine rejected a configuration or message.
    #[error(transparent)]
    Enigma(#[from] EnigmaError),
    /// The machine configuration text is malformed.
    #[error("bad configuration: {0}")]
    Config(String),
    /// A setting line is malformed.
    #[error("bad setting line: {0}")]
    Setting(String),
    /// A message line appeared before any setting line.
    #[error("message appears before any setting line")]
    MissingSettingLine,
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// A simulator error with optional source context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorError {
    /// The kind of error.
    pub kind: SimulatorErrorKind,
    /// Where it happened, if known.
    pub location: Option<SourceLoc>,
}

impl SimulatorError {
    /// Creates an error without location.
    #[must_use]
    pub const fn new(kind: SimulatorErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    /// Attaches `origin:line` to the error.
    #[must_use]
    pub fn at(mut self, origin: &str, line: usize) -> Self {
        self.location = Some(SourceLoc {
            origin: origin.to_string(),
            line,
        });
        self
    }

    /// Replaces the origin of an existing location, keeping its line.
    #[must_use]
    pub fn with_origin(mut self, origin: &str) -> Self {
        if let Some(loc) = &mut self.location {
            loc.origin = origin.to_string();
        }
        self
    }

    /// Formats the error for stderr output.
    #[must_use]
    pub fn format_for_stderr(&self) -> String {
        self.location.as_ref().map_or_else(
            || format!("error: {}", self.kind),
            |loc| format!("{loc}: error: {}", self.kind),
        )
    }
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{loc}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<SimulatorErrorKind> for SimulatorError {
    fn from(kind: SimulatorErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<EnigmaError> for SimulatorError {
    fn from(error: EnigmaError) -> Self {
        Self::new(SimulatorErrorKind::Enigma(error))
    }
}
