//! Error types for parsing and the serde bridge.
//!
//! Every structural violation the parser can hit is surfaced as a single
//! [`ParseError`] record rather than a bare message: it carries the failure
//! kind, the file identity and context label supplied by the caller, and the
//! 1-based line number when one is known. Callers decide recoverability (for
//! example, falling back to a default configuration); the parser itself never
//! returns a partially built document.
//!
//! ## Examples
//!
//! ```rust
//! use yamlite::{parse, ParseErrorKind};
//!
//! let err = parse("   odd: 1\n").unwrap_err();
//! let parse_err = err.as_parse().expect("structural failure");
//! assert_eq!(parse_err.kind, ParseErrorKind::Indentation);
//! assert_eq!(parse_err.line, Some(1));
//! ```

use std::fmt;
use thiserror::Error;

/// Sub-code identifying which structural rule a [`ParseError`] violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Leading-space count is not a multiple of the indentation unit.
    Indentation,
    /// Non-sequence-item line without a colon separator.
    MissingColon,
    /// Key portion trimmed to an empty string.
    EmptyKey,
    /// Dash-prefixed line while the current container is not a sequence.
    ArrayContext,
    /// `key: value` line while the current container is a sequence.
    KeyContext,
}

/// A structural parse failure with full source context.
///
/// Always fully populated: the message, file identity and context label are
/// never empty, and `line` is `None` only for failures that cannot be pinned
/// to a single line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub file: String,
    pub context: String,
    pub line: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        file: impl Into<String>,
        context: impl Into<String>,
        line: usize,
    ) -> Self {
        ParseError {
            kind,
            message: message.into(),
            file: file.into(),
            context: context.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} parse error: {}", self.context, self.message)?;
        match self.line {
            Some(line) => write!(f, " ({}, line {})", self.file, line),
            None => write!(f, " ({})", self.file),
        }
    }
}

impl std::error::Error for ParseError {}

/// Represents all possible errors this crate can produce.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Structural failure while parsing a document.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// IO error during reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// A value shape the serde bridge cannot represent.
    #[error("Unsupported type: {0}")]
    Unsupported(String),

    /// Custom error raised through the serde `Error` traits.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// If this is a structural parse failure, returns the [`ParseError`] record.
    #[must_use]
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }

    /// Creates an unsupported-type error for shapes the serde bridge rejects.
    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yamlite::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
