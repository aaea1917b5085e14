//! Error types for the S-expression scanner

use thiserror::Error;

/// Scanner errors
///
/// The first five variants are the lexical error taxonomy. The scanner never
/// returns them through `Err`; it renders them into `Error` tokens whose
/// message is the variant's `Display` output. [`Error::Syntax`] is what the
/// collecting API ([`crate::SExprScanner::scan_tokens`]) returns when the
/// stream ends in such a token.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The character source failed while reading
    ///
    /// **Triggered by:** I/O failure or malformed UTF-8 in the underlying stream.
    /// The reason is kept for logging; the rendered message is fixed.
    #[error("Rune Error")]
    SourceRead {
        /// What the source reported
        reason: String,
    },

    /// A code point that does not begin any token
    ///
    /// **Example:** `#`, `"`, `[`
    #[error("Unexpected token[{0}]")]
    UnexpectedCharacter(char),

    /// Atom ending in `-` or `_`
    ///
    /// **Example:** `test_`, `foo-`
    #[error("Invalid Atom[{0}]")]
    MalformedAtom(String),

    /// Numeric literal followed by a character that cannot end it
    ///
    /// **Example:** `4s4`, `12\t`
    #[error("Invalid Number[{0}]")]
    MalformedNumber(String),

    /// Numeric literal whose text does not parse
    ///
    /// **Example:** `-` followed by a space, `.` on its own
    #[error("Invalid Number[{raw}]: {reason}")]
    InvalidNumeric {
        /// Accumulated literal text
        raw: String,
        /// Parser failure message
        reason: String,
    },

    /// An error token surfaced through the collecting API
    #[error("Syntax error at line {row}, column {col}: {message}")]
    Syntax {
        /// Row of the offending token (1-indexed)
        row: usize,
        /// Column of the offending token (1-indexed)
        col: usize,
        /// Message carried by the error token
        message: String,
    },
}

/// Failures reported by a [`crate::CharSource`]
#[derive(Error, Debug)]
pub enum SourceError {
    /// The underlying reader failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A byte sequence that is not valid UTF-8
    #[error("invalid UTF-8 sequence {bytes:02x?}")]
    InvalidUtf8 {
        /// The offending bytes
        bytes: Vec<u8>,
    },
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::SourceRead {
            reason: err.to_string(),
        }
    }
}

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, Error>;
