//! # sexpr-scan - A streaming S-expression scanner
//!
//! Turns a stream of Unicode code points into typed tokens for a small
//! S-expression surface syntax: parentheses, quote marks, `;` comments,
//! symbolic atoms, integers and floats.
//!
//! ## Quick Start
//!
//! ```rust
//! use sexpr_scan::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("(define x -4.5) ; set x");
//! let kinds: Vec<TokenKind> = scanner.tokens().map(|t| t.kind).collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::OpenParen,
//!         TokenKind::Atom,
//!         TokenKind::Atom,
//!         TokenKind::Number,
//!         TokenKind::CloseParen,
//!         TokenKind::Comment,
//!         TokenKind::EndOfInput,
//!     ]
//! );
//! ```
//!
//! ### Pull one token at a time
//!
//! ```rust
//! use sexpr_scan::{Scanner, TokenKind, Value};
//!
//! let mut scanner = Scanner::new("'atom");
//! assert_eq!(scanner.next_token().kind, TokenKind::Quote);
//!
//! let atom = scanner.next_token();
//! assert_eq!(atom.value, Value::String("atom".to_string()));
//! assert_eq!((atom.row, atom.col), (1, 2));
//!
//! // Exhausted scanners keep answering EndOfInput
//! assert_eq!(scanner.next_token().kind, TokenKind::EndOfInput);
//! assert_eq!(scanner.next_token().kind, TokenKind::EndOfInput);
//! ```
//!
//! ### Scanning a byte stream
//!
//! ```rust
//! use sexpr_scan::SExprScanner;
//!
//! let input: &[u8] = b"(+ 1 2)";
//! let mut scanner = SExprScanner::from_reader(input);
//! let err = scanner.scan_tokens().unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Syntax error at line 1, column 2: Unexpected token[+]"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Lexical errors never cross the API as `Err`: they come back as
//! [`TokenKind::Error`] tokens carrying a message and the raw text consumed so
//! far. An error token is terminal. [`SExprScanner::scan_tokens`] folds that
//! into [`Error::Syntax`] for callers who want a `Result`.

pub mod error;
pub mod lexer;

/// Version of the scanner crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types
pub use error::{Error, Result, SourceError};
pub use lexer::{
    CharSource, Position, SExprScanner, ScannerConfig, Token, TokenKind, Tokens, Utf8Source, Value,
};

/// Type alias for the S-expression scanner over in-memory text
pub type Scanner<'a> = SExprScanner<std::str::Chars<'a>>;
