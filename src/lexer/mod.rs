//! Lexical analysis for S-expression source
//!
//! Converts a stream of code points into tokens: parentheses, quote marks,
//! comments, atoms and numbers.

mod cursor;
mod sexpr_scanner;
mod source;
mod token;

pub use sexpr_scanner::{SExprScanner, ScannerConfig, Tokens};
pub use source::{CharSource, Utf8Source};
pub use token::{Position, Token, TokenKind, Value};
