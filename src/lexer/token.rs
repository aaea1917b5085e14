use serde::{Deserialize, Serialize};
use std::fmt;

/// Row/column location in the source (both 1-indexed once a character is seen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number
    pub row: usize,
    /// Column number
    pub col: usize,
}

impl Position {
    /// Creates a new position
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// The closed set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Lexical error or source failure; terminal
    Error,
    /// Source exhausted; terminal
    EndOfInput,
    /// `;` up to the end of the line
    Comment,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `'`
    Quote,
    /// Symbolic atom
    Atom,
    /// Integer or float literal
    Number,
}

impl TokenKind {
    /// Stable textual name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Error => "Error",
            TokenKind::EndOfInput => "EndOfInput",
            TokenKind::Comment => "Comment",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::Quote => "Quote",
            TokenKind::Atom => "Atom",
            TokenKind::Number => "Number",
        }
    }

    /// Whether a consumer should stop after this kind
    pub fn is_terminal(&self) -> bool {
        matches!(self, TokenKind::Error | TokenKind::EndOfInput)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of a token; the variant follows from the token kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Structural tokens, comments and end of input
    None,
    /// Atom text
    String(String),
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// Human-readable error description
    ErrorMessage(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::None => write!(f, "<nil>"),
            Value::String(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::ErrorMessage(msg) => write!(f, "{}", msg),
        }
    }
}

/// A single token produced by the scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Decoded payload
    pub value: Value,
    /// Exact source text consumed for the token
    pub raw: String,
    /// Line of the token's first character (1-indexed)
    pub row: usize,
    /// Column of the token's first character (1-indexed)
    pub col: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, value: Value, raw: String, pos: Position) -> Self {
        Token {
            kind,
            value,
            raw,
            row: pos.row,
            col: pos.col,
        }
    }

    /// Structural token with no payload and empty raw text
    pub fn structural(kind: TokenKind, pos: Position) -> Self {
        Token::new(kind, Value::None, String::new(), pos)
    }

    /// Error token carrying the rendered message of `err`
    pub fn error(err: &crate::Error, raw: String, pos: Position) -> Self {
        Token::new(
            TokenKind::Error,
            Value::ErrorMessage(err.to_string()),
            raw,
            pos,
        )
    }

    /// Position of the token's first character
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Atom text, if this is an atom
    pub fn as_atom(&self) -> Option<&str> {
        match (&self.kind, &self.value) {
            (TokenKind::Atom, Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Integer value, if this is an integer literal
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Float value, if this is a float literal
    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Error message, if this is an error token
    pub fn error_message(&self) -> Option<&str> {
        match &self.value {
            Value::ErrorMessage(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[@({},{}){}:{},{}]",
            self.row, self.col, self.kind, self.value, self.raw
        )
    }
}
