use super::cursor::{Cursor, Lookahead};
use super::source::{CharSource, Utf8Source};
use super::token::{Position, Token, TokenKind, Value};
use crate::error::{Error, Result};
use std::io::Read;
use std::iter::FusedIterator;
use std::str::Chars;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Configuration for the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Emit `Comment` tokens (default: true). When false, comments are
    /// consumed and skipped like whitespace.
    pub emit_comments: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            emit_comments: true,
        }
    }
}

/// Streaming scanner for S-expression source
///
/// Pulls code points from a [`CharSource`] and produces one [`Token`] per
/// call to [`SExprScanner::next_token`]. The scanner is single-pass: once the
/// source is exhausted it keeps returning `EndOfInput`. An `Error` token is
/// terminal; nothing is guaranteed about what follows it.
pub struct SExprScanner<S> {
    cursor: Cursor<S>,
    config: ScannerConfig,
}

impl<'a> SExprScanner<Chars<'a>> {
    /// Creates a scanner over in-memory source text
    pub fn new(source: &'a str) -> Self {
        SExprScanner::from_source(source.chars())
    }
}

impl<R: Read> SExprScanner<Utf8Source<R>> {
    /// Creates a scanner decoding UTF-8 from a reader
    pub fn from_reader(reader: R) -> Self {
        SExprScanner::from_source(Utf8Source::new(reader))
    }
}

impl<S: CharSource> SExprScanner<S> {
    /// Creates a scanner over any character source
    pub fn from_source(source: S) -> Self {
        SExprScanner::with_config(source, ScannerConfig::default())
    }

    /// Creates a scanner with explicit configuration
    pub fn with_config(source: S, config: ScannerConfig) -> Self {
        SExprScanner {
            cursor: Cursor::new(source),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Row/column counters after the most recent fetch from the source
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Scans and returns the next token
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        if token.kind == TokenKind::Error {
            tracing::debug!(row = token.row, col = token.col, "scan error: {}", token.value);
        } else {
            tracing::trace!(kind = %token.kind, row = token.row, col = token.col, "scanned token");
        }
        token
    }

    /// Iterates over tokens up to and including the first terminal token
    pub fn tokens(&mut self) -> Tokens<'_, S> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    /// Scans the whole source, ending with `EndOfInput`
    ///
    /// The first `Error` token aborts the scan and is returned as
    /// [`Error::Syntax`].
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for token in self.tokens() {
            if token.kind == TokenKind::Error {
                return Err(Error::Syntax {
                    row: token.row,
                    col: token.col,
                    message: token.error_message().unwrap_or_default().to_string(),
                });
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn scan_token(&mut self) -> Token {
        loop {
            let next = self.cursor.peek();
            let start = self.cursor.position();

            let c = match next {
                Lookahead::End => {
                    self.cursor.read();
                    return Token::structural(TokenKind::EndOfInput, start);
                }
                Lookahead::Failed(reason) => {
                    self.cursor.read();
                    return Token::error(&Error::SourceRead { reason }, String::new(), start);
                }
                Lookahead::Char(c) => c,
            };

            match c {
                ';' => {
                    let token = self.scan_comment(start);
                    if token.kind == TokenKind::Comment && !self.config.emit_comments {
                        continue;
                    }
                    return token;
                }
                c if c.is_whitespace() => {
                    self.cursor.read();
                }
                '(' => {
                    self.cursor.read();
                    return Token::structural(TokenKind::OpenParen, start);
                }
                ')' => {
                    self.cursor.read();
                    return Token::structural(TokenKind::CloseParen, start);
                }
                '\'' => {
                    self.cursor.read();
                    return Token::structural(TokenKind::Quote, start);
                }
                c if is_letter(c) => return self.scan_atom(start),
                c if is_number(c) || c == '.' || c == '-' => return self.scan_number(start),
                c => {
                    self.cursor.read();
                    return Token::error(&Error::UnexpectedCharacter(c), c.to_string(), start);
                }
            }
        }
    }

    /// `;` up to, not including, the newline or end of input
    fn scan_comment(&mut self, start: Position) -> Token {
        let mut text = String::new();
        loop {
            match self.cursor.peek() {
                Lookahead::Char('\n') | Lookahead::End => {
                    return Token::new(TokenKind::Comment, Value::None, text, start);
                }
                Lookahead::Failed(reason) => {
                    self.cursor.read();
                    return Token::error(&Error::SourceRead { reason }, text, start);
                }
                Lookahead::Char(c) => {
                    self.cursor.read();
                    text.push(c);
                }
            }
        }
    }

    /// Letter, then letters, digits, `-` or `_`; must end in a letter or digit
    fn scan_atom(&mut self, start: Position) -> Token {
        let Some(first) = self.cursor.read().as_char() else {
            unreachable!("scan_atom entered without a peeked letter");
        };
        let mut text = String::from(first);

        while let Some(c) = self.cursor.peek().as_char() {
            if !(is_letter(c) || is_digit(c) || c == '-' || c == '_') {
                break;
            }
            self.cursor.read();
            text.push(c);
        }

        match self.cursor.last() {
            Some(c) if is_letter(c) || is_number(c) => {
                Token::new(TokenKind::Atom, Value::String(text.clone()), text, start)
            }
            _ => Token::error(&Error::MalformedAtom(text.clone()), text, start),
        }
    }

    /// Optional `-` or `.`, digits, at most one `.`; must be followed by a
    /// newline, `(`, `)`, a single space or end of input
    fn scan_number(&mut self, start: Position) -> Token {
        let Some(first) = self.cursor.read().as_char() else {
            unreachable!("scan_number entered without a peeked character");
        };
        let mut decimal = first == '.';
        let mut text = String::from(first);

        let terminator = loop {
            let c = match self.cursor.peek() {
                Lookahead::Char(c) if is_number(c) || (c == '.' && !decimal) => c,
                other => break other,
            };
            decimal |= c == '.';
            self.cursor.read();
            text.push(c);
        };

        match terminator {
            Lookahead::End | Lookahead::Char('\n' | '(' | ')' | ' ') => {
                number_token(text, decimal, start)
            }
            Lookahead::Failed(reason) => {
                self.cursor.read();
                Token::error(&Error::SourceRead { reason }, text, start)
            }
            Lookahead::Char(_) => Token::error(&Error::MalformedNumber(text.clone()), text, start),
        }
    }
}

/// Unicode letter (general category L*)
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Decimal digit (Nd)
fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Any numeric character (N*): decimal digits, letter numbers like `Ⅻ`, and
/// others like `²` or `½`
fn is_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::DecimalNumber | GeneralCategory::LetterNumber | GeneralCategory::OtherNumber
    )
}

fn number_token(text: String, decimal: bool, start: Position) -> Token {
    let parsed = if decimal {
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| e.to_string())
    } else {
        text.parse::<i64>().map(Value::Int).map_err(|e| e.to_string())
    };

    match parsed {
        Ok(value) => Token::new(TokenKind::Number, value, text, start),
        Err(reason) => Token::error(
            &Error::InvalidNumeric {
                raw: text.clone(),
                reason,
            },
            text,
            start,
        ),
    }
}

/// Iterator returned by [`SExprScanner::tokens`]
pub struct Tokens<'s, S> {
    scanner: &'s mut SExprScanner<S>,
    done: bool,
}

impl<S: CharSource> Iterator for Tokens<'_, S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.scanner.next_token();
        self.done = token.kind.is_terminal();
        Some(token)
    }
}

impl<S: CharSource> FusedIterator for Tokens<'_, S> {}
