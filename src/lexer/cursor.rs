//! Single-slot lookahead over a [`CharSource`] with row/column tracking
//!
//! The position advances exactly once per fetch from the source, at the
//! moment of the fetch. `peek()` may perform that fetch; a later `read()` of
//! the cached value does not advance again.

use super::source::CharSource;
use super::token::Position;

/// Outcome of pulling one unit from the source
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lookahead {
    /// A code point
    Char(char),
    /// Clean end of stream
    End,
    /// The source failed; carries the reason
    Failed(String),
}

impl Lookahead {
    pub(crate) fn as_char(&self) -> Option<char> {
        match self {
            Lookahead::Char(c) => Some(*c),
            _ => None,
        }
    }
}

pub(crate) struct Cursor<S> {
    source: S,
    peeked: Option<Lookahead>,
    /// Last code point handed out by `read()`
    last: Option<char>,
    pos: Position,
    /// Set once the source reported end of stream; it is not polled again
    exhausted: bool,
}

impl<S: CharSource> Cursor<S> {
    pub(crate) fn new(source: S) -> Self {
        Cursor {
            source,
            peeked: None,
            last: None,
            pos: Position::new(1, 0),
            exhausted: false,
        }
    }

    /// Position after the most recent fetch
    pub(crate) fn position(&self) -> Position {
        self.pos
    }

    pub(crate) fn last(&self) -> Option<char> {
        self.last
    }

    /// Returns the next unit without consuming it
    pub(crate) fn peek(&mut self) -> Lookahead {
        if let Some(cached) = &self.peeked {
            return cached.clone();
        }
        let next = self.fetch();
        self.peeked = Some(next.clone());
        next
    }

    /// Consumes and returns the next unit
    pub(crate) fn read(&mut self) -> Lookahead {
        let next = match self.peeked.take() {
            Some(cached) => cached,
            None => self.fetch(),
        };
        if let Lookahead::Char(c) = next {
            self.last = Some(c);
        }
        next
    }

    fn fetch(&mut self) -> Lookahead {
        if self.exhausted {
            return Lookahead::End;
        }
        let next = match self.source.fetch() {
            Ok(Some(c)) => Lookahead::Char(c),
            Ok(None) => {
                self.exhausted = true;
                Lookahead::End
            }
            Err(e) => {
                tracing::debug!(
                    row = self.pos.row,
                    col = self.pos.col,
                    "character source failed: {}",
                    e
                );
                Lookahead::Failed(e.to_string())
            }
        };
        self.advance(&next);
        next
    }

    fn advance(&mut self, fetched: &Lookahead) {
        if let Lookahead::Char('\n') = fetched {
            self.pos.row += 1;
            self.pos.col = 0;
        } else {
            self.pos.col += 1;
        }
    }
}
