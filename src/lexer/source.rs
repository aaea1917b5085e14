//! Character sources feeding the scanner
//!
//! A source hands out one code point per call, strictly forward. It never
//! needs to support pushback: the scanner keeps its own lookahead slot.

use crate::error::SourceError;
use std::io::{BufReader, Bytes, Read};

/// Sequential, single-pass supplier of code points
///
/// `Ok(Some(c))` is the next code point, `Ok(None)` a clean end of stream,
/// `Err(_)` a read failure.
pub trait CharSource {
    /// Fetches the next code point
    fn fetch(&mut self) -> Result<Option<char>, SourceError>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn fetch(&mut self) -> Result<Option<char>, SourceError> {
        (**self).fetch()
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn fetch(&mut self) -> Result<Option<char>, SourceError> {
        (**self).fetch()
    }
}

impl CharSource for std::str::Chars<'_> {
    fn fetch(&mut self) -> Result<Option<char>, SourceError> {
        Ok(self.next())
    }
}

/// Decodes UTF-8 code points from any [`Read`]
///
/// The reader is buffered internally. A malformed or truncated sequence is
/// reported once; decoding picks up again at the following byte.
pub struct Utf8Source<R: Read> {
    bytes: Bytes<BufReader<R>>,
    /// Byte read while validating a sequence that turned out not to belong to it
    pending: Option<u8>,
}

impl<R: Read> Utf8Source<R> {
    /// Wraps a reader
    pub fn new(reader: R) -> Self {
        Utf8Source {
            bytes: BufReader::new(reader).bytes(),
            pending: None,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        if let Some(b) = self.pending.take() {
            return Ok(Some(b));
        }
        match self.bytes.next() {
            None => Ok(None),
            Some(Ok(b)) => Ok(Some(b)),
            Some(Err(e)) => Err(SourceError::Io(e)),
        }
    }
}

/// Encoded length announced by a lead byte, or `None` if it cannot start a sequence
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: Read> CharSource for Utf8Source<R> {
    fn fetch(&mut self) -> Result<Option<char>, SourceError> {
        let lead = match self.next_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        let len = sequence_len(lead).ok_or_else(|| SourceError::InvalidUtf8 {
            bytes: vec![lead],
        })?;
        if len == 1 {
            return Ok(Some(lead as char));
        }

        let mut buf = [lead, 0, 0, 0];
        for i in 1..len {
            match self.next_byte()? {
                Some(b) if b & 0xC0 == 0x80 => buf[i] = b,
                Some(b) => {
                    self.pending = Some(b);
                    return Err(SourceError::InvalidUtf8 {
                        bytes: buf[..i].to_vec(),
                    });
                }
                None => {
                    return Err(SourceError::InvalidUtf8 {
                        bytes: buf[..i].to_vec(),
                    })
                }
            }
        }

        // Overlong forms and surrogates pass the structural checks above
        match std::str::from_utf8(&buf[..len]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Err(SourceError::InvalidUtf8 {
                bytes: buf[..len].to_vec(),
            }),
        }
    }
}
