//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] with support for peeking, consuming,
//! comment skipping, and quote-aware label parsing. It is the foundation of
//! the [Newick parser](crate::newick::NewickParser).

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking and consuming.
///
/// # Features
/// - Works with any [ByteSource]
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes, escaped by doubling)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use transtree::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [seed] (X_3)Z;");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.parse_label(b"(),:;").unwrap(), "X_3");
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new [ByteParser] from a string by copying it.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new [ByteParser] reading the whole file into memory.
    pub fn for_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new [ByteParser] from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Checks if the current byte is `ch`.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it is `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes up to and including `target`.
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_through(&mut self, target: u8) -> bool {
        while let Some(b) = self.next_byte() {
            if b == target {
                return true;
            }
        }
        false
    }

    /// Skips (consumes) all consecutive whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a comment `[...]` if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if(b'[') {
            if !self.consume_through(b']') {
                return Err(ParsingError::unclosed_comment(self));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for
    /// error context. Invalid UTF-8 is replaced.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(&self.source.get_context(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// Leading whitespace and comments are skipped. Returns an empty string
    /// if a delimiter follows directly.
    ///
    /// # Errors
    /// Returns an error if a quoted label is not closed.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a label enclosed in single quotes, expecting the parser at the
    /// opening quote. Single quotes within the label are escaped by doubling
    /// them (e.g. `'Wilson''s'` becomes `Wilson's`).
    ///
    /// # Errors
    /// Returns an error if the closing quote is missing.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // consume opening '

        let mut bytes = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    // Escaped quote (two single quotes in a row)
                    if self.consume_if(b'\'') {
                        bytes.push(b'\'');
                    } else {
                        break;
                    }
                }
                Some(b) => bytes.push(b),
                None => return Err(ParsingError::unexpected_eof(self)),
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters,
    /// whitespace or EOF.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut bytes = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) || b.is_ascii_whitespace() {
                break;
            }
            bytes.push(b);
            self.next_byte();
        }

        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_comment_and_whitespace() {
        let mut parser = ByteParser::for_str("  [a comment]\n [another]\t(");
        parser.skip_comment_and_whitespace().unwrap();
        assert_eq!(parser.peek(), Some(b'('));
    }

    #[test]
    fn test_unclosed_comment() {
        let mut parser = ByteParser::for_str("[never closed");
        assert!(parser.skip_comment_and_whitespace().is_err());
    }

    #[test]
    fn test_quoted_label_with_escaped_quote() {
        let mut parser = ByteParser::for_str("'Wilson''s storm petrel':1.0");
        assert_eq!(parser.parse_label(b",):;").unwrap(), "Wilson's storm petrel");
        assert_eq!(parser.peek(), Some(b':'));
    }

    #[test]
    fn test_unclosed_quoted_label() {
        let mut parser = ByteParser::for_str("'open");
        assert!(parser.parse_label(b",):;").is_err());
    }

    #[test]
    fn test_unquoted_label_stops_at_delimiter() {
        let mut parser = ByteParser::for_str("M_5,U");
        assert_eq!(parser.parse_label(b",):;").unwrap(), "M_5");
        assert!(parser.consume_if(b','));
        assert_eq!(parser.parse_label(b",):;").unwrap(), "U");
        assert!(parser.is_eof());
    }
}
