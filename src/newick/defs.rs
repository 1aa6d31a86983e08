//! Constants for Newick parsing and writing.

/// Newick label delimiters: parentheses, comma, colon, semicolon, comment start
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"(),:;[";

/// Guess of characters per label in capacity estimates
pub(crate) const LABEL_CHARS_GUESS: usize = 6;

/// Guess of characters per branch length (e.g. ":123.0")
pub(crate) const BRANCH_LENGTH_CHARS_GUESS: usize = 6;

/// Extra buffer in Newick string length/capacity estimate
pub(crate) const BUFFER_CHARS: usize = 10;
