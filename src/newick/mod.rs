//! Newick format parser and writer for transmission trees.
//!
//! Transmission trees are written as Newick strings where every vertex,
//! internal ones included, carries a label, and a vertex may have a single
//! child. [`NewickParser`] reads such strings back into
//! [`TransmissionTree`]s, e.g. to compare a produced tree against an
//! expected one.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses a file, returns all [`TransmissionTree`]s
//! * [`parse_str`] - parses a single string, returns a [`TransmissionTree`]
//! * [`to_newick`] - writes a [`Forest`](crate::model::Forest) or
//!   [`TransmissionTree`] as Newick string
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//! * [`NewickParser::into_iter`] - obtain an iterator over trees
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex {',' vertex} ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels with whitespace or `(),:;[]'` are single-quoted,
//!   quotes inside are doubled
//! * Comments are square brackets and are skipped

mod defs;
mod parser;
pub mod writer;

pub use self::parser::{NewickIterator, NewickParser};
pub use self::writer::{NewickStyle, NewickTree, to_newick, write_newick, write_newick_file};

use crate::model::TransmissionTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees.
///
/// # Arguments
/// * `path` - Path to a file with a semicolon-separated list of Newick strings
///
/// # Returns
/// * `Vec<TransmissionTree>` - All parsed trees in file order
/// * [`ParsingError`] - If file reading fails or Newick format is invalid
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<TransmissionTree>, ParsingError> {
    let byte_parser = ByteParser::for_file(path)?;
    NewickParser::new().parse_all(byte_parser)
}

/// Parses a single Newick string.
///
/// # Returns
/// * [`TransmissionTree`] - The parsed tree
/// * [`ParsingError`] - If the Newick string is invalid
///
/// # Example
/// ```
/// use transtree::newick;
///
/// let tree = newick::parse_str("((M_5,U)R,(N,O)M)ROOT;").unwrap();
/// assert_eq!(tree.num_vertices(), 7);
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.lineage("M_5"), Some(vec!["ROOT", "R", "M_5"]));
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<TransmissionTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}
