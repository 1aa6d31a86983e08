//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse single strings or all trees of a source, as well as lazy parsing
//! via a [NewickIterator].

use crate::model::{BranchLength, TransmissionTree, VertexIndex};
use crate::newick::defs::NEWICK_LABEL_DELIMITERS;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

/// Default guess for number of vertices, when unknown
const DEFAULT_NUM_VERTICES_GUESS: usize = 16;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser for Newick strings into [TransmissionTree]s.
///
/// Unlike strictly binary phylogenetic trees, vertices may have any number
/// of children, including exactly one, and internal vertices may carry
/// labels. Parsing uses an explicit stack, so nesting depth is only limited
/// by memory.
///
/// # Configuration
/// * [`with_num_vertices(num_vertices)`](Self::with_num_vertices)
///     - Expected number of vertices per tree for pre-allocation,
///       otherwise taken from the previously parsed tree.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Format
/// * `tree ::= vertex ';'`
/// * `vertex ::= leaf | internal_vertex`
/// * `internal_vertex ::= '(' vertex {',' vertex} ')' [label] [branch_length]`
/// * `leaf ::= label [branch_length]`
/// * `branch_length ::= ':' number`
///
/// Whitespace and `[...]` comments may occur between elements.
///
/// # Example
/// ```
/// use transtree::newick::NewickParser;
/// use transtree::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(((X_3:3.0)Z:2.0)Y:1.0)X;");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.lineage("X_3"), Some(vec!["X", "Y", "Z", "X_3"]));
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    num_vertices: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
        }
    }

    /// Sets the expected number of vertices in each parsed tree.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Consumes the parser and returns an iterator over trees from the byte
    /// source.
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> NewickIterator<B> {
        NewickIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<TransmissionTree>)` - All parsed trees
    /// * `Err(ParsingError)` - If any tree fails to parse
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<TransmissionTree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser],
    /// consuming the terminating `;`.
    ///
    /// # Returns
    /// * `Ok(TransmissionTree)` - The parsed, valid tree
    /// * `Err(ParsingError)` - If the Newick string is invalid
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<TransmissionTree, ParsingError> {
        let mut tree = TransmissionTree::with_capacity(self.num_vertices);
        // Internal vertices whose children are still being parsed
        let mut open: Vec<VertexIndex> = Vec::new();

        parser.skip_comment_and_whitespace()?;
        loop {
            // A vertex starts: either '(' or a leaf label
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                let index = tree.add_vertex("", None);
                self.attach_or_set_root(&mut tree, &open, index);
                open.push(index);
                continue;
            }

            let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
            let index = tree.add_vertex(label, None);
            self.attach_or_set_root(&mut tree, &open, index);
            let branch_length = self.parse_branch_length(parser)?;
            tree.set_branch_length(index, branch_length);

            // A vertex ends: close as many parentheses as follow
            loop {
                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    if open.is_empty() {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            "Found ',' outside of parentheses".to_string(),
                        ));
                    }
                    break;
                } else if parser.consume_if(b')') {
                    let Some(closed) = open.pop() else {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            "Found ')' without matching '('".to_string(),
                        ));
                    };
                    let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
                    tree.set_label(closed, label);
                    let branch_length = self.parse_branch_length(parser)?;
                    tree.set_branch_length(closed, branch_length);
                } else if parser.consume_if(b';') {
                    if !open.is_empty() {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            format!("Found ';' with {} unclosed '('", open.len()),
                        ));
                    }
                    self.num_vertices = tree.num_vertices();
                    return Ok(tree);
                } else if parser.is_eof() {
                    return Err(ParsingError::unexpected_eof(parser));
                } else {
                    let next_char = parser.peek().map(char::from);
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',', ')' or ';' but found {:?}", next_char),
                    ));
                }
            }
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    fn attach_or_set_root(&self, tree: &mut TransmissionTree, open: &[VertexIndex], index: VertexIndex) {
        match open.last() {
            Some(&parent) => tree.attach(parent, index),
            None => tree.set_root(index),
        }
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if it couldn't parse branch length value
    fn parse_branch_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break;
            }
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_newick_string(
                parser,
                format!("Invalid branch length: {:?}", branch_length_str),
            )
        })?;
        Ok(Some(BranchLength::new(value)))
    }
}

// =#========================================================================#=
// NEWICK ITERATOR (lazy parser)
// =#========================================================================$=
/// Iterator to parse Newick trees.
///
/// Created by [NewickParser::into_iter()].
/// Yields `Result<TransmissionTree, ParsingError>` for each tree and stops
/// after the first error.
pub struct NewickIterator<B: ByteSource> {
    parser: NewickParser,
    byte_parser: ByteParser<B>,
    done: bool,
}

impl<B: ByteSource> NewickIterator<B> {
    /// Consumes the iterator and returns the underlying [NewickParser].
    pub fn into_parser(self) -> NewickParser {
        self.parser
    }
}

impl<B: ByteSource> Iterator for NewickIterator<B> {
    type Item = Result<TransmissionTree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Err(e) = self.byte_parser.skip_comment_and_whitespace() {
            self.done = true;
            return Some(Err(e));
        }
        if self.byte_parser.is_eof() {
            self.done = true;
            return None;
        }

        let result = self.parser.parse_str(&mut self.byte_parser);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}
