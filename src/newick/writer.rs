//! Newick writing for transmission trees.
//!
//! Trees are written depth-first with an explicit stack, so arbitrarily long
//! transmission chains do not grow the call stack. Children are written in
//! their stored order, internal vertices carry their label after the closing
//! parenthesis: `(child1:len1,child2:len2)label`.

use crate::model::{BranchLength, Forest, NodeId, TransmissionTree, VertexIndex};
use crate::newick::defs::{BRANCH_LENGTH_CHARS_GUESS, BUFFER_CHARS, LABEL_CHARS_GUESS};
use crate::parser::utils::escape_label;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Style for serializing trees to Newick format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewickStyle {
    /// Every non-root vertex gets `:branch_length`, e.g. `((X_3:3.0)Z:2.0)Y;`
    #[default]
    WithBranchLengths,
    /// Nesting and labels only, e.g. `((X_3)Z)Y;`
    Topology,
}

// =#========================================================================#=
// NEWICK TREE (trait)
// =#========================================================================T=
/// Read access a tree needs to offer to be written as Newick.
///
/// Implemented for [Forest] and [TransmissionTree].
pub trait NewickTree {
    /// Handle of a vertex, cheap to copy.
    type Node<'a>: Copy
    where
        Self: 'a;

    /// The root, `None` for an empty tree.
    fn newick_root(&self) -> Option<Self::Node<'_>>;

    /// Children of `node` in output order.
    fn newick_children<'a>(&'a self, node: Self::Node<'a>) -> Vec<Self::Node<'a>>;

    /// Unescaped label of `node`.
    fn newick_label<'a>(&'a self, node: Self::Node<'a>) -> Cow<'a, str>;

    /// Length of the branch `parent -> child`.
    fn newick_branch_length<'a>(&'a self, parent: Self::Node<'a>, child: Self::Node<'a>) -> Option<BranchLength>;

    /// Number of vertices, used to estimate the output length.
    fn newick_num_nodes(&self) -> usize;
}

impl NewickTree for Forest {
    type Node<'a> = &'a NodeId;

    fn newick_root(&self) -> Option<&NodeId> {
        Some(self.root())
    }

    fn newick_children<'a>(&'a self, node: &'a NodeId) -> Vec<&'a NodeId> {
        self.children(node).iter().collect()
    }

    fn newick_label<'a>(&'a self, node: &'a NodeId) -> Cow<'a, str> {
        match node {
            NodeId::Original(label) => Cow::Borrowed(label.as_str()),
            synthetic => Cow::Owned(synthetic.label()),
        }
    }

    fn newick_branch_length<'a>(&'a self, parent: &'a NodeId, child: &'a NodeId) -> Option<BranchLength> {
        self.branch_length(parent, child)
    }

    fn newick_num_nodes(&self) -> usize {
        self.num_nodes()
    }
}

impl NewickTree for TransmissionTree {
    type Node<'a> = VertexIndex;

    fn newick_root(&self) -> Option<VertexIndex> {
        self.root_index()
    }

    fn newick_children<'a>(&'a self, node: VertexIndex) -> Vec<VertexIndex> {
        self[node].children().to_vec()
    }

    fn newick_label<'a>(&'a self, node: VertexIndex) -> Cow<'a, str> {
        Cow::Borrowed(self[node].label())
    }

    fn newick_branch_length<'a>(&'a self, _parent: VertexIndex, child: VertexIndex) -> Option<BranchLength> {
        self[child].branch_length()
    }

    fn newick_num_nodes(&self) -> usize {
        self.num_vertices()
    }
}

/// Pending output while walking a tree.
enum Step<N> {
    Open(N),
    Close(N),
    BranchLength(N, N),
    Comma,
}

/// Returns the Newick representation of `tree` with closing semicolon.
///
/// Returns just `;` for a tree without root.
///
/// # Example
/// ```
/// use transtree::model::TransmissionEdge;
/// use transtree::newick::{NewickStyle, to_newick};
/// use transtree::pipeline::ForestBuilder;
///
/// let edges = vec![
///     TransmissionEdge::new("Y", "Z", 2),
///     TransmissionEdge::new("Y", "W", 5),
/// ];
/// let forest = ForestBuilder::build(&edges).unwrap();
/// assert_eq!(to_newick(&forest, NewickStyle::WithBranchLengths), "(Z:2.0,W:5.0)Y;");
/// assert_eq!(to_newick(&forest, NewickStyle::Topology), "(Z,W)Y;");
/// ```
pub fn to_newick<T: NewickTree>(tree: &T, style: NewickStyle) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(tree, style));

    let mut stack: Vec<Step<T::Node<'_>>> = tree.newick_root().map(Step::Open).into_iter().collect();
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(node) => {
                let children = tree.newick_children(node);
                if children.is_empty() {
                    push_label(&mut newick, &tree.newick_label(node));
                    continue;
                }

                newick.push('(');
                stack.push(Step::Close(node));
                for (i, child) in children.into_iter().enumerate().rev() {
                    if style == NewickStyle::WithBranchLengths {
                        stack.push(Step::BranchLength(node, child));
                    }
                    stack.push(Step::Open(child));
                    if i > 0 {
                        stack.push(Step::Comma);
                    }
                }
            }
            Step::Close(node) => {
                newick.push(')');
                push_label(&mut newick, &tree.newick_label(node));
            }
            Step::BranchLength(parent, child) => {
                if let Some(length) = tree.newick_branch_length(parent, child) {
                    newick.push(':');
                    newick.push_str(&length.to_string());
                }
            }
            Step::Comma => newick.push(','),
        }
    }

    newick.push(';');
    newick
}

/// Appends the escaped label, nothing for unlabeled vertices.
fn push_label(newick: &mut String, label: &str) {
    if !label.is_empty() {
        newick.push_str(&escape_label(label));
    }
}

/// Writes the Newick string of `tree` followed by a newline to `writer`.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick<T: NewickTree, W: Write>(writer: &mut W, tree: &T, style: NewickStyle) -> io::Result<()> {
    writer.write_all(to_newick(tree, style).as_bytes())?;
    writer.write_all(b"\n")
}

/// Writes the given trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if creating or writing the file fails.
pub fn write_newick_file<T: NewickTree, P: AsRef<Path>>(path: P, trees: &[T], style: NewickStyle) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for tree in trees {
        write_newick(&mut writer, tree, style)?;
    }
    writer.flush()
}

/// Estimates the length of the Newick string of `tree`,
/// used to pre-allocate the output.
pub(crate) fn estimate_newick_len<T: NewickTree>(tree: &T, style: NewickStyle) -> usize {
    // Per vertex: label plus "(", ")" or "," on average
    let per_vertex = LABEL_CHARS_GUESS + 1;
    let per_branch = match style {
        NewickStyle::WithBranchLengths => BRANCH_LENGTH_CHARS_GUESS,
        NewickStyle::Topology => 0,
    };
    tree.newick_num_nodes() * (per_vertex + per_branch) + BUFFER_CHARS
}
