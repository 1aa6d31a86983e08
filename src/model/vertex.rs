//! Vertices of a [TransmissionTree](crate::model::TransmissionTree)
//! and their branch lengths.

use crate::model::edge::Time;
use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================$=
/// Vertex of an arena tree with any number of children.
///
/// # Invariants
/// - `index` is the position of this vertex in the arena
/// - `parent` is `None` exactly for the root
/// - `children` keep the order in which they were attached
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Displayed label; every vertex of a transmission tree has one
    label: String,
    /// Index of the parent vertex, `None` for the root
    parent: Option<VertexIndex>,
    /// Indices of the child vertices, in insertion order
    children: Vec<VertexIndex>,
    /// Length of the branch to the parent
    branch_length: Option<BranchLength>,
}

impl Vertex {
    pub(crate) fn new(index: VertexIndex, label: String, branch_length: Option<BranchLength>) -> Self {
        Vertex {
            index,
            label,
            parent: None,
            children: Vec::new(),
            branch_length,
        }
    }

    /// Index of this vertex in its tree.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Label of this vertex.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Indices of the children in order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Branch length to the parent, if known.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns whether this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        self.children.push(child);
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================$=
/// Length of a branch, i.e. the time of the transmission it represents.
///
/// Unlike in phylogenetics, negative values are accepted, since transmission
/// times are taken as reported.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    pub fn new(value: f64) -> Self {
        BranchLength(value)
    }

    /// Branch length of the edges below the synthetic super-root.
    pub const ZERO: BranchLength = BranchLength(0.0);
}

impl From<Time> for BranchLength {
    fn from(time: Time) -> Self {
        BranchLength(time as f64)
    }
}

impl From<f64> for BranchLength {
    fn from(value: f64) -> Self {
        BranchLength(value)
    }
}

impl Deref for BranchLength {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Always shows a fractional part, so times read as real numbers:
/// `3` becomes `3.0`, `0.25` stays `0.25`.
impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
