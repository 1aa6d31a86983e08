//! Arena representation of a single transmission tree.
//!
//! [TransmissionTree] is what structured consumers (renderers, analyses)
//! get from a [Forest](crate::model::Forest) via
//! [`Forest::to_tree`](crate::model::Forest::to_tree), and what
//! [parse_newick_str](crate::newick::parse_str) produces from Newick text.
//! Comparing the two is how round trips are checked.

use crate::model::vertex::{BranchLength, Vertex};
use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted tree with labelled vertices and any number of children per
/// vertex, stored with the arena pattern on [Vertex].
///
/// # Structure
/// - All vertices are stored in a contiguous arena and referenced by
///   [VertexIndex]
/// - Children keep their insertion order, which is also their Newick order
/// - Every vertex carries a label, internal vertices included
///
/// # Construction
/// Add vertices with [add_vertex](Self::add_vertex), connect them with
/// [attach](Self::attach) and finally mark the root with
/// [set_root](Self::set_root). Check the result with
/// [is_valid](Self::is_valid).
///
/// # Example
/// ```
/// use transtree::model::TransmissionTree;
/// use transtree::model::vertex::BranchLength;
///
/// let mut tree = TransmissionTree::with_capacity(3);
/// let x = tree.add_vertex("X", None);
/// let y = tree.add_vertex("Y", Some(BranchLength::from(1)));
/// let z = tree.add_vertex("Z", Some(BranchLength::from(2)));
/// tree.attach(x, y);
/// tree.attach(y, z);
/// tree.set_root(x);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransmissionTree {
    vertices: Vec<Vertex>,
    root_index: Option<VertexIndex>,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl TransmissionTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        TransmissionTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: None,
        }
    }

    /// Adds an unattached vertex and returns its index.
    ///
    /// # Arguments
    /// * `label` - Displayed label of the vertex
    /// * `branch_length` - Length of the branch to its future parent
    pub fn add_vertex(&mut self, label: impl Into<String>, branch_length: Option<BranchLength>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(index, label.into(), branch_length));
        index
    }

    /// Makes `child` the last child of `parent`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn attach(&mut self, parent: VertexIndex, child: VertexIndex) {
        self[child].set_parent(parent);
        self[parent].push_child(child);
    }

    /// Marks `root` as the root of this tree.
    pub fn set_root(&mut self, root: VertexIndex) {
        self.root_index = Some(root);
    }

    pub(crate) fn set_branch_length(&mut self, index: VertexIndex, branch_length: Option<BranchLength>) {
        self[index].set_branch_length(branch_length);
    }

    pub(crate) fn set_label(&mut self, index: VertexIndex, label: String) {
        self[index].set_label(label);
    }
}

// ============================================================================
// Getters, Queries (pub)
// ============================================================================
impl TransmissionTree {
    /// Returns the root vertex, `None` if it has not been set.
    pub fn root(&self) -> Option<&Vertex> {
        self.root_index.map(|index| &self[index])
    }

    /// Returns the index of the root, `None` if it has not been set.
    pub fn root_index(&self) -> Option<VertexIndex> {
        self.root_index
    }

    /// Returns the vertex at `index`, `None` if out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Returns all vertices in arena order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of vertices without children.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Labels of all leaves, sorted.
    pub fn leaf_labels(&self) -> BTreeSet<&str> {
        self.vertices
            .iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.label())
            .collect()
    }

    /// Returns the first vertex with the given label.
    pub fn find(&self, label: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.label() == label)
    }

    /// Returns the labels on the path from the root down to the first vertex
    /// with the given label, both included.
    pub fn lineage(&self, label: &str) -> Option<Vec<&str>> {
        let mut current = self.find(label)?;
        let mut path = vec![current.label()];
        while let Some(parent) = current.parent() {
            current = &self[parent];
            path.push(current.label());
        }
        path.reverse();
        Some(path)
    }

    /// Returns vertex indices in depth-first pre-order from the root,
    /// children visited in order. Empty if no root is set.
    pub fn preorder(&self) -> Vec<VertexIndex> {
        let mut order = Vec::with_capacity(self.vertices.len());
        let mut stack: Vec<VertexIndex> = self.root_index.into_iter().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self[index].children().iter().rev());
        }
        order
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is set, in bounds and has no parent
    /// - All vertex indices match their position in the arena
    /// - Parent and child references agree with each other
    /// - Every vertex is reachable from the root exactly once
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if root_index >= self.vertices.len() || self.vertices[root_index].parent().is_some() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }
            if let Some(parent) = vertex.parent() {
                match self.vertices.get(parent) {
                    Some(p) if p.children().contains(&index) => {}
                    _ => return false,
                }
            } else if index != root_index {
                return false;
            }
            for &child in vertex.children() {
                match self.vertices.get(child) {
                    Some(c) if c.parent() == Some(index) => {}
                    _ => return false,
                }
            }
        }

        // Reachability; a shared child would show up twice here
        let order = self.preorder();
        let mut seen = vec![false; self.vertices.len()];
        for index in &order {
            if seen[*index] {
                return false;
            }
            seen[*index] = true;
        }
        order.len() == self.vertices.len()
    }

    /// Returns whether both trees have the same labels, nesting, child order
    /// and branch lengths, regardless of arena layout.
    pub fn same_shape(&self, other: &TransmissionTree) -> bool {
        fn walk(a: &TransmissionTree, ai: VertexIndex, b: &TransmissionTree, bi: VertexIndex) -> bool {
            let mut stack = vec![(ai, bi)];
            while let Some((ai, bi)) = stack.pop() {
                let (va, vb) = (&a[ai], &b[bi]);
                if va.label() != vb.label()
                    || va.children().len() != vb.children().len()
                    || branch_lengths_differ(va.branch_length(), vb.branch_length())
                {
                    return false;
                }
                stack.extend(va.children().iter().copied().zip(vb.children().iter().copied()));
            }
            true
        }

        match (self.root_index, other.root_index) {
            (Some(a), Some(b)) => walk(self, a, other, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Root branches are optional in Newick, so a missing length on one side
/// matches a missing length on the other only.
fn branch_lengths_differ(a: Option<BranchLength>, b: Option<BranchLength>) -> bool {
    const EPSILON: f64 = 1e-9;
    match (a, b) {
        (Some(a), Some(b)) => (*a - *b).abs() > EPSILON,
        (None, None) => false,
        _ => true,
    }
}

impl Index<VertexIndex> for TransmissionTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl IndexMut<VertexIndex> for TransmissionTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> TransmissionTree {
        let mut tree = TransmissionTree::new();
        let x = tree.add_vertex("X", None);
        let y = tree.add_vertex("Y", Some(BranchLength::from(1)));
        let z = tree.add_vertex("Z", Some(BranchLength::from(2)));
        let w = tree.add_vertex("W", Some(BranchLength::from(4)));
        tree.attach(x, y);
        tree.attach(y, z);
        tree.attach(x, w);
        tree.set_root(x);
        tree
    }

    #[test]
    fn test_valid_tree() {
        let tree = chain();
        assert!(tree.is_valid());
        assert_eq!(tree.num_vertices(), 4);
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.leaf_labels().into_iter().collect::<Vec<_>>(), vec!["W", "Z"]);
        assert_eq!(tree.lineage("Z"), Some(vec!["X", "Y", "Z"]));
    }

    #[test]
    fn test_tree_without_root_is_invalid() {
        let mut tree = TransmissionTree::new();
        tree.add_vertex("lonely", None);
        assert!(!tree.is_valid());
    }

    #[test]
    fn test_unreachable_vertex_is_invalid() {
        let mut tree = chain();
        tree.add_vertex("stray", None);
        assert!(!tree.is_valid());
    }

    #[test]
    fn test_preorder_keeps_child_order() {
        let tree = chain();
        let labels: Vec<_> = tree.preorder().into_iter().map(|i| tree[i].label().to_string()).collect();
        assert_eq!(labels, vec!["X", "Y", "Z", "W"]);
    }

    #[test]
    fn test_same_shape_ignores_arena_layout() {
        let mut other = TransmissionTree::new();
        let w = other.add_vertex("W", Some(BranchLength::from(4)));
        let z = other.add_vertex("Z", Some(BranchLength::from(2)));
        let y = other.add_vertex("Y", Some(BranchLength::from(1)));
        let x = other.add_vertex("X", None);
        other.attach(y, z);
        other.attach(x, y);
        other.attach(x, w);
        other.set_root(x);

        assert!(chain().same_shape(&other));
        assert_ne!(chain(), other);
    }
}
