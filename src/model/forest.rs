//! Adjacency representation of a built transmission tree.

use crate::model::edge::{ForestEdge, Time};
use crate::model::node_id::NodeId;
use crate::model::tree::{TransmissionTree, VertexIndex};
use crate::model::vertex::BranchLength;
use indexmap::IndexMap;
use std::collections::HashMap;

// =#========================================================================#=
// FOREST
// =#========================================================================$=
/// Single-rooted transmission tree as produced by
/// [ForestBuilder](crate::pipeline::ForestBuilder).
///
/// Holds a children mapping in insertion order (parents in the order they
/// first acted as parents, children in the order their edges were seen),
/// the time of every `(parent, child)` edge, the parent of every non-root
/// node and the root, which is either a real node or [NodeId::SuperRoot].
///
/// A forest is built once and not mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    children: IndexMap<NodeId, Vec<NodeId>>,
    times: HashMap<(NodeId, NodeId), Time>,
    parent_of: HashMap<NodeId, NodeId>,
    root: NodeId,
}

impl Forest {
    pub(crate) fn new(
        children: IndexMap<NodeId, Vec<NodeId>>,
        times: HashMap<(NodeId, NodeId), Time>,
        parent_of: HashMap<NodeId, NodeId>,
        root: NodeId,
    ) -> Self {
        Forest {
            children,
            times,
            parent_of,
            root,
        }
    }

    /// The single root, real or [NodeId::SuperRoot].
    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Returns whether a synthetic super-root joins several roots.
    pub fn has_super_root(&self) -> bool {
        self.root == NodeId::SuperRoot
    }

    /// Children of `node` in insertion order; empty for leaves.
    pub fn children(&self, node: &NodeId) -> &[NodeId] {
        self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The full children mapping, parents in insertion order.
    pub fn children_map(&self) -> &IndexMap<NodeId, Vec<NodeId>> {
        &self.children
    }

    /// Time of the edge `parent -> child`, if that edge exists.
    /// Super-root edges have time `0`.
    pub fn time(&self, parent: &NodeId, child: &NodeId) -> Option<Time> {
        self.times.get(&(parent.clone(), child.clone())).copied()
    }

    /// Branch length of the edge `parent -> child`, if that edge exists.
    pub fn branch_length(&self, parent: &NodeId, child: &NodeId) -> Option<BranchLength> {
        self.time(parent, child).map(BranchLength::from)
    }

    /// Returns whether `node` has no children.
    pub fn is_leaf(&self, node: &NodeId) -> bool {
        self.children(node).is_empty()
    }

    /// Number of nodes, synthetic ones included.
    pub fn num_nodes(&self) -> usize {
        self.times.len() + 1
    }

    /// Number of edges, super-root edges included.
    pub fn num_edges(&self) -> usize {
        self.times.len()
    }

    /// Returns the parent of `node`, `None` for the root or unknown nodes.
    pub fn parent(&self, node: &NodeId) -> Option<&NodeId> {
        self.parent_of.get(node)
    }

    /// All edges in insertion order with their original times and the
    /// branch lengths derived from them.
    ///
    /// Super-root edges are included with time `0`; convert with
    /// [TransmissionEdge::to_row](crate::model::TransmissionEdge::to_row)
    /// for tabular output.
    pub fn edges(&self) -> impl Iterator<Item = (ForestEdge, BranchLength)> + '_ {
        self.children.iter().flat_map(move |(parent, kids)| {
            kids.iter().map(move |child| {
                let time = self.time(parent, child).unwrap_or_default();
                let edge = ForestEdge {
                    parent: parent.clone(),
                    child: child.clone(),
                    time,
                };
                (edge, BranchLength::from(time))
            })
        })
    }

    /// Converts this forest into an arena [TransmissionTree] with rendered
    /// labels; the root gets no branch length.
    pub fn to_tree(&self) -> TransmissionTree {
        let mut tree = TransmissionTree::with_capacity(self.num_nodes());
        let root = tree.add_vertex(self.root.label(), None);
        tree.set_root(root);

        let mut stack: Vec<(&NodeId, VertexIndex)> = vec![(&self.root, root)];
        while let Some((node, index)) = stack.pop() {
            let mut pending = Vec::with_capacity(self.children(node).len());
            for child in self.children(node) {
                let child_index = tree.add_vertex(child.label(), self.branch_length(node, child));
                tree.attach(index, child_index);
                pending.push((child, child_index));
            }
            stack.extend(pending.into_iter().rev());
        }

        tree
    }
}
