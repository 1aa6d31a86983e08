//! Building a single-rooted [Forest] from acyclic edges.

use crate::error::TransmissionError;
use crate::model::{Forest, ForestEdge, NodeId, Time};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

// =#========================================================================#=
// FOREST BUILDER
// =#========================================================================$=
/// Assembles a [Forest] edge by edge.
///
/// # Residual duplicates
/// A label may still be claimed as a child by two different parents after
/// cycle breaking. The first claim keeps the label; every later claim gets a
/// fresh [NodeId::Duplicate] whose ordinal counts up from 1 within this
/// builder, skipping ordinals whose label is already in use. Repeating an
/// existing `parent -> child` edge keeps the first edge and ignores the
/// repeat.
///
/// Nodes are keyed by their rendered label, so an input label `C_dup_1`
/// and the first duplicate of `C` are the same node.
///
/// # Roots
/// Parents that are nobody's child are roots, in the order they first acted
/// as parents. Several roots are joined under [NodeId::SuperRoot] with
/// branch length `0.0`.
///
/// # Example
/// ```
/// use transtree::model::{NodeId, TransmissionEdge};
/// use transtree::pipeline::ForestBuilder;
///
/// let edges = vec![
///     TransmissionEdge::new("A", "B", 1),
///     TransmissionEdge::new("C", "D", 2),
/// ];
/// let forest = ForestBuilder::build(&edges).unwrap();
/// assert_eq!(forest.root(), &NodeId::SuperRoot);
/// assert_eq!(forest.children(&NodeId::SuperRoot).len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ForestBuilder {
    children: IndexMap<NodeId, Vec<NodeId>>,
    times: HashMap<(NodeId, NodeId), Time>,
    parent_of: HashMap<NodeId, NodeId>,
    // Rendered label -> node first inserted under it
    labels: HashMap<String, NodeId>,
    num_duplicates: usize,
    next_ordinal: usize,
}

impl ForestBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for `num_edges` edges.
    pub fn with_capacity(num_edges: usize) -> Self {
        ForestBuilder {
            children: IndexMap::with_capacity(num_edges),
            times: HashMap::with_capacity(num_edges),
            parent_of: HashMap::with_capacity(num_edges),
            labels: HashMap::with_capacity(num_edges),
            num_duplicates: 0,
            next_ordinal: 0,
        }
    }

    /// Builds a forest from `edges` in one pass.
    ///
    /// # Errors
    /// * [TransmissionError::EmptyEdgeList] if `edges` is empty
    /// * [TransmissionError::ZeroRoot] if some labels cannot be reached
    ///   from any root, i.e. the edges were not acyclic
    pub fn build(edges: &[ForestEdge]) -> Result<Forest, TransmissionError> {
        let mut builder = ForestBuilder::with_capacity(edges.len());
        for edge in edges {
            builder.add_edge(edge);
        }
        builder.finish()
    }

    /// Number of later claims renamed to duplicates so far.
    pub fn num_duplicates(&self) -> usize {
        self.num_duplicates
    }

    /// Adds the edge `parent -> child` with the edge's time as branch length.
    ///
    /// # Returns
    /// The child as it was inserted (renamed if it was a duplicate claim),
    /// or `None` if the exact edge was present already.
    pub fn add_edge(&mut self, edge: &ForestEdge) -> Option<NodeId> {
        let parent = self.canonical(edge.parent.clone());
        let mut child = self.canonical(edge.child.clone());

        match self.parent_of.get(&child) {
            Some(existing) if *existing == parent => {
                log::debug!("Ignoring repeated edge {edge}");
                return None;
            }
            Some(existing) => {
                let existing = existing.clone();
                let duplicate = self.fresh_duplicate(&child);
                log::warn!(
                    "Label collision: {} already has parent {existing}, {} claims it at time {}; renamed to {duplicate}",
                    edge.child,
                    edge.parent,
                    edge.time
                );
                child = duplicate;
            }
            None => {}
        }

        self.insert(parent, child.clone(), edge.time);
        Some(child)
    }

    /// Infers the root and returns the finished forest.
    ///
    /// # Errors
    /// See [build](Self::build).
    pub fn finish(mut self) -> Result<Forest, TransmissionError> {
        if self.children.is_empty() {
            return Err(TransmissionError::EmptyEdgeList);
        }

        let mut roots: Vec<NodeId> = self
            .children
            .keys()
            .filter(|parent| !self.parent_of.contains_key(*parent))
            .cloned()
            .collect();

        let root = match roots.len() {
            0 => {
                return Err(TransmissionError::ZeroRoot {
                    num_labels: self.num_labels(),
                });
            }
            1 => roots.swap_remove(0),
            num_roots => {
                log::debug!("Joining {num_roots} roots under {}", NodeId::SuperRoot);
                for root in roots {
                    self.insert(NodeId::SuperRoot, root, 0);
                }
                NodeId::SuperRoot
            }
        };

        let num_unreachable = self.num_labels() - self.count_reachable(&root);
        if num_unreachable > 0 {
            return Err(TransmissionError::ZeroRoot {
                num_labels: num_unreachable,
            });
        }

        log::info!(
            "Built transmission tree rooted at {root} with {} edges ({} duplicate claims renamed)",
            self.times.len(),
            self.num_duplicates
        );
        Ok(Forest::new(self.children, self.times, self.parent_of, root))
    }

    fn insert(&mut self, parent: NodeId, child: NodeId, time: Time) {
        self.parent_of.insert(child.clone(), parent.clone());
        self.times.insert((parent.clone(), child.clone()), time);
        self.children.entry(parent).or_default().push(child);
    }

    /// Returns the node registered under the label of `node`,
    /// registering `node` if the label is new.
    fn canonical(&mut self, node: NodeId) -> NodeId {
        self.labels.entry(node.label()).or_insert(node).clone()
    }

    /// Next duplicate of `base` whose label is not in use yet, registered.
    fn fresh_duplicate(&mut self, base: &NodeId) -> NodeId {
        self.num_duplicates += 1;
        loop {
            self.next_ordinal += 1;
            let duplicate = NodeId::duplicate(base.clone(), self.next_ordinal);
            if !self.labels.contains_key(&duplicate.label()) {
                return self.canonical(duplicate);
            }
        }
    }

    /// Number of distinct labels, parents and children.
    fn num_labels(&self) -> usize {
        self.children
            .keys()
            .chain(self.parent_of.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    fn count_reachable(&self, root: &NodeId) -> usize {
        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let Some(kids) = self.children.get(node) {
                stack.extend(kids.iter());
            }
        }
        visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BranchLength, TransmissionEdge};

    #[test]
    fn test_single_root() {
        let edges = vec![
            TransmissionEdge::new("X", "Y", 1),
            TransmissionEdge::new("Y", "Z", 2),
        ];
        let forest = ForestBuilder::build(&edges).unwrap();
        assert_eq!(forest.root(), &NodeId::from("X"));
        assert!(!forest.has_super_root());
        assert_eq!(forest.children(&"X".into()), &[NodeId::from("Y")]);
        assert_eq!(forest.branch_length(&"Y".into(), &"Z".into()), Some(BranchLength::from(2)));
        assert_eq!(forest.num_nodes(), 3);
    }

    #[test]
    fn test_super_root_in_order_of_first_appearance() {
        let edges = vec![
            TransmissionEdge::new("R", "S", 1),
            TransmissionEdge::new("M", "N", 2),
        ];
        let forest = ForestBuilder::build(&edges).unwrap();
        assert_eq!(forest.root(), &NodeId::SuperRoot);
        assert_eq!(forest.children(&NodeId::SuperRoot), &[NodeId::from("R"), NodeId::from("M")]);
        assert_eq!(
            forest.branch_length(&NodeId::SuperRoot, &"M".into()),
            Some(BranchLength::ZERO)
        );
    }

    #[test]
    fn test_second_parent_claim_is_renamed() {
        let edges = vec![
            TransmissionEdge::new("A", "C", 1),
            TransmissionEdge::new("B", "C", 2),
            TransmissionEdge::new("D", "C", 3),
        ];
        let mut builder = ForestBuilder::new();
        let inserted: Vec<_> = edges.iter().map(|e| builder.add_edge(e)).collect();
        assert_eq!(builder.num_duplicates(), 2);
        assert_eq!(inserted[0], Some(NodeId::from("C")));
        assert_eq!(inserted[1].as_ref().map(|n| n.to_string()), Some("C_dup_1".to_string()));
        assert_eq!(inserted[2].as_ref().map(|n| n.to_string()), Some("C_dup_2".to_string()));

        let forest = builder.finish().unwrap();
        assert_eq!(forest.parent(&"C".into()), Some(&NodeId::from("A")));
    }

    #[test]
    fn test_duplicate_skips_taken_label() {
        let edges = vec![
            TransmissionEdge::new("X", "C_dup_1", 0),
            TransmissionEdge::new("A", "C", 1),
            TransmissionEdge::new("B", "C", 2),
        ];
        let forest = ForestBuilder::build(&edges).unwrap();
        let labels: Vec<String> = forest.edges().map(|(e, _)| e.child.to_string()).collect();
        assert!(labels.contains(&"C_dup_2".to_string()));
        assert_eq!(labels.iter().filter(|l| *l == "C_dup_1").count(), 1);
        assert_eq!(forest.parent(&"C_dup_1".into()), Some(&NodeId::from("X")));
    }

    #[test]
    fn test_edges_keep_original_times() {
        let edges = vec![
            TransmissionEdge::new("R", "S", -3),
            TransmissionEdge::new("M", "N", 7),
        ];
        let forest = ForestBuilder::build(&edges).unwrap();
        let times: Vec<(String, i64)> = forest
            .edges()
            .map(|(e, _)| (e.child.to_string(), e.time))
            .collect();
        assert_eq!(
            times,
            vec![
                ("S".to_string(), -3),
                ("N".to_string(), 7),
                ("R".to_string(), 0),
                ("M".to_string(), 0)
            ]
        );
        assert_eq!(forest.time(&"R".into(), &"S".into()), Some(-3));
        assert_eq!(forest.parent(&"R".into()), Some(&NodeId::SuperRoot));
        assert_eq!(forest.parent(&NodeId::SuperRoot), None);
    }

    #[test]
    fn test_repeated_edge_keeps_first() {
        let edges = vec![
            TransmissionEdge::new("A", "B", 1),
            TransmissionEdge::new("A", "B", 4),
        ];
        let forest = ForestBuilder::build(&edges).unwrap();
        assert_eq!(forest.children(&"A".into()).len(), 1);
        assert_eq!(forest.branch_length(&"A".into(), &"B".into()), Some(BranchLength::from(1)));
    }

    #[test]
    fn test_zero_root() {
        let edges = vec![
            TransmissionEdge::new("A", "B", 1),
            TransmissionEdge::new("B", "A", 2),
        ];
        let result = ForestBuilder::build(&edges);
        assert!(matches!(result, Err(TransmissionError::ZeroRoot { num_labels: 2 })));
    }

    #[test]
    fn test_rootless_component() {
        let edges = vec![
            TransmissionEdge::new("R", "S", 1),
            TransmissionEdge::new("A", "B", 2),
            TransmissionEdge::new("B", "A", 3),
        ];
        let result = ForestBuilder::build(&edges);
        assert!(matches!(result, Err(TransmissionError::ZeroRoot { num_labels: 2 })));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(ForestBuilder::build(&[]), Err(TransmissionError::EmptyEdgeList)));
    }
}
