//! Cycle breaking by reinfection instances.
//!
//! Edges are processed by ascending time. Whenever a node that already acted
//! as a parent shows up as a child again, the child becomes a new logical
//! node, its [reinfection instance](NodeId::Reinfection) at that time. The
//! instance has no outgoing edges, which severs any cycle through it.
//!
//! Nodes are identified by their rendered label. A later edge naming `X_3`
//! refers to the reinfection instance of `X` at time 3 once that instance
//! exists, and an instance whose label is already taken by a node that
//! acted as a parent is reinfected again (`X_3_3`).

use crate::model::{ForestEdge, NodeId, ResolvedEdge};
use std::collections::{HashMap, HashSet};

// =#========================================================================#=
// CYCLE BREAKER STATE
// =#========================================================================$=
/// Labels that acted as parents so far; append-only.
///
/// Passed into and returned from [break_cycles], so a state can be inspected
/// after a run or carried over to edges arriving later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleBreakerState {
    parent_history: HashSet<NodeId>,
    // Rendered label -> node first seen under it
    nodes: HashMap<String, NodeId>,
}

impl CycleBreakerState {
    /// Creates a state with an empty parent history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `node` has acted as a parent so far.
    pub fn has_been_parent(&self, node: &NodeId) -> bool {
        self.parent_history.contains(node)
    }

    /// Number of distinct parents seen so far.
    pub fn num_parents(&self) -> usize {
        self.parent_history.len()
    }

    /// Processes a single edge, which must not be earlier than any edge
    /// processed before.
    ///
    /// The parent is recorded first. So a self-loop `p -> p` always turns
    /// into `p -> p_t`.
    pub fn process(&mut self, mut edge: ResolvedEdge) -> ForestEdge {
        edge.parent = self.canonical(edge.parent);
        self.parent_history.insert(edge.parent.clone());

        let mut child = self.canonical(edge.child);
        while self.parent_history.contains(&child) {
            let reinfection = self.canonical(NodeId::reinfection(child.clone(), edge.time));
            log::debug!("Reinfection: {child} becomes {reinfection}");
            child = reinfection;
        }
        edge.child = child;

        edge
    }

    /// Returns the node registered under the label of `node`,
    /// registering `node` if the label is new.
    fn canonical(&mut self, node: NodeId) -> NodeId {
        self.nodes.entry(node.label()).or_insert(node).clone()
    }
}

/// Breaks all cycles in `edges`, continuing from `state`.
///
/// # Returns
/// The edges sorted by ascending time (stable, so ties keep their input
/// order) with reinfected children renamed, and the updated state.
pub fn break_cycles(
    mut state: CycleBreakerState,
    mut edges: Vec<ResolvedEdge>,
) -> (Vec<ForestEdge>, CycleBreakerState) {
    edges.sort_by_key(|edge| edge.time);

    let forest_edges: Vec<ForestEdge> = edges
        .into_iter()
        .map(|edge| state.process(edge))
        .collect();

    debug_assert!(topological_order(&forest_edges).is_some());
    (forest_edges, state)
}

/// [break_cycles] starting from an empty parent history.
pub fn break_cycles_fresh(edges: Vec<ResolvedEdge>) -> Vec<ForestEdge> {
    break_cycles(CycleBreakerState::new(), edges).0
}

/// Topologically sorts the nodes of `edges` read as a `parent -> child`
/// graph (Kahn's algorithm, nodes in order of first appearance).
///
/// # Returns
/// `Some(order)` with every node before its children, or `None` if the
/// graph has a cycle.
pub fn topological_order(edges: &[ForestEdge]) -> Option<Vec<NodeId>> {
    let mut nodes: Vec<&NodeId> = Vec::new();
    let mut in_degree: HashMap<&NodeId, usize> = HashMap::new();
    let mut successors: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();

    for edge in edges {
        for node in [&edge.parent, &edge.child] {
            if !in_degree.contains_key(node) {
                in_degree.insert(node, 0);
                nodes.push(node);
            }
        }
        *in_degree.entry(&edge.child).or_default() += 1;
        successors.entry(&edge.parent).or_default().push(&edge.child);
    }

    let mut ready: Vec<&NodeId> = nodes
        .iter()
        .rev()
        .filter(|node| in_degree[*node] == 0)
        .copied()
        .collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(node) = ready.pop() {
        order.push(node.clone());
        for &successor in successors.get(node).into_iter().flatten() {
            let degree = in_degree.entry(successor).or_default();
            *degree -= 1;
            if *degree == 0 {
                ready.push(successor);
            }
        }
    }

    (order.len() == nodes.len()).then_some(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransmissionEdge;

    #[test]
    fn test_three_cycle() {
        let edges = vec![
            TransmissionEdge::new("X", "Y", 1),
            TransmissionEdge::new("Y", "Z", 2),
            TransmissionEdge::new("Z", "X", 3),
        ];
        assert!(topological_order(&edges).is_none());

        let (fixed, state) = break_cycles(CycleBreakerState::new(), edges);
        assert_eq!(fixed[2].child, NodeId::reinfection("X".into(), 3));
        assert_eq!(fixed[2].child.to_string(), "X_3");
        assert_eq!(state.num_parents(), 3);
        assert!(topological_order(&fixed).is_some());
    }

    #[test]
    fn test_sorted_by_time_stable() {
        let edges = vec![
            TransmissionEdge::new("B", "D", 2),
            TransmissionEdge::new("A", "B", 1),
            TransmissionEdge::new("A", "C", 1),
        ];
        let fixed = break_cycles_fresh(edges);
        let times: Vec<_> = fixed.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![1, 1, 2]);
        assert_eq!(fixed[0].child, NodeId::from("B"));
        assert_eq!(fixed[1].child, NodeId::from("C"));
    }

    #[test]
    fn test_child_before_parent_is_not_renamed() {
        // B is infected at 1 and only infects others later: no reinfection
        let edges = vec![
            TransmissionEdge::new("A", "B", 1),
            TransmissionEdge::new("B", "C", 2),
        ];
        let fixed = break_cycles_fresh(edges.clone());
        assert_eq!(fixed, edges);
    }

    #[test]
    fn test_self_loop_is_renamed() {
        let fixed = break_cycles_fresh(vec![TransmissionEdge::new("A", "A", 4)]);
        assert_eq!(fixed[0].child.to_string(), "A_4");
        assert!(topological_order(&fixed).is_some());
    }

    #[test]
    fn test_state_carries_over() {
        let (_, state) = break_cycles(CycleBreakerState::new(), vec![TransmissionEdge::new("A", "B", 1)]);
        assert!(state.has_been_parent(&NodeId::from("A")));
        assert!(!state.has_been_parent(&NodeId::from("B")));

        let (fixed, _) = break_cycles(state, vec![TransmissionEdge::new("C", "A", 9)]);
        assert_eq!(fixed[0].child.to_string(), "A_9");
    }

    #[test]
    fn test_reinfection_referenced_by_label() {
        let edges = vec![
            TransmissionEdge::new("X", "Y", 1),
            TransmissionEdge::new("Y", "X", 3),
            TransmissionEdge::new("X_3", "Z", 5),
        ];
        let fixed = break_cycles_fresh(edges);
        let x3 = NodeId::reinfection("X".into(), 3);
        assert_eq!(fixed[1].child, x3);
        assert_eq!(fixed[2].parent, x3);
        assert!(topological_order(&fixed).is_some());
    }

    #[test]
    fn test_taken_label_is_reinfected_again() {
        // "X_3" already infected W, so X's reinfection at 3 cannot reuse it
        let edges = vec![
            TransmissionEdge::new("X_3", "W", 1),
            TransmissionEdge::new("X", "Y", 2),
            TransmissionEdge::new("Y", "X", 3),
        ];
        let fixed = break_cycles_fresh(edges);
        assert_eq!(fixed[2].child.to_string(), "X_3_3");
        assert!(topological_order(&fixed).is_some());
    }

    #[test]
    fn test_topological_order_parents_first() {
        let edges = vec![
            TransmissionEdge::new("B", "C", 2),
            TransmissionEdge::new("A", "B", 1),
        ];
        let order = topological_order(&edges).unwrap();
        let pos = |label: &str| order.iter().position(|n| n == &NodeId::from(label)).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("B") < pos("C"));
    }
}
