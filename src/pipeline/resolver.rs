//! Conflict resolution: one parent per child and time.

use crate::model::{NodeId, ResolvedEdge, Time, TransmissionEdge};
use std::collections::HashSet;

/// Collapses edges sharing the same `(child, time)` key.
///
/// When several parents claim the same child at the same time, the edge
/// listed first in `edges` wins unconditionally; parent identity plays no
/// role. Edges for the same child at different times are all kept, cycles
/// are left for the [cycle breaker](crate::pipeline::break_cycles).
///
/// # Returns
/// One edge per distinct key, ordered by the first appearance of each key.
pub fn resolve_conflicts(edges: &[TransmissionEdge]) -> Vec<ResolvedEdge> {
    let mut seen: HashSet<(&NodeId, Time)> = HashSet::with_capacity(edges.len());
    let mut resolved = Vec::with_capacity(edges.len());

    for edge in edges {
        if seen.insert(edge.conflict_key()) {
            resolved.push(edge.clone());
        } else {
            log::debug!("Dropping conflicting edge {edge}");
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_parent_wins() {
        let edges = vec![
            TransmissionEdge::new("N", "P", 3),
            TransmissionEdge::new("O", "P", 3),
            TransmissionEdge::new("A", "P", 3),
        ];
        assert_eq!(resolve_conflicts(&edges), vec![TransmissionEdge::new("N", "P", 3)]);
    }

    #[test]
    fn test_first_parent_wins_regardless_of_identity() {
        let edges = vec![
            TransmissionEdge::new("Z", "P", 3),
            TransmissionEdge::new("A", "P", 3),
        ];
        assert_eq!(resolve_conflicts(&edges)[0].parent, NodeId::from("Z"));
    }

    #[test]
    fn test_different_times_are_kept() {
        let edges = vec![
            TransmissionEdge::new("A", "B", 1),
            TransmissionEdge::new("C", "B", 2),
        ];
        assert_eq!(resolve_conflicts(&edges), edges);
    }

    #[test]
    fn test_order_of_first_appearance() {
        let edges = vec![
            TransmissionEdge::new("A", "B", 5),
            TransmissionEdge::new("A", "C", 1),
            TransmissionEdge::new("D", "B", 5),
            TransmissionEdge::new("B", "E", 7),
        ];
        assert_eq!(resolve_conflicts(&edges), vec![
            TransmissionEdge::new("A", "B", 5),
            TransmissionEdge::new("A", "C", 1),
            TransmissionEdge::new("B", "E", 7),
        ]);
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve_conflicts(&[]).is_empty());
    }
}
