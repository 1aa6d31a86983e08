//! Timestamped transmission edges.
//!
//! The same [TransmissionEdge] struct flows through every stage of the
//! pipeline. The aliases [ResolvedEdge] and [ForestEdge] only name which
//! stage produced a sequence.

use crate::error::TransmissionError;
use crate::model::node_id::NodeId;
use std::fmt;

/// Time of a transmission, as reported by the simulation (e.g. day).
pub type Time = i64;

/// Column header of persisted edge tables.
pub const EDGE_TABLE_HEADER: [&str; 3] = ["Parent", "Child", "Origin_time"];

// =#========================================================================#=
// TRANSMISSION EDGE
// =#========================================================================$=
/// Directed edge recording that `parent` infected `child` at `time`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransmissionEdge {
    /// The infecting node
    pub parent: NodeId,
    /// The infected node
    pub child: NodeId,
    /// Time of infection, used as sort key and branch length
    pub time: Time,
}

/// Edge after conflict resolution: at most one per `(child, time)`.
pub type ResolvedEdge = TransmissionEdge;

/// Edge after cycle breaking: the edge set is acyclic.
pub type ForestEdge = TransmissionEdge;

impl TransmissionEdge {
    /// Creates a new edge.
    pub fn new(parent: impl Into<NodeId>, child: impl Into<NodeId>, time: Time) -> Self {
        TransmissionEdge {
            parent: parent.into(),
            child: child.into(),
            time,
        }
    }

    /// Converts a raw log record into an edge.
    ///
    /// # Arguments
    /// * `index` - Position of the record in the log, reported on error
    /// * `parent` - Infecting node; `None` for seed infections
    /// * `child` - Infected node
    /// * `time` - Time of infection
    ///
    /// # Errors
    /// [TransmissionError::MalformedEdge] if the parent is missing or a
    /// label is empty. Seed infections have to be filtered before they
    /// reach this point.
    pub fn try_from_record<P, C>(
        index: usize,
        parent: Option<P>,
        child: C,
        time: Time,
    ) -> Result<Self, TransmissionError>
    where
        P: Into<String>,
        C: Into<String>,
    {
        let parent = parent
            .map(Into::into)
            .ok_or_else(|| TransmissionError::malformed_edge(index, "missing parent (seed infection?)"))?;
        let child = child.into();

        if parent.trim().is_empty() {
            return Err(TransmissionError::malformed_edge(index, "empty parent label"));
        }
        if child.trim().is_empty() {
            return Err(TransmissionError::malformed_edge(index, "empty child label"));
        }

        Ok(TransmissionEdge::new(parent, child, time))
    }

    /// Key under which conflicting edges are collapsed.
    pub fn conflict_key(&self) -> (&NodeId, Time) {
        (&self.child, self.time)
    }

    /// Returns the edge as the three cells `Parent, Child, Origin_time`.
    pub fn to_row(&self) -> [String; 3] {
        [
            self.parent.to_string(),
            self.child.to_string(),
            self.time.to_string(),
        ]
    }
}

impl fmt::Display for TransmissionEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} @ {}", self.parent, self.child, self.time)
    }
}

impl<P, C> From<(P, C, Time)> for TransmissionEdge
where
    P: Into<NodeId>,
    C: Into<NodeId>,
{
    fn from((parent, child, time): (P, C, Time)) -> Self {
        TransmissionEdge::new(parent, child, time)
    }
}

// =#========================================================================#=
// SEED POLICY
// =#========================================================================$=
/// How records without a parent (seed infections) are treated when
/// converting a raw log with [edges_from_log].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Silently drop seed infections (they have no parent to link to)
    #[default]
    Skip,
    /// Fail with [TransmissionError::MalformedEdge]
    Reject,
}

/// Converts raw `(parent, child, time)` records into edges.
///
/// # Arguments
/// * `records` - Records in log order; seeds have `None` as parent
/// * `policy` - Whether seeds are skipped or rejected
///
/// # Errors
/// [TransmissionError::MalformedEdge] for rejected seeds and empty labels.
pub fn edges_from_log<I, P, C>(
    records: I,
    policy: SeedPolicy,
) -> Result<Vec<TransmissionEdge>, TransmissionError>
where
    I: IntoIterator<Item = (Option<P>, C, Time)>,
    P: Into<String>,
    C: Into<String>,
{
    let mut edges = Vec::new();
    let mut num_seeds = 0;
    for (index, (parent, child, time)) in records.into_iter().enumerate() {
        if parent.is_none() && policy == SeedPolicy::Skip {
            num_seeds += 1;
            continue;
        }
        edges.push(TransmissionEdge::try_from_record(index, parent, child, time)?);
    }

    if num_seeds > 0 {
        log::debug!("Skipped {num_seeds} seed infection(s) without parent");
    }
    Ok(edges)
}
