//! Node identifiers of transmission trees.
//!
//! A [NodeId] is either a label taken verbatim from the transmission log or
//! one of the synthetic nodes the pipeline introduces:
//! - [NodeId::Reinfection] for a later infection of a node that already
//!   acted as an ancestor, rendered `{base}_{time}`
//! - [NodeId::Duplicate] for a residual second parent claim on the same
//!   label, rendered `{base}_dup_{ordinal}`
//! - [NodeId::SuperRoot] joining several roots, rendered [SUPER_ROOT_LABEL]
//!
//! Equality of [NodeId] values is structural: `NodeId::original("X_3")` is
//! not equal to the reinfection of `X` at time 3. The pipeline stages key
//! nodes by their rendered [label](NodeId::label) though, so an input label
//! `X_3` and that reinfection end up as the same tree node.

use crate::model::edge::Time;
use std::fmt;

/// Label under which the synthetic super-root is displayed.
pub const SUPER_ROOT_LABEL: &str = "ROOT";

// =#========================================================================#=
// NODE ID
// =#========================================================================$=
/// Identifier of a node in a transmission forest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// Label as found in the transmission log
    Original(String),
    /// Node that was infected again after having infected others
    Reinfection {
        /// The node that got reinfected
        base: Box<NodeId>,
        /// Time of the reinfection
        time: Time,
    },
    /// Later claim on a label that already has a different parent
    Duplicate {
        /// The label that was claimed twice
        base: Box<NodeId>,
        /// Disambiguator, unique within one build pass
        ordinal: usize,
    },
    /// Synthetic root above several otherwise disconnected roots
    SuperRoot,
}

impl NodeId {
    /// Creates an [NodeId::Original] from a label.
    pub fn original(label: impl Into<String>) -> Self {
        NodeId::Original(label.into())
    }

    /// Creates the reinfection instance of `base` at `time`.
    pub fn reinfection(base: NodeId, time: Time) -> Self {
        NodeId::Reinfection {
            base: Box::new(base),
            time,
        }
    }

    /// Creates the `ordinal`-th duplicate of `base`.
    pub fn duplicate(base: NodeId, ordinal: usize) -> Self {
        NodeId::Duplicate {
            base: Box::new(base),
            ordinal,
        }
    }

    /// Returns whether this node was introduced by the pipeline
    /// rather than taken from the log.
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, NodeId::Original(_))
    }

    /// Returns the label from the log this node ultimately derives from,
    /// or `None` for the super-root.
    pub fn origin(&self) -> Option<&str> {
        match self {
            NodeId::Original(label) => Some(label),
            NodeId::Reinfection { base, .. } | NodeId::Duplicate { base, .. } => base.origin(),
            NodeId::SuperRoot => None,
        }
    }

    /// Returns the rendered label, as used in Newick output.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Original(label) => write!(f, "{label}"),
            NodeId::Reinfection { base, time } => write!(f, "{base}_{time}"),
            NodeId::Duplicate { base, ordinal } => write!(f, "{base}_dup_{ordinal}"),
            NodeId::SuperRoot => write!(f, "{SUPER_ROOT_LABEL}"),
        }
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        NodeId::Original(label.to_string())
    }
}

impl From<String> for NodeId {
    fn from(label: String) -> Self {
        NodeId::Original(label)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId::Original(id.to_string())
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId::Original(id.to_string())
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId::Original(id.to_string())
    }
}
