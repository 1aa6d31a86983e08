//! Data model for transmission trees.
//!
//! # Nodes and edges
//! - [NodeId] distinguishes labels from the log and the synthetic nodes the
//!   pipeline introduces (reinfections, duplicates, super-root).
//! - [TransmissionEdge] is a timestamped `parent -> child` edge; the aliases
//!   [ResolvedEdge] and [ForestEdge] name the pipeline stage behind a
//!   sequence of them.
//!
//! # Trees
//! | Type | Representation | Use case |
//! |------|----------------|----------|
//! | [Forest] | [NodeId] adjacency + branch-length map | Output of the pipeline, Newick writing |
//! | [TransmissionTree] | Arena of [Vertex] with string labels | Structured consumers, parsed Newick |

pub mod edge;
pub mod forest;
pub mod node_id;
pub mod tree;
pub mod vertex;

pub use edge::{EDGE_TABLE_HEADER, ForestEdge, ResolvedEdge, SeedPolicy, Time, TransmissionEdge, edges_from_log};
pub use forest::Forest;
pub use node_id::{NodeId, SUPER_ROOT_LABEL};
pub use tree::{TransmissionTree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
