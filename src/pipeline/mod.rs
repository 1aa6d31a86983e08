//! Pipeline from raw transmission edges to a single-rooted tree.
//!
//! Three stages, each consuming the output of the previous one:
//! 1. [resolve_conflicts] - one parent per `(child, time)`, first one wins
//! 2. [break_cycles] - reinfected ancestors become new nodes `label_time`
//! 3. [ForestBuilder] - adjacency, duplicate claims, root inference
//!
//! [TransmissionTreeBuilder] runs all three (and optionally the Newick
//! writer) with one configuration.
//!
//! # Example
//! ```
//! use transtree::model::TransmissionEdge;
//! use transtree::newick::NewickStyle;
//! use transtree::pipeline::TransmissionTreeBuilder;
//!
//! let edges = vec![
//!     TransmissionEdge::new("X", "Y", 1),
//!     TransmissionEdge::new("Y", "Z", 2),
//!     TransmissionEdge::new("Z", "X", 3),
//! ];
//! let newick = TransmissionTreeBuilder::new()
//!     .with_style(NewickStyle::Topology)
//!     .to_newick(&edges)
//!     .unwrap();
//! assert_eq!(newick, "(((X_3)Z)Y)X;");
//! ```

mod cycle_breaker;
mod forest_builder;
mod resolver;

pub use self::cycle_breaker::{CycleBreakerState, break_cycles, break_cycles_fresh, topological_order};
pub use self::forest_builder::ForestBuilder;
pub use self::resolver::resolve_conflicts;

use crate::error::TransmissionError;
use crate::model::{Forest, ForestEdge, SeedPolicy, Time, TransmissionEdge, edges_from_log};
use crate::newick::{self, NewickStyle};

// =#========================================================================#=
// TRANSMISSION TREE BUILDER
// =#========================================================================$=
/// Configuration for running the whole pipeline.
///
/// # Configuration
/// * [`with_style(style)`](Self::with_style)
///     - [NewickStyle] used by [to_newick](Self::to_newick)
///       (default: with branch lengths)
/// * [`with_seed_policy(policy)`](Self::with_seed_policy)
///     - How [from_log](Self::from_log) treats records without parent
///       (default: skip them)
///
/// # Running
/// * [`forest_edges`](Self::forest_edges) - stages 1 and 2
/// * [`build`](Self::build) - all stages, returns a [Forest]
/// * [`to_newick`](Self::to_newick) - all stages plus Newick writing
/// * [`from_log`](Self::from_log) - like `build`, starting from raw records
#[derive(Debug, Clone, Copy, Default)]
pub struct TransmissionTreeBuilder {
    style: NewickStyle,
    seed_policy: SeedPolicy,
}

impl TransmissionTreeBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Newick style used by [to_newick](Self::to_newick).
    pub fn with_style(mut self, style: NewickStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets how seed infections are treated by [from_log](Self::from_log).
    pub fn with_seed_policy(mut self, seed_policy: SeedPolicy) -> Self {
        self.seed_policy = seed_policy;
        self
    }

    /// Configured Newick style.
    pub fn style(&self) -> NewickStyle {
        self.style
    }

    /// Configured seed policy.
    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }

    /// Resolves conflicts and breaks cycles.
    ///
    /// # Returns
    /// The acyclic edges sorted by time, ready for the [ForestBuilder]
    /// or for persisting.
    pub fn forest_edges(&self, edges: &[TransmissionEdge]) -> Vec<ForestEdge> {
        let resolved = resolve_conflicts(edges);
        log::debug!(
            "Resolved {} edges to {} ({} conflicts dropped)",
            edges.len(),
            resolved.len(),
            edges.len() - resolved.len()
        );
        break_cycles_fresh(resolved)
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    /// [TransmissionError::EmptyEdgeList] or [TransmissionError::ZeroRoot],
    /// see [ForestBuilder::build].
    pub fn build(&self, edges: &[TransmissionEdge]) -> Result<Forest, TransmissionError> {
        ForestBuilder::build(&self.forest_edges(edges))
    }

    /// Runs the whole pipeline and writes the tree as Newick string.
    pub fn to_newick(&self, edges: &[TransmissionEdge]) -> Result<String, TransmissionError> {
        let forest = self.build(edges)?;
        Ok(newick::to_newick(&forest, self.style))
    }

    /// Runs the whole pipeline on raw `(parent, child, time)` records,
    /// where seed infections have no parent.
    ///
    /// # Errors
    /// Additionally to [build](Self::build),
    /// [TransmissionError::MalformedEdge] for rejected seeds or empty labels.
    pub fn from_log<I, P, C>(&self, records: I) -> Result<Forest, TransmissionError>
    where
        I: IntoIterator<Item = (Option<P>, C, Time)>,
        P: Into<String>,
        C: Into<String>,
    {
        let edges = edges_from_log(records, self.seed_policy)?;
        self.build(&edges)
    }
}
