//! Transtree builds transmission trees from timestamped infection logs and
//! writes them as Newick strings.
//!
//! An epidemic simulation logs who infected whom and when, as
//! `(parent, child, time)` edges. Such a log is usually not a tree: the same
//! individual may be infected several times, may be claimed by two parents
//! at once, or may infect its own ancestors. This crate turns the log into a
//! single-rooted tree in three stages:
//! - Conflict resolution: one parent per `(child, time)`, first one wins.
//! - Cycle breaking: an individual infected again after it has infected
//!   others becomes a new node `label_time`.
//! - Forest building: remaining duplicate claims become `label_dup_n`,
//!   and several roots are joined below a synthetic `ROOT`.
//!
//! The result is a [Forest] that can be inspected, converted into an arena
//! [TransmissionTree] or written as Newick. Newick strings can be parsed
//! back into [TransmissionTree]s, and edges can be persisted as edge tables
//! (see [crate::io]).
//!
//! Limitations:
//! - Everything is in memory and single-threaded
//! - Labels are taken as given; no validation against a population
//!
//! # Usage patterns
//! 1. The quick functions [edges_to_newick] and [build_forest] run the
//!    pipeline with default settings.
//! 2. Configure a [TransmissionTreeBuilder] for Newick style and treatment
//!    of seed infections, or run the stages of [crate::pipeline] yourself.
//!
//! ## Example Default Configuration
//! ```
//! use transtree::edges_to_newick;
//! use transtree::model::TransmissionEdge;
//!
//! let edges = vec![
//!     TransmissionEdge::new("X", "Y", 1),
//!     TransmissionEdge::new("Y", "Z", 2),
//!     TransmissionEdge::new("Z", "X", 3),
//! ];
//! assert_eq!(edges_to_newick(&edges).unwrap(), "(((X_3:3.0)Z:2.0)Y:1.0)X;");
//! ```
//!
//! ## Example Builder Configuration
//! ```
//! use transtree::TransmissionTreeBuilder;
//! use transtree::model::SeedPolicy;
//! use transtree::newick::NewickStyle;
//!
//! let log = vec![(None, "1", 0), (Some("1"), "2", 4), (Some("1"), "3", 5)];
//! let builder = TransmissionTreeBuilder::new()
//!     .with_style(NewickStyle::Topology)
//!     .with_seed_policy(SeedPolicy::Skip);
//! let forest = builder.from_log(log)?;
//! assert_eq!(transtree::newick::to_newick(&forest, builder.style()), "(2,3)1;");
//! # Ok::<(), transtree::TransmissionError>(())
//! ```

pub mod error;
pub mod io;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;

pub use crate::error::TransmissionError;
pub use crate::pipeline::TransmissionTreeBuilder;

use crate::model::{Forest, TransmissionEdge, TransmissionTree};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Pipeline API
// ============================================================================
/// Runs the whole pipeline with default settings and returns the [Forest].
///
/// See [`TransmissionTreeBuilder::build`] for full documentation.
pub fn build_forest(edges: &[TransmissionEdge]) -> Result<Forest, TransmissionError> {
    TransmissionTreeBuilder::new().build(edges)
}

/// Runs the whole pipeline with default settings and returns the Newick
/// string with branch lengths.
///
/// See [`TransmissionTreeBuilder::to_newick`] for full documentation.
pub fn edges_to_newick(edges: &[TransmissionEdge]) -> Result<String, TransmissionError> {
    TransmissionTreeBuilder::new().to_newick(edges)
}

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses a Newick string using default settings,
/// returning a [TransmissionTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<TransmissionTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses a file containing a semicolon-separated list of Newick strings
/// using default settings.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<TransmissionTree>, ParsingError> {
    newick::parse_file(path)
}
