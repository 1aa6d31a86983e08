//! Error type for building transmission trees.
//!
//! [TransmissionError] covers everything that aborts a pipeline run.
//! Renaming events (reinfections, duplicate children) are not errors,
//! they are logged and resolved in place.

use thiserror::Error;

// =#========================================================================#=
// TRANSMISSION ERROR
// =#========================================================================$=
/// Errors that abort building a transmission tree.
///
/// No partial output is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum TransmissionError {
    /// An edge without a usable parent or child reached the core,
    /// e.g. a seed infection that was not filtered out.
    #[error("Malformed edge at index {index} - {reason}")]
    MalformedEdge {
        /// Position of the offending record in the input sequence
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Every label appears as a child somewhere, so no root exists.
    #[error("No root found among {num_labels} labels (every label appears as a child)")]
    ZeroRoot {
        /// Number of distinct labels seen while building
        num_labels: usize,
    },

    /// There are no edges to build a tree from.
    #[error("Cannot build a transmission tree from an empty edge list")]
    EmptyEdgeList,

    /// A row of an edge table could not be read.
    #[error("Invalid edge record on line {line} - {reason}")]
    InvalidRecord {
        /// 1-based line number in the table
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Reading or writing failed.
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),

    /// An edge table could not be parsed as CSV, e.g. it is not UTF-8.
    #[error("CSV error - {0}")]
    Csv(#[from] csv::Error),
}

impl TransmissionError {
    /// Convenience constructor for [TransmissionError::MalformedEdge]
    pub fn malformed_edge(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEdge {
            index,
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [TransmissionError::InvalidRecord]
    pub fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }
}
