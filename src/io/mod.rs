//! Reading and writing edge tables.
//!
//! Edge tables persist the edges of a run, e.g. the output of
//! [TransmissionTreeBuilder::forest_edges](crate::pipeline::TransmissionTreeBuilder::forest_edges),
//! so a tree can be rebuilt later. Newick output lives in [crate::newick].

mod edge_table;

pub use self::edge_table::{
    EdgeTableWriter, read_edge_table, read_edge_table_file, write_edge_table, write_edge_table_file,
};
