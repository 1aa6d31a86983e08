//! Edge tables: transmission edges persisted as CSV.
//!
//! The first line is the header `Parent,Child,Origin_time`, followed by one
//! row per edge. Seed infections are stored with an empty parent cell.
//! Quoting follows RFC 4180, so labels may contain commas, double quotes
//! and line breaks.

use crate::error::TransmissionError;
use crate::model::{EDGE_TABLE_HEADER, SeedPolicy, Time, TransmissionEdge};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

// =#========================================================================#=
// EDGE TABLE WRITER
// =#========================================================================$=
/// Writes transmission edges as an edge table.
///
/// # Example
/// ```
/// use transtree::io::EdgeTableWriter;
/// use transtree::model::TransmissionEdge;
///
/// let mut out = Vec::new();
/// EdgeTableWriter::new(&mut out)
///     .write_edges(&[TransmissionEdge::new("X", "Y", 1)])
///     .unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "Parent,Child,Origin_time\nX,Y,1\n");
/// ```
pub struct EdgeTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

// ============================================================================
// API
// ============================================================================
impl<W: Write> EdgeTableWriter<W> {
    /// Creates a writer on top of `writer`. Output is buffered internally.
    pub fn new(writer: W) -> Self {
        EdgeTableWriter {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Writes the header and one row per edge, then flushes.
    ///
    /// # Errors
    /// [TransmissionError::Csv] or [TransmissionError::Io] if writing fails.
    pub fn write_edges(&mut self, edges: &[TransmissionEdge]) -> Result<(), TransmissionError> {
        self.writer.write_record(EDGE_TABLE_HEADER)?;
        for edge in edges {
            self.writer.write_record(edge.to_row())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes `edges` as an edge table to `writer`.
///
/// # Errors
/// Returns [TransmissionError::Csv] or [TransmissionError::Io] if writing
/// fails.
pub fn write_edge_table<W: Write>(writer: W, edges: &[TransmissionEdge]) -> Result<(), TransmissionError> {
    EdgeTableWriter::new(writer).write_edges(edges)
}

/// Writes `edges` as an edge table to a new file at `path`.
///
/// # Errors
/// Returns [TransmissionError::Io] if creating the file fails, otherwise
/// see [write_edge_table].
pub fn write_edge_table_file<P: AsRef<Path>>(path: P, edges: &[TransmissionEdge]) -> Result<(), TransmissionError> {
    write_edge_table(File::create(path)?, edges)
}

// =#========================================================================#=
// EDGE TABLE READER
// =#========================================================================$=
/// Reads an edge table.
///
/// Blank lines are skipped. Rows with an empty parent cell are seed
/// infections and are dropped or rejected according to `seed_policy`.
///
/// # Arguments
/// * `reader` - Source of the table, starting with the header line
/// * `seed_policy` - Treatment of rows without parent
///
/// # Errors
/// * [TransmissionError::InvalidRecord] for a missing or wrong header, rows
///   without exactly three cells, empty child cells, times that are not
///   integers and rejected seeds. Lines are those where the row starts.
/// * [TransmissionError::Csv] if the input is not valid CSV
///
/// # Example
/// ```
/// use transtree::io::read_edge_table;
/// use transtree::model::{SeedPolicy, TransmissionEdge};
///
/// let table = "Parent,Child,Origin_time\n,1,0\n1,2,3\n";
/// let edges = read_edge_table(table.as_bytes(), SeedPolicy::Skip).unwrap();
/// assert_eq!(edges, vec![TransmissionEdge::new("1", "2", 3)]);
/// ```
pub fn read_edge_table<R: Read>(reader: R, seed_policy: SeedPolicy) -> Result<Vec<TransmissionEdge>, TransmissionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = reader.headers()?;
    if header.is_empty() {
        return Err(TransmissionError::invalid_record(1, "missing header"));
    }
    if header.iter().ne(EDGE_TABLE_HEADER) {
        return Err(TransmissionError::invalid_record(
            1,
            format!("expected header {:?}, found {:?}", EDGE_TABLE_HEADER.join(","), header.iter().collect::<Vec<_>>().join(",")),
        ));
    }

    let mut edges = Vec::new();
    let mut num_seeds = 0;
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line() as usize);

        if record.len() != EDGE_TABLE_HEADER.len() {
            return Err(TransmissionError::invalid_record(
                line,
                format!("expected {} cells, found {}", EDGE_TABLE_HEADER.len(), record.len()),
            ));
        }
        let (parent, child, time) = (&record[0], &record[1], &record[2]);

        if child.trim().is_empty() {
            return Err(TransmissionError::invalid_record(line, "empty child label"));
        }
        let time: Time = time
            .trim()
            .parse()
            .map_err(|_| TransmissionError::invalid_record(line, format!("invalid time {:?}", time)))?;

        if parent.trim().is_empty() {
            match seed_policy {
                SeedPolicy::Skip => {
                    num_seeds += 1;
                    continue;
                }
                SeedPolicy::Reject => {
                    return Err(TransmissionError::invalid_record(line, "seed infection without parent"));
                }
            }
        }
        edges.push(TransmissionEdge::new(parent, child, time));
    }

    if num_seeds > 0 {
        log::debug!("Skipped {num_seeds} seed row(s) in edge table");
    }
    log::debug!("Read {} edges from edge table", edges.len());
    Ok(edges)
}

/// Reads an edge table from the file at `path`, see [read_edge_table].
pub fn read_edge_table_file<P: AsRef<Path>>(path: P, seed_policy: SeedPolicy) -> Result<Vec<TransmissionEdge>, TransmissionError> {
    read_edge_table(File::open(path)?, seed_policy)
}
