//! Output sinks: CSV file and console.

use crate::error::Result;
use crate::record::Record;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Width of the divider printed before each console record
const DIVIDER_WIDTH: usize = 40;

/// What [`save_to_csv`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to write; no file was created
    NoData,
    /// File written with this many data rows
    Written(usize),
}

impl SaveOutcome {
    /// User-facing notice for this outcome.
    pub fn message(&self, path: &Path) -> String {
        match self {
            SaveOutcome::NoData => "No data to write.".to_string(),
            SaveOutcome::Written(count) => {
                format!("Saved {} records to {}", count, path.display())
            }
        }
    }
}

/// Save records to a CSV file: one header row, then one row per record.
///
/// An empty slice leaves the filesystem untouched and returns
/// [`SaveOutcome::NoData`].
pub fn save_to_csv(records: &[Record], path: &Path) -> Result<SaveOutcome> {
    if records.is_empty() {
        return Ok(SaveOutcome::NoData);
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    debug!(path = ?path, rows = records.len(), "Saved CSV");
    Ok(SaveOutcome::Written(records.len()))
}

/// Print each record as a divider line followed by `Key: value` lines.
pub fn print_records<W: Write>(out: &mut W, records: &[Record]) -> Result<()> {
    let divider = "-".repeat(DIVIDER_WIDTH);

    for record in records {
        writeln!(out, "{}", divider)?;
        for (key, value) in record.fields() {
            writeln!(out, "{}: {}", key, value)?;
        }
    }

    out.flush()?;
    Ok(())
}
