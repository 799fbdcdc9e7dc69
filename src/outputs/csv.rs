//! Flat table export.
//!
//! The header row is always written, so a run that collected nothing still
//! produces a file with the eight column names and no data rows.

use crate::error::SerializationError;
use crate::models::{OutletRecord, OutletRow, Table};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub const CSV_FILENAME: &str = "allsides_bias.csv";

/// Project records onto the fixed export columns.
pub fn to_table(records: &[OutletRecord]) -> Table {
    let table = Table {
        rows: records.iter().map(OutletRow::from).collect(),
    };
    if table.is_empty() {
        warn!(target: "main", "No records to tabulate");
    } else {
        info!(target: "main", rows = table.len(), "Table built");
    }
    table
}

fn write_table(table: &Table, csv_output_dir: &Path) -> Result<PathBuf, SerializationError> {
    fs::create_dir_all(csv_output_dir)?;
    let path = csv_output_dir.join(CSV_FILENAME);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)?;
    writer.write_record(table.columns())?;
    for row in &table.rows {
        debug!(target: "main", ?row, "Writing row");
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}

/// Write `table` to `{csv_output_dir}/allsides_bias.csv`.
///
/// Returns the written path, or `None` after logging a warning.
#[instrument(target = "main", level = "info", skip(table), fields(rows = table.len()))]
pub fn persist_table(table: &Table, csv_output_dir: &Path) -> Option<PathBuf> {
    match write_table(table, csv_output_dir) {
        Ok(path) => {
            info!(target: "main", path = %path.display(), "CSV saved");
            Some(path)
        }
        Err(e) => {
            warn!(target: "main", error = %e, "Error saving table to CSV");
            None
        }
    }
}
