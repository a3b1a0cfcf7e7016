//! Rollup Feed
//!
//! Reads the resampled CSV rollup (header `lon,lat,index,len`) into raw
//! rows for the track store. The core never touches files; this module is
//! the one place input enters the system.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::track::RawRow;
use crate::{Result, RunmapError};

/// Read rollup rows from any reader, preserving input order
///
/// Columns are matched by header name, so extra columns are ignored and
/// column order does not matter. Missing columns and non-numeric fields
/// are `DataError`s carrying the failing record's position.
pub fn read_rollup<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<RawRow>() {
        let row = record.map_err(|e| RunmapError::DataError(format!("rollup: {}", e)))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read rollup rows from a file on disk
pub fn read_rollup_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let file = File::open(path.as_ref()).map_err(|e| {
        RunmapError::DataError(format!(
            "failed to open rollup '{}': {}",
            path.as_ref().display(),
            e
        ))
    })?;
    read_rollup(file)
}
