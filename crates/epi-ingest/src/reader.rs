//! Raw CSV loading via Polars.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Read a whole CSV file into a `DataFrame`.
///
/// The header row is required; column dtypes are inferred from the first
/// thousand records so the numeric daily columns come back as numbers and the
/// date/country columns as strings. Missing files are reported as
/// [`IngestError::FileNotFound`] rather than a generic read failure so callers
/// can distinguish the skip-and-continue case.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .finish()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );
    Ok(df)
}
