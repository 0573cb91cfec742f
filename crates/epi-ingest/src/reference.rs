//! Reference-table loading for the dimension joins.
//!
//! The population and ISO-code reference files are small two-column CSVs keyed
//! on country name. Keys are normalized (trimmed, lower-cased) at load time so
//! lookups are insensitive to case and whitespace drift between the raw
//! sources and the reference files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::info;

use epi_model::normalize_country_key;

use crate::error::{IngestError, Result};

/// File name of the population reference table (`country,population`).
pub const POPULATION_REFERENCE_FILE: &str = "country_population_reference.csv";

/// File name of the ISO-code reference table (`country,iso_code`).
pub const ISO_REFERENCE_FILE: &str = "iso_country_codes.csv";

/// A loaded reference table: normalized country key to raw value.
///
/// Rows with an empty value are skipped, so a half-filled stub behaves like a
/// partial reference rather than a table full of blanks.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl ReferenceTable {
    /// Load a reference table, reading `country` and `value_column`.
    ///
    /// Extra columns are tolerated; a missing `country` or `value_column`
    /// header is an error.
    pub fn load(path: &Path, value_column: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|source| IngestError::Reference {
                path: path.to_path_buf(),
                source,
            })?;
        let headers = reader
            .headers()
            .map_err(|source| IngestError::Reference {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        let column_index = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| IngestError::ReferenceColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let country_idx = column_index("country")?;
        let value_idx = column_index(value_column)?;

        let mut values = BTreeMap::new();
        for record in reader.records() {
            let record = record.map_err(|source| IngestError::Reference {
                path: path.to_path_buf(),
                source,
            })?;
            let country = record.get(country_idx).unwrap_or("").trim();
            let value = record.get(value_idx).unwrap_or("").trim();
            if country.is_empty() || value.is_empty() {
                continue;
            }
            values.insert(normalize_country_key(country), value.to_string());
        }
        info!(
            path = %path.display(),
            entries = values.len(),
            column = value_column,
            "loaded reference table"
        );
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a raw value by country name (normalized internally).
    pub fn get(&self, country: &str) -> Option<&str> {
        self.values
            .get(&normalize_country_key(country))
            .map(String::as_str)
    }

    /// Look up a numeric value by country name.
    pub fn get_f64(&self, country: &str) -> Option<f64> {
        self.get(country).and_then(|v| v.parse::<f64>().ok())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
