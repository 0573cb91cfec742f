//! Reference-table stub generation.

use std::path::Path;

use tracing::warn;

use crate::error::Result;

/// Write an empty reference template: one row per observed country with the
/// value column left blank, ready to be filled in by hand.
///
/// Country names are written as observed in the raw data (not normalized), in
/// the order given.
pub fn write_reference_stub(path: &Path, value_column: &str, countries: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["country", value_column])?;
    for country in countries {
        writer.write_record([country.as_str(), ""])?;
    }
    writer.flush()?;
    warn!(
        path = %path.display(),
        countries = countries.len(),
        "reference file was absent; wrote template to fill in"
    );
    Ok(())
}
