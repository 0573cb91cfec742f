//! Dimension-table export.

use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};
use tracing::info;

use epi_model::{CountryDim, Indicator};

use crate::error::Result;

/// Write `dim_country.csv`: the distinct `(country, iso_code, population)`
/// tuples observed across both fact tables.
pub fn write_country_dimension(dims: &[CountryDim], path: &Path) -> Result<()> {
    let country: Vec<String> = dims.iter().map(|d| d.country.clone()).collect();
    let iso_code: Vec<Option<String>> = dims.iter().map(|d| d.iso_code.clone()).collect();
    let population: Vec<Option<f64>> = dims.iter().map(|d| d.population).collect();
    let columns: Vec<Column> = vec![
        Series::new("country".into(), country).into_column(),
        Series::new("iso_code".into(), iso_code).into_column(),
        Series::new("population".into(), population).into_column(),
    ];
    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    info!(path = %path.display(), rows = dims.len(), "wrote country dimension");
    Ok(())
}

/// Write the static `dim_indicator.csv` lookup.
pub fn write_indicator_dimension(path: &Path) -> Result<()> {
    let names: Vec<&str> = Indicator::ALL.iter().map(|i| i.as_str()).collect();
    let descriptions: Vec<&str> = Indicator::ALL.iter().map(|i| i.description()).collect();
    let columns: Vec<Column> = vec![
        Series::new("indicator_name".into(), names).into_column(),
        Series::new("description".into(), descriptions).into_column(),
    ];
    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    info!(path = %path.display(), "wrote indicator dimension");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_dimension_is_static_two_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dim_indicator.csv");
        write_indicator_dimension(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "indicator_name,description");
        assert_eq!(lines[1], "cases,Nombre de cas");
        assert_eq!(lines[2], "deaths,Nombre de décès");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn country_dimension_keeps_null_cells_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dim_country.csv");
        let dims = vec![
            CountryDim {
                country: "France".to_string(),
                iso_code: Some("FRA".to_string()),
                population: Some(1000.0),
            },
            CountryDim {
                country: "Atlantis".to_string(),
                iso_code: None,
                population: None,
            },
        ];
        write_country_dimension(&dims, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[1], "France,FRA,1000.0");
        assert_eq!(lines[2], "Atlantis,,");
    }
}
