//! Fact-table export.

use std::fs::File;
use std::path::Path;

use polars::prelude::{
    Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};
use tracing::info;

use epi_model::FactRow;

use crate::error::Result;

/// Output column order of the fact tables.
pub const FACT_COLUMNS: [&str; 12] = [
    "country",
    "date",
    "indicator",
    "value",
    "iso_code",
    "population",
    "unit",
    "source",
    "cases_per_100k",
    "deaths_per_100k",
    "incidence_7j",
    "growth_rate",
];

/// Build the export frame for one source's fact rows.
///
/// Dates are serialized as ISO `YYYY-MM-DD` strings; nullable numeric fields
/// stay typed so the CSV writer leaves empty cells rather than sentinel text.
pub fn facts_to_dataframe(rows: &[FactRow]) -> PolarsResult<DataFrame> {
    let country: Vec<Option<String>> = rows.iter().map(|r| r.country.clone()).collect();
    let date: Vec<Option<String>> = rows
        .iter()
        .map(|r| r.date.map(|d| d.format("%Y-%m-%d").to_string()))
        .collect();
    let indicator: Vec<&str> = rows.iter().map(|r| r.indicator.as_str()).collect();
    let value: Vec<Option<f64>> = rows.iter().map(|r| r.value).collect();
    let iso_code: Vec<Option<String>> = rows.iter().map(|r| r.iso_code.clone()).collect();
    let population: Vec<Option<f64>> = rows.iter().map(|r| r.population).collect();
    let unit: Vec<&str> = rows.iter().map(|r| r.unit()).collect();
    let source: Vec<&str> = rows.iter().map(|r| r.source.as_str()).collect();
    let cases_per_100k: Vec<Option<f64>> = rows.iter().map(|r| r.cases_per_100k).collect();
    let deaths_per_100k: Vec<Option<f64>> = rows.iter().map(|r| r.deaths_per_100k).collect();
    let incidence_7j: Vec<Option<f64>> = rows.iter().map(|r| r.incidence_7j).collect();
    let growth_rate: Vec<Option<f64>> = rows.iter().map(|r| r.growth_rate).collect();

    let columns: Vec<Column> = vec![
        Series::new("country".into(), country).into_column(),
        Series::new("date".into(), date).into_column(),
        Series::new("indicator".into(), indicator).into_column(),
        Series::new("value".into(), value).into_column(),
        Series::new("iso_code".into(), iso_code).into_column(),
        Series::new("population".into(), population).into_column(),
        Series::new("unit".into(), unit).into_column(),
        Series::new("source".into(), source).into_column(),
        Series::new("cases_per_100k".into(), cases_per_100k).into_column(),
        Series::new("deaths_per_100k".into(), deaths_per_100k).into_column(),
        Series::new("incidence_7j".into(), incidence_7j).into_column(),
        Series::new("growth_rate".into(), growth_rate).into_column(),
    ];
    DataFrame::new(columns)
}

/// Write one source's fact table to `path`.
pub fn write_fact_table(rows: &[FactRow], path: &Path) -> Result<()> {
    let mut df = facts_to_dataframe(rows)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    info!(path = %path.display(), rows = rows.len(), "wrote fact table");
    Ok(())
}
