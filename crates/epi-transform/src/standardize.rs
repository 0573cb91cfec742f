//! Reshape a raw source frame into standardized long-format fact rows.
//!
//! Covers the first three pipeline stages in one pass over the frame: the
//! unpivot of the cases/deaths columns into indicator-tagged rows, schema
//! conformance (both sources produce the same row shape, with fields a source
//! lacks left empty), and type normalization (date parsing, country trimming,
//! numeric coercion). Unparseable dates and non-numeric values become `None`;
//! the cleaning stages decide what to drop.

use chrono::NaiveDate;
use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::debug;

use epi_common::{any_to_f64, any_to_string, any_to_string_non_empty};
use epi_ingest::RawSource;
use epi_model::{FactRow, Indicator};

use crate::error::{Result, TransformError};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Parse a raw date cell, trying the supported formats in order.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn required_column<'a>(df: &'a DataFrame, raw: &RawSource, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::MissingColumn {
        source_name: raw.display_name.to_string(),
        column: name.to_string(),
    })
}

/// Unpivot one raw frame into standardized fact rows.
///
/// The output emits the full cases block first, then the full deaths block,
/// each in raw file order. Deduplication later relies on that ordering for
/// its keep-first tie-break.
pub fn standardize(df: &DataFrame, raw: &RawSource) -> Result<Vec<FactRow>> {
    let date_col = required_column(df, raw, raw.date_column)?;
    let country_col = required_column(df, raw, raw.country_column)?;
    let cases_col = required_column(df, raw, raw.cases_column)?;
    let deaths_col = required_column(df, raw, raw.deaths_column)?;
    let iso_col = match raw.iso_column {
        Some(name) => Some(required_column(df, raw, name)?),
        None => None,
    };

    let height = df.height();
    let mut rows = Vec::with_capacity(height * 2);
    for (indicator, value_col) in [
        (Indicator::Cases, cases_col),
        (Indicator::Deaths, deaths_col),
    ] {
        for idx in 0..height {
            let date = parse_date(&any_to_string(date_col.get(idx).unwrap_or(AnyValue::Null)));
            let country = any_to_string_non_empty(country_col.get(idx).unwrap_or(AnyValue::Null))
                .map(|c| c.trim().to_string());
            let value = any_to_f64(value_col.get(idx).unwrap_or(AnyValue::Null));
            let mut row = FactRow::new(raw.source, indicator, country, date, value);
            if let Some(iso) = iso_col {
                row.iso_code = any_to_string_non_empty(iso.get(idx).unwrap_or(AnyValue::Null));
            }
            rows.push(row);
        }
    }
    debug!(
        source = raw.display_name,
        raw_rows = height,
        standardized = rows.len(),
        "standardized source"
    );
    Ok(rows)
}
