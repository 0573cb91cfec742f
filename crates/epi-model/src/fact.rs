//! The standardized long-format fact record and dimension rows.

use chrono::NaiveDate;

use crate::enums::{Indicator, Source};

/// Normalize a country name for reference-table lookups: trim and lower-case.
pub fn normalize_country_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One standardized measurement: a single `(country, date, indicator)` cell.
///
/// `country` and `date` are optional until the cleaning stage drops rows with
/// missing grain keys; `value` is optional until interpolation and the final
/// null-value drop. Enrichment fields start out empty and are filled by the
/// reference joins and metric derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    pub country: Option<String>,
    pub date: Option<NaiveDate>,
    pub indicator: Indicator,
    pub value: Option<f64>,
    pub iso_code: Option<String>,
    pub population: Option<f64>,
    pub source: Source,
    pub cases_per_100k: Option<f64>,
    pub deaths_per_100k: Option<f64>,
    pub incidence_7j: Option<f64>,
    pub growth_rate: Option<f64>,
}

impl FactRow {
    /// Build a freshly standardized row with empty enrichment fields.
    pub fn new(
        source: Source,
        indicator: Indicator,
        country: Option<String>,
        date: Option<NaiveDate>,
        value: Option<f64>,
    ) -> Self {
        Self {
            country,
            date,
            indicator,
            value,
            iso_code: None,
            population: None,
            source,
            cases_per_100k: None,
            deaths_per_100k: None,
            incidence_7j: None,
            growth_rate: None,
        }
    }

    pub fn unit(&self) -> &'static str {
        self.indicator.unit()
    }

    /// Normalized join key, or `None` when the country is missing.
    pub fn join_key(&self) -> Option<String> {
        self.country.as_deref().map(normalize_country_key)
    }
}

/// One row of the country dimension: a distinct
/// `(country, iso_code, population)` tuple observed across the fact tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDim {
    pub country: String,
    pub iso_code: Option<String>,
    pub population: Option<f64>,
}
