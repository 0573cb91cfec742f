//! Post-standardization pipeline for one source.
//!
//! Stage order:
//! 1. Reference joins (population, ISO codes)
//! 2. Deduplication on `(country, date, indicator)`, keep-first
//! 3. Grain-key drops (null country/date)
//! 4. Linear interpolation of values per `(country, indicator)` group,
//!    then drop of rows interpolation could not fill
//! 5. Per-100k normalization
//! 6. Derived metrics (7-sample incidence, growth rate)
//! 7. Final sort by `(country, indicator, date)`

use std::collections::BTreeSet;

use tracing::{debug, info, info_span};

use epi_ingest::ReferenceTable;
use epi_model::{FactRow, Source};

use crate::clean::{dedupe_rows, drop_missing_keys, drop_unfilled_values, interpolate_values};
use crate::enrich::{apply_iso_codes, apply_per_100k, apply_population, derive_metrics};

/// Loaded reference tables for the dimension joins. `None` means the file was
/// absent this run and the join is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceJoins<'a> {
    pub population: Option<&'a ReferenceTable>,
    pub iso_codes: Option<&'a ReferenceTable>,
}

/// Outcome of transforming one source: the final fact rows plus the counts a
/// run summary needs.
#[derive(Debug)]
pub struct SourceReport {
    pub source: Source,
    pub standardized_rows: usize,
    pub duplicates_removed: usize,
    pub missing_key_rows: usize,
    pub unfilled_value_rows: usize,
    pub unresolved_population: BTreeSet<String>,
    pub unresolved_iso: BTreeSet<String>,
    pub rows: Vec<FactRow>,
}

/// Sort fact rows into export order: `(country, indicator, date)` ascending.
pub fn sort_rows(rows: &mut [FactRow]) {
    rows.sort_by(|a, b| {
        a.country
            .cmp(&b.country)
            .then(a.indicator.cmp(&b.indicator))
            .then(a.date.cmp(&b.date))
    });
}

/// Run every post-standardization stage over one source's rows.
pub fn process_rows(
    source: Source,
    rows: Vec<FactRow>,
    references: &ReferenceJoins<'_>,
) -> SourceReport {
    let span = info_span!("transform", source = source.as_str());
    let _guard = span.enter();

    let standardized_rows = rows.len();
    let mut rows = rows;

    let unresolved_population = match references.population {
        Some(reference) => apply_population(&mut rows, reference).unresolved,
        None => BTreeSet::new(),
    };
    let unresolved_iso = match references.iso_codes {
        Some(reference) => apply_iso_codes(&mut rows, reference).unresolved,
        None => BTreeSet::new(),
    };

    let (rows, duplicates_removed) = dedupe_rows(rows);
    let (mut rows, missing_key_rows) = drop_missing_keys(rows);
    debug!(duplicates_removed, missing_key_rows, "cleaned grain");

    interpolate_values(&mut rows);
    let (mut rows, unfilled_value_rows) = drop_unfilled_values(rows);

    apply_per_100k(&mut rows);
    derive_metrics(&mut rows);
    sort_rows(&mut rows);

    info!(
        standardized = standardized_rows,
        kept = rows.len(),
        duplicates_removed,
        missing_key_rows,
        unfilled_value_rows,
        "transformed source"
    );
    SourceReport {
        source,
        standardized_rows,
        duplicates_removed,
        missing_key_rows,
        unfilled_value_rows,
        unresolved_population,
        unresolved_iso,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epi_model::Indicator;

    fn row(country: &str, date: &str, indicator: Indicator, value: Option<f64>) -> FactRow {
        FactRow::new(
            Source::Covid,
            indicator,
            Some(country.to_string()),
            Some(date.parse().unwrap()),
            value,
        )
    }

    #[test]
    fn sort_orders_country_then_indicator_then_date() {
        let mut rows = vec![
            row("Spain", "2020-01-01", Indicator::Cases, Some(1.0)),
            row("France", "2020-01-02", Indicator::Deaths, Some(1.0)),
            row("France", "2020-01-01", Indicator::Cases, Some(1.0)),
            row("France", "2020-01-02", Indicator::Cases, Some(1.0)),
        ];
        sort_rows(&mut rows);
        let order: Vec<(String, Indicator)> = rows
            .iter()
            .map(|r| (r.country.clone().unwrap(), r.indicator))
            .collect();
        assert_eq!(
            order,
            vec![
                ("France".to_string(), Indicator::Cases),
                ("France".to_string(), Indicator::Cases),
                ("France".to_string(), Indicator::Deaths),
                ("Spain".to_string(), Indicator::Cases),
            ]
        );
        assert!(rows[0].date < rows[1].date);
    }

    #[test]
    fn process_rows_without_references_leaves_enrichment_null() {
        let rows = vec![row("France", "2020-01-01", Indicator::Cases, Some(10.0))];
        let report = process_rows(Source::Covid, rows, &ReferenceJoins::default());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].population, None);
        assert_eq!(report.rows[0].cases_per_100k, None);
        assert_eq!(report.rows[0].incidence_7j, Some(10.0));
        assert!(report.unresolved_population.is_empty());
    }

    #[test]
    fn process_rows_grain_is_unique() {
        let rows = vec![
            row("France", "2020-01-01", Indicator::Cases, Some(10.0)),
            row("France", "2020-01-01", Indicator::Cases, Some(10.0)),
            row("France", "2020-01-02", Indicator::Cases, Some(12.0)),
        ];
        let report = process_rows(Source::Covid, rows, &ReferenceJoins::default());
        assert_eq!(report.duplicates_removed, 1);
        let mut keys: Vec<_> = report
            .rows
            .iter()
            .map(|r| (r.country.clone(), r.date, r.indicator))
            .collect();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }
}
