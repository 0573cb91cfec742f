//! Reference joins and metric derivation.

use std::collections::BTreeSet;

use tracing::warn;

use epi_ingest::ReferenceTable;
use epi_model::{FactRow, Indicator};

use crate::clean::group_indices;

/// Aggregate result of one reference join.
#[derive(Debug, Default)]
pub struct JoinOutcome {
    pub matched: usize,
    /// Distinct country names with no reference entry.
    pub unresolved: BTreeSet<String>,
}

/// Join the population reference onto the rows.
///
/// Keys are normalized (trim + lower-case) by the lookup itself. Unmatched
/// rows keep a null population; unresolved names are reported in aggregate.
pub fn apply_population(rows: &mut [FactRow], reference: &ReferenceTable) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();
    for row in rows.iter_mut() {
        let Some(country) = row.country.as_deref() else {
            continue;
        };
        match reference.get_f64(country) {
            Some(population) => {
                row.population = Some(population);
                outcome.matched += 1;
            }
            None => {
                outcome.unresolved.insert(country.to_string());
            }
        }
    }
    if !outcome.unresolved.is_empty() {
        warn!(
            countries = outcome.unresolved.len(),
            names = ?outcome.unresolved,
            "population reference missing entries"
        );
    }
    outcome
}

/// Join the ISO-code reference onto the rows.
///
/// Only matches overwrite: a row with no reference entry keeps whatever it
/// already carries (the source-provided code for mpox, null for covid).
pub fn apply_iso_codes(rows: &mut [FactRow], reference: &ReferenceTable) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();
    for row in rows.iter_mut() {
        let Some(country) = row.country.as_deref() else {
            continue;
        };
        match reference.get(country) {
            Some(iso) => {
                row.iso_code = Some(iso.to_string());
                outcome.matched += 1;
            }
            None => {
                outcome.unresolved.insert(country.to_string());
            }
        }
    }
    if !outcome.unresolved.is_empty() {
        warn!(
            countries = outcome.unresolved.len(),
            names = ?outcome.unresolved,
            "iso-code reference missing entries"
        );
    }
    outcome
}

/// Per-100k normalization: `value / population * 100000` on the row's own
/// indicator column, only when population is known.
///
/// The division is not guarded against a zero population.
pub fn apply_per_100k(rows: &mut [FactRow]) {
    for row in rows.iter_mut() {
        let (Some(value), Some(population)) = (row.value, row.population) else {
            continue;
        };
        let scaled = value / population * 100_000.0;
        match row.indicator {
            Indicator::Cases => row.cases_per_100k = Some(scaled),
            Indicator::Deaths => row.deaths_per_100k = Some(scaled),
        }
    }
}

/// Derived time-series metrics per `(country, indicator)` group sorted by
/// date: the trailing 7-sample incidence sum (minimum window 1) and the
/// period-over-period growth rate (null at the group head and whenever the
/// prior value is zero).
pub fn derive_metrics(rows: &mut [FactRow]) {
    for ordered in group_indices(rows).into_values() {
        let values: Vec<f64> = ordered
            .iter()
            .map(|&i| rows[i].value.unwrap_or_default())
            .collect();
        let mut window_sum = 0.0;
        for pos in 0..ordered.len() {
            window_sum += values[pos];
            if pos >= 7 {
                window_sum -= values[pos - 7];
            }
            let row = &mut rows[ordered[pos]];
            row.incidence_7j = Some(window_sum);
            row.growth_rate = if pos == 0 {
                None
            } else {
                let prev = values[pos - 1];
                if prev == 0.0 {
                    None
                } else {
                    Some((values[pos] - prev) / prev)
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epi_model::Source;

    fn series(values: &[(&str, f64)]) -> Vec<FactRow> {
        values
            .iter()
            .map(|(date, value)| {
                FactRow::new(
                    Source::Covid,
                    Indicator::Cases,
                    Some("France".to_string()),
                    Some(date.parse().unwrap()),
                    Some(*value),
                )
            })
            .collect()
    }

    #[test]
    fn per_100k_only_fills_own_indicator() {
        let mut cases = FactRow::new(
            Source::Covid,
            Indicator::Cases,
            Some("France".to_string()),
            Some("2020-01-01".parse().unwrap()),
            Some(10.0),
        );
        cases.population = Some(1000.0);
        let mut deaths = cases.clone();
        deaths.indicator = Indicator::Deaths;

        let mut rows = vec![cases, deaths];
        apply_per_100k(&mut rows);
        assert_eq!(rows[0].cases_per_100k, Some(1000.0));
        assert_eq!(rows[0].deaths_per_100k, None);
        assert_eq!(rows[1].deaths_per_100k, Some(1000.0));
        assert_eq!(rows[1].cases_per_100k, None);
    }

    #[test]
    fn per_100k_null_without_population() {
        let mut rows = series(&[("2020-01-01", 10.0)]);
        apply_per_100k(&mut rows);
        assert_eq!(rows[0].cases_per_100k, None);
    }

    #[test]
    fn incidence_at_group_head_equals_value() {
        let mut rows = series(&[("2020-01-01", 10.0), ("2020-01-02", 5.0)]);
        derive_metrics(&mut rows);
        assert_eq!(rows[0].incidence_7j, Some(10.0));
        assert_eq!(rows[1].incidence_7j, Some(15.0));
    }

    #[test]
    fn incidence_window_slides_after_seven_samples() {
        let days: Vec<(String, f64)> = (1..=9)
            .map(|d| (format!("2020-01-{d:02}"), 1.0))
            .collect();
        let pairs: Vec<(&str, f64)> = days.iter().map(|(d, v)| (d.as_str(), *v)).collect();
        let mut rows = series(&pairs);
        derive_metrics(&mut rows);
        assert_eq!(rows[6].incidence_7j, Some(7.0));
        assert_eq!(rows[8].incidence_7j, Some(7.0));
    }

    #[test]
    fn growth_rate_null_at_head_and_zero_prior() {
        let mut rows = series(&[
            ("2020-01-01", 10.0),
            ("2020-01-02", 15.0),
            ("2020-01-03", 0.0),
            ("2020-01-04", 5.0),
        ]);
        derive_metrics(&mut rows);
        assert_eq!(rows[0].growth_rate, None);
        assert_eq!(rows[1].growth_rate, Some(0.5));
        assert_eq!(rows[2].growth_rate, Some(-1.0));
        // Prior value is zero: infinite change becomes null.
        assert_eq!(rows[3].growth_rate, None);
    }

    #[test]
    fn joins_report_unresolved_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("country_population_reference.csv");
        std::fs::write(&path, "country,population\nfrance,1000\n").unwrap();
        let reference = ReferenceTable::load(&path, "population").unwrap();

        let mut rows = series(&[("2020-01-01", 10.0)]);
        rows.push(FactRow::new(
            Source::Covid,
            Indicator::Cases,
            Some("Atlantis".to_string()),
            Some("2020-01-01".parse().unwrap()),
            Some(1.0),
        ));
        let outcome = apply_population(&mut rows, &reference);
        assert_eq!(outcome.matched, 1);
        assert_eq!(rows[0].population, Some(1000.0));
        assert_eq!(rows[1].population, None);
        assert!(outcome.unresolved.contains("Atlantis"));
    }
}
