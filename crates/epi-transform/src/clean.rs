//! Deduplication and missing-value handling.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use epi_model::{FactRow, Indicator};

/// Drop rows sharing an identical `(country, date, indicator)` key, keeping
/// the first occurrence in current row order.
///
/// This runs before the final sort, so "first" means first-seen in source
/// file order. A missing date counts as a key value, so two unparseable-date
/// twins still collapse.
pub fn dedupe_rows(rows: Vec<FactRow>) -> (Vec<FactRow>, usize) {
    let before = rows.len();
    let mut seen: HashSet<(Option<String>, Option<NaiveDate>, Indicator)> =
        HashSet::with_capacity(before);
    let kept: Vec<FactRow> = rows
        .into_iter()
        .filter(|row| seen.insert((row.country.clone(), row.date, row.indicator)))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Drop rows missing a grain key (country or date) — these cannot be joined
/// or grouped and are unrecoverable.
pub fn drop_missing_keys(rows: Vec<FactRow>) -> (Vec<FactRow>, usize) {
    let before = rows.len();
    let kept: Vec<FactRow> = rows
        .into_iter()
        .filter(|row| row.country.is_some() && row.date.is_some())
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Linear interpolation of missing values, independently within each
/// `(country, indicator)` group ordered by date.
///
/// Only interior gaps are filled: a missing run needs an observed value on
/// both sides. Leading and trailing gaps stay `None` and are dropped by
/// [`drop_unfilled_values`]. Samples are treated as equally spaced; the date
/// only orders the group.
pub fn interpolate_values(rows: &mut [FactRow]) {
    for ordered in group_indices(rows).into_values() {
        let mut values: Vec<Option<f64>> = ordered.iter().map(|&i| rows[i].value).collect();
        fill_interior_gaps(&mut values);
        for (value, &i) in values.iter().zip(&ordered) {
            rows[i].value = *value;
        }
    }
}

/// Drop rows whose value is still missing after interpolation.
pub fn drop_unfilled_values(rows: Vec<FactRow>) -> (Vec<FactRow>, usize) {
    let before = rows.len();
    let kept: Vec<FactRow> = rows.into_iter().filter(|row| row.value.is_some()).collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Group row indices by `(country, indicator)`, each group ordered by date.
///
/// Callers run after [`drop_missing_keys`]; rows without a country are
/// skipped rather than grouped under an empty key.
pub(crate) fn group_indices(rows: &[FactRow]) -> BTreeMap<(String, Indicator), Vec<usize>> {
    let mut groups: BTreeMap<(String, Indicator), Vec<usize>> = BTreeMap::new();
    for (idx, row) in rows.iter().enumerate() {
        let Some(country) = row.country.clone() else {
            continue;
        };
        groups.entry((country, row.indicator)).or_default().push(idx);
    }
    for indices in groups.values_mut() {
        indices.sort_by_key(|&i| rows[i].date);
    }
    groups
}

fn fill_interior_gaps(values: &mut [Option<f64>]) {
    let mut last: Option<(usize, f64)> = None;
    for idx in 0..values.len() {
        let Some(current) = values[idx] else {
            continue;
        };
        if let Some((prev_idx, prev_val)) = last {
            if idx > prev_idx + 1 {
                let step = (current - prev_val) / (idx - prev_idx) as f64;
                for gap in (prev_idx + 1)..idx {
                    values[gap] = Some(prev_val + step * (gap - prev_idx) as f64);
                }
            }
        }
        last = Some((idx, current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epi_model::Source;

    fn row(country: Option<&str>, date: Option<&str>, indicator: Indicator) -> FactRow {
        FactRow::new(
            Source::Covid,
            indicator,
            country.map(String::from),
            date.map(|d| d.parse().unwrap()),
            Some(1.0),
        )
    }

    fn series_row(date: &str, value: Option<f64>) -> FactRow {
        FactRow::new(
            Source::Covid,
            Indicator::Cases,
            Some("France".to_string()),
            Some(date.parse().unwrap()),
            value,
        )
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut first = row(Some("France"), Some("2020-01-01"), Indicator::Cases);
        first.value = Some(10.0);
        let mut second = row(Some("France"), Some("2020-01-01"), Indicator::Cases);
        second.value = Some(99.0);
        let other = row(Some("France"), Some("2020-01-01"), Indicator::Deaths);

        let (kept, removed) = dedupe_rows(vec![first, second, other]);
        assert_eq!(removed, 1);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].value, Some(10.0));
    }

    #[test]
    fn dedupe_treats_missing_date_as_key() {
        let a = row(Some("France"), None, Indicator::Cases);
        let b = row(Some("France"), None, Indicator::Cases);
        let (kept, removed) = dedupe_rows(vec![a, b]);
        assert_eq!(kept.len(), 1);
        assert_eq!(removed, 1);
    }

    #[test]
    fn drop_missing_keys_removes_null_country_or_date() {
        let rows = vec![
            row(Some("France"), Some("2020-01-01"), Indicator::Cases),
            row(None, Some("2020-01-01"), Indicator::Cases),
            row(Some("Spain"), None, Indicator::Cases),
        ];
        let (kept, removed) = drop_missing_keys(rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(removed, 2);
        assert_eq!(kept[0].country.as_deref(), Some("France"));
    }

    #[test]
    fn interpolation_fills_interior_gap() {
        let mut rows = vec![
            series_row("2020-01-01", Some(10.0)),
            series_row("2020-01-02", None),
            series_row("2020-01-03", None),
            series_row("2020-01-04", Some(40.0)),
        ];
        interpolate_values(&mut rows);
        assert_eq!(rows[1].value, Some(20.0));
        assert_eq!(rows[2].value, Some(30.0));
    }

    #[test]
    fn interpolation_orders_by_date_not_row_position() {
        let mut rows = vec![
            series_row("2020-01-03", None),
            series_row("2020-01-01", Some(1.0)),
            series_row("2020-01-05", Some(5.0)),
        ];
        interpolate_values(&mut rows);
        assert_eq!(rows[0].value, Some(3.0));
    }

    #[test]
    fn leading_and_trailing_gaps_stay_missing() {
        let mut rows = vec![
            series_row("2020-01-01", None),
            series_row("2020-01-02", Some(2.0)),
            series_row("2020-01-03", None),
        ];
        interpolate_values(&mut rows);
        assert_eq!(rows[0].value, None);
        assert_eq!(rows[2].value, None);

        let (kept, removed) = drop_unfilled_values(rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(removed, 2);
    }

    #[test]
    fn interpolation_is_per_group() {
        let mut spain = series_row("2020-01-02", None);
        spain.country = Some("Spain".to_string());
        let mut rows = vec![
            series_row("2020-01-01", Some(10.0)),
            spain,
            series_row("2020-01-03", Some(30.0)),
        ];
        interpolate_values(&mut rows);
        // The Spain row has no neighbors in its own group.
        assert_eq!(rows[1].value, None);
    }
}
