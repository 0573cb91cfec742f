//! Plain-text rendering of profiles for the append-only report file.

use std::fmt::Write as _;
use std::path::Path;

use crate::profile::{ColumnStats, DataProfile};

/// Render one profile as a report section.
pub fn render_profile(profile: &DataProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "===== Profiling {} ({}) =====",
        profile.name,
        profile.path.display()
    );
    let _ = writeln!(out, "Shape: ({}, {})", profile.rows, profile.columns.len());
    let names: Vec<&str> = profile.columns.iter().map(|c| c.name.as_str()).collect();
    let _ = writeln!(out, "Columns: [{}]", names.join(", "));

    let _ = writeln!(out, "Dtypes:");
    for column in &profile.columns {
        let _ = writeln!(out, "  {}: {}", column.name, column.dtype);
    }

    let _ = writeln!(out, "Missing values per column:");
    for column in &profile.columns {
        let _ = writeln!(out, "  {}: {}", column.name, column.null_count);
    }

    let _ = writeln!(out, "First {} rows:", profile.head.len());
    let _ = writeln!(out, "  {}", names.join(" | "));
    for row in &profile.head {
        let _ = writeln!(out, "  {}", row.join(" | "));
    }

    let _ = writeln!(out, "Descriptive statistics:");
    for column in &profile.columns {
        match &column.stats {
            ColumnStats::Numeric {
                count,
                mean,
                std,
                min,
                max,
            } => {
                let _ = writeln!(
                    out,
                    "  {}: count={} mean={} std={} min={} max={}",
                    column.name,
                    count,
                    fmt_opt(*mean),
                    fmt_opt(*std),
                    fmt_opt(*min),
                    fmt_opt(*max),
                );
            }
            ColumnStats::Text {
                count,
                distinct,
                top,
                freq,
            } => {
                let _ = writeln!(
                    out,
                    "  {}: count={} distinct={} top={} freq={}",
                    column.name,
                    count,
                    distinct,
                    top.as_deref().unwrap_or("-"),
                    freq,
                );
            }
        }
    }

    let _ = writeln!(out, "Duplicate rows (full-row): {}", profile.duplicate_rows);

    for headline in &profile.headlines {
        let _ = writeln!(
            out,
            "Daily statistics ({}): total={:.0} mean/day={} max/day={}",
            headline.column,
            headline.total,
            fmt_opt(headline.mean),
            fmt_opt(headline.max),
        );
    }

    out
}

/// Render the report section for a file whose load failed.
pub fn render_load_failure(name: &str, path: &Path, error: &str) -> String {
    format!(
        "===== Profiling {} ({}) =====\nLOAD FAILED: {}\n",
        name,
        path.display(),
        error
    )
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_dataframe;
    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    #[test]
    fn render_includes_shape_and_duplicates() {
        let cols: Vec<Column> = vec![
            Series::new("date".into(), vec!["2020-01-01", "2020-01-01"]).into_column(),
            Series::new("new_cases".into(), vec![5i64, 5]).into_column(),
        ];
        let df = DataFrame::new(cols).unwrap();
        let profile = profile_dataframe(
            "mpox",
            std::path::Path::new("raw/owid.csv"),
            &df,
            &["new_cases"],
        );
        let text = render_profile(&profile);
        assert!(text.contains("===== Profiling mpox"));
        assert!(text.contains("Shape: (2, 2)"));
        assert!(text.contains("Duplicate rows (full-row): 1"));
        assert!(text.contains("Daily statistics (new_cases): total=10"));
    }

    #[test]
    fn render_load_failure_mentions_error() {
        let text =
            render_load_failure("covid", std::path::Path::new("raw/x.csv"), "file not found");
        assert!(text.contains("LOAD FAILED: file not found"));
    }
}
