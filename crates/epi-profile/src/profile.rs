//! Profile computation over a loaded `DataFrame`.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame, DataType};
use tracing::debug;

use epi_common::{any_to_f64, any_to_string};

const HEAD_ROWS: usize = 5;

/// Quality profile of one raw file.
#[derive(Debug, Clone)]
pub struct DataProfile {
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
    /// First rows of the table, stringified, in column order.
    pub head: Vec<Vec<String>>,
    /// Rows that are exact duplicates of an earlier row.
    pub duplicate_rows: usize,
    /// Headline totals for the daily case/death columns, when present.
    pub headlines: Vec<HeadlineStat>,
}

#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    pub stats: ColumnStats,
}

/// Descriptive statistics in the shape of a pandas `describe(include='all')`:
/// numeric columns get moments and extremes, everything else gets
/// count/distinct/top/freq.
#[derive(Debug, Clone)]
pub enum ColumnStats {
    Numeric {
        count: usize,
        mean: Option<f64>,
        std: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    Text {
        count: usize,
        distinct: usize,
        top: Option<String>,
        freq: usize,
    },
}

/// Headline sum/mean/max for one daily measurement column.
#[derive(Debug, Clone)]
pub struct HeadlineStat {
    pub column: String,
    pub total: f64,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

/// Compute the full profile of a loaded table.
///
/// `headline_columns` names the daily measurement columns worth summarizing
/// (absent columns are skipped, not an error).
pub fn profile_dataframe(
    name: &str,
    path: &Path,
    df: &DataFrame,
    headline_columns: &[&str],
) -> DataProfile {
    let rows = df.height();
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let null_count = column.null_count();
        let stats = if is_numeric_dtype(column.dtype()) {
            numeric_stats(df, column.name().as_str())
        } else {
            text_stats(df, column.name().as_str())
        };
        columns.push(ColumnProfile {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            null_count,
            stats,
        });
    }

    let head = head_rows(df);
    let duplicate_rows = duplicate_row_count(df);
    let headlines = headline_columns
        .iter()
        .filter_map(|column| headline_stat(df, column))
        .collect();

    debug!(name, rows, columns = df.width(), duplicate_rows, "profiled table");
    DataProfile {
        name: name.to_string(),
        path: path.to_path_buf(),
        rows,
        columns,
        head,
        duplicate_rows,
        headlines,
    }
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn numeric_stats(df: &DataFrame, name: &str) -> ColumnStats {
    let mut values = Vec::new();
    if let Ok(column) = df.column(name) {
        for idx in 0..df.height() {
            if let Some(v) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) {
                values.push(v);
            }
        }
    }
    let count = values.len();
    if count == 0 {
        return ColumnStats::Numeric {
            count,
            mean: None,
            std: None,
            min: None,
            max: None,
        };
    }
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;
    // Sample standard deviation (ddof = 1), undefined for a single sample.
    let std = if count > 1 {
        let sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((sq / (count - 1) as f64).sqrt())
    } else {
        None
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    ColumnStats::Numeric {
        count,
        mean: Some(mean),
        std,
        min: Some(min),
        max: Some(max),
    }
}

fn text_stats(df: &DataFrame, name: &str) -> ColumnStats {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut count = 0usize;
    if let Ok(column) = df.column(name) {
        for idx in 0..df.height() {
            let text = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if text.trim().is_empty() {
                continue;
            }
            count += 1;
            *counts.entry(text).or_insert(0) += 1;
        }
    }
    let distinct = counts.len();
    let (top, freq) = counts
        .into_iter()
        .max_by_key(|(_, n)| *n)
        .map_or((None, 0), |(value, n)| (Some(value), n));
    ColumnStats::Text {
        count,
        distinct,
        top,
        freq,
    }
}

fn head_rows(df: &DataFrame) -> Vec<Vec<String>> {
    let take = df.height().min(HEAD_ROWS);
    let mut head = Vec::with_capacity(take);
    for idx in 0..take {
        let mut row = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            row.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
        }
        head.push(row);
    }
    head
}

/// Count rows that duplicate an earlier row across every column.
fn duplicate_row_count(df: &DataFrame) -> usize {
    let mut seen = HashSet::with_capacity(df.height());
    let mut duplicates = 0usize;
    for idx in 0..df.height() {
        let mut key = String::new();
        for column in df.get_columns() {
            key.push_str(&any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
            key.push('\u{1f}');
        }
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

fn headline_stat(df: &DataFrame, name: &str) -> Option<HeadlineStat> {
    let column = df.column(name).ok()?;
    let mut values = Vec::new();
    for idx in 0..df.height() {
        if let Some(v) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) {
            values.push(v);
        }
    }
    let total: f64 = values.iter().sum();
    let mean = if values.is_empty() {
        None
    } else {
        Some(total / values.len() as f64)
    };
    let max = values
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
    Some(HeadlineStat {
        column: name.to_string(),
        total,
        mean,
        max,
    })
}
