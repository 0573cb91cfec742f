//! Data-quality profiling for the raw epidemiological CSV files.
//!
//! The profiler is a read-only stage: it inspects a loaded `DataFrame` and
//! produces a [`DataProfile`] (shape, per-column dtypes and null counts, head
//! rows, descriptive statistics, full-row duplicate count) plus a plain-text
//! rendering for the append-only profiling report.

mod profile;
mod report;

pub use profile::{
    ColumnProfile, ColumnStats, DataProfile, HeadlineStat, profile_dataframe,
};
pub use report::{render_load_failure, render_profile};
