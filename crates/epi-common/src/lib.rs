//! Shared utilities for the epidemiological ETL crates.
//!
//! This crate provides common helpers used across the workspace, mostly for
//! extracting typed values out of Polars `AnyValue` cells.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{any_to_f64, any_to_string, any_to_string_non_empty, format_numeric, parse_f64};
