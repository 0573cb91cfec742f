//! Transformation of the raw daily datasets into the conformed star schema.
//!
//! The stages mirror the pipeline order: reshape/standardize the raw frame
//! into long-format fact rows, join the reference dimensions, deduplicate the
//! grain, drop and interpolate missing values, compute the per-100k and
//! time-series metrics, and sort for export. [`pipeline::process_rows`] ties
//! the post-standardization stages together for one source.

pub mod clean;
pub mod dims;
pub mod enrich;
mod error;
pub mod pipeline;
pub mod standardize;

pub use error::{Result, TransformError};
pub use pipeline::{ReferenceJoins, SourceReport, process_rows, sort_rows};
pub use standardize::standardize;
