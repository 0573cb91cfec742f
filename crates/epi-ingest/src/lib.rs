//! Data ingestion for the epidemiological ETL pipeline.
//!
//! Covers the read side of the pipeline: loading the raw daily CSV files into
//! Polars `DataFrame`s, describing the two supported sources, and loading the
//! optional population / ISO-code reference tables.

mod error;
mod reader;
mod reference;
mod sources;

pub use error::{IngestError, Result};
pub use reader::read_csv;
pub use reference::{ISO_REFERENCE_FILE, POPULATION_REFERENCE_FILE, ReferenceTable};
pub use sources::{RAW_SOURCES, RawSource};
