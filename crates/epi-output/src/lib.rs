//! Export layer for the star schema.
//!
//! Writes the per-source fact tables and the two dimension tables as CSV,
//! generates the reference-table stubs when a reference file is absent, and
//! appends sections to the profiling report file.

mod dims;
mod error;
mod facts;
mod report;
mod stub;

pub use dims::{write_country_dimension, write_indicator_dimension};
pub use error::{OutputError, Result};
pub use facts::{FACT_COLUMNS, facts_to_dataframe, write_fact_table};
pub use report::append_report_section;
pub use stub::write_reference_stub;
