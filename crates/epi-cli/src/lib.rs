//! CLI library components for the epidemiological ETL pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
