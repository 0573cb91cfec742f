//! Core types for the epidemiological star schema.
//!
//! This crate defines the standardized long-format fact record shared by the
//! transform pipeline and the export layer, together with the closed
//! `Indicator` and `Source` enumerations and the dimension-row types.

mod enums;
mod fact;

pub use enums::{Indicator, Source};
pub use fact::{CountryDim, FactRow, normalize_country_key};
