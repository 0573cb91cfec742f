//! Closed enumerations for the fact grain.

use serde::{Deserialize, Serialize};

/// Measurement indicator of a fact row.
///
/// The ordering (`Cases` before `Deaths`) matches the final sort order of the
/// fact tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Cases,
    Deaths,
}

impl Indicator {
    /// All indicators, in dimension-table order.
    pub const ALL: [Indicator; 2] = [Indicator::Cases, Indicator::Deaths];

    pub fn as_str(self) -> &'static str {
        match self {
            Indicator::Cases => "cases",
            Indicator::Deaths => "deaths",
        }
    }

    /// Measurement unit, via the fixed indicator -> unit lookup.
    pub fn unit(self) -> &'static str {
        match self {
            Indicator::Cases | Indicator::Deaths => "count",
        }
    }

    /// Human-readable description used by `dim_indicator`.
    pub fn description(self) -> &'static str {
        match self {
            Indicator::Cases => "Nombre de cas",
            Indicator::Deaths => "Nombre de décès",
        }
    }

    /// Parse a raw indicator label, trimming and lower-casing first.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "cases" => Some(Indicator::Cases),
            "deaths" => Some(Indicator::Deaths),
            _ => None,
        }
    }
}

/// Origin dataset of a fact row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Covid,
    Mpox,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Covid => "covid",
            Source::Mpox => "mpox",
        }
    }

    /// File name of this source's exported fact table.
    pub fn fact_file_name(self) -> &'static str {
        match self {
            Source::Covid => "fact_covid_history.csv",
            Source::Mpox => "fact_mpox_history.csv",
        }
    }
}
