//! Descriptors for the two raw daily datasets.

use std::path::{Path, PathBuf};

use epi_model::Source;

/// Static description of a raw source file: where it lives and which columns
/// hold the grain keys and daily measurements.
#[derive(Debug, Clone, Copy)]
pub struct RawSource {
    pub source: Source,
    pub file_name: &'static str,
    pub display_name: &'static str,
    pub date_column: &'static str,
    pub country_column: &'static str,
    pub cases_column: &'static str,
    pub deaths_column: &'static str,
    /// Source-provided ISO code column, when the dataset carries one.
    pub iso_column: Option<&'static str>,
}

/// The two supported sources, in processing order.
pub const RAW_SOURCES: [RawSource; 2] = [
    RawSource {
        source: Source::Covid,
        file_name: "worldometer_coronavirus_daily_data.csv",
        display_name: "covid",
        date_column: "date",
        country_column: "country",
        cases_column: "daily_new_cases",
        deaths_column: "daily_new_deaths",
        iso_column: None,
    },
    RawSource {
        source: Source::Mpox,
        file_name: "owid-monkeypox-data.csv",
        display_name: "mpox",
        date_column: "date",
        country_column: "location",
        cases_column: "new_cases",
        deaths_column: "new_deaths",
        iso_column: Some("iso_code"),
    },
];

impl RawSource {
    pub fn for_source(source: Source) -> RawSource {
        match source {
            Source::Covid => RAW_SOURCES[0],
            Source::Mpox => RAW_SOURCES[1],
        }
    }

    /// Full path of this source's raw file under `input_dir`.
    pub fn path(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_match_sources() {
        assert_eq!(RawSource::for_source(Source::Covid).display_name, "covid");
        assert_eq!(RawSource::for_source(Source::Mpox).display_name, "mpox");
        assert_eq!(RawSource::for_source(Source::Mpox).country_column, "location");
        assert!(RawSource::for_source(Source::Covid).iso_column.is_none());
    }
}
