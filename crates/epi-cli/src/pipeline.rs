//! Stage orchestration: profiling, transformation, and output verification.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

use epi_ingest::{
    ISO_REFERENCE_FILE, POPULATION_REFERENCE_FILE, RAW_SOURCES, RawSource, ReferenceTable,
    read_csv,
};
use epi_model::{FactRow, Indicator, Source, normalize_country_key};
use epi_output::{
    append_report_section, write_country_dimension, write_fact_table, write_indicator_dimension,
    write_reference_stub,
};
use epi_profile::{profile_dataframe, render_load_failure, render_profile};
use epi_transform::dims::country_dimension;
use epi_transform::{ReferenceJoins, process_rows, standardize};

use crate::types::{ProfileOutcome, ProfileRun, StageDirs, TableOutput, TransformRun};

/// Country dimension file name under the output directory.
pub const DIM_COUNTRY_FILE: &str = "dim_country.csv";

/// Indicator dimension file name under the output directory.
pub const DIM_INDICATOR_FILE: &str = "dim_indicator.csv";

fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Default log file for one run: `etl_<timestamp>.log` under `log_dir`.
pub fn default_log_file(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("etl_{}.log", timestamp()))
}

/// Profile every raw source file, appending one section per file to a
/// timestamped report under the log directory.
///
/// A file that fails to load is recorded in place and skipped; profiling
/// continues with the remaining sources.
pub fn run_profile(dirs: &StageDirs) -> Result<ProfileRun> {
    fs::create_dir_all(&dirs.log_dir)
        .with_context(|| format!("create log directory {}", dirs.log_dir.display()))?;
    let report_path = dirs
        .log_dir
        .join(format!("profiling_report_{}.txt", timestamp()));

    let mut outcomes = Vec::new();
    for raw in &RAW_SOURCES {
        let path = raw.path(&dirs.input_dir);
        let outcome = match read_csv(&path) {
            Ok(df) => {
                let profile = profile_dataframe(
                    raw.display_name,
                    &path,
                    &df,
                    &[raw.cases_column, raw.deaths_column],
                );
                let section = render_profile(&profile);
                append_report_section(&report_path, &section)?;
                println!("{section}");
                info!(
                    source = raw.display_name,
                    rows = profile.rows,
                    columns = profile.columns.len(),
                    "profiled source"
                );
                ProfileOutcome {
                    name: raw.display_name.to_string(),
                    path,
                    rows: Some(profile.rows),
                    columns: Some(profile.columns.len()),
                    error: None,
                }
            }
            Err(load_error) => {
                let message = load_error.to_string();
                let section = render_load_failure(raw.display_name, &path, &message);
                append_report_section(&report_path, &section)?;
                println!("{section}");
                error!(source = raw.display_name, error = %message, "profiling skipped source");
                ProfileOutcome {
                    name: raw.display_name.to_string(),
                    path,
                    rows: None,
                    columns: None,
                    error: Some(message),
                }
            }
        };
        outcomes.push(outcome);
    }
    info!(report = %report_path.display(), "profiling report written");
    Ok(ProfileRun {
        report_path,
        outcomes,
    })
}

/// Transform both raw sources into the star schema tables.
///
/// A missing raw file is fatal here, unlike in profiling. A missing reference
/// file is not: a template stub listing the observed countries is written for
/// it and the corresponding join is skipped for this run.
pub fn run_transform(dirs: &StageDirs) -> Result<TransformRun> {
    fs::create_dir_all(&dirs.output_dir)
        .with_context(|| format!("create output directory {}", dirs.output_dir.display()))?;
    fs::create_dir_all(&dirs.reference_dir)
        .with_context(|| format!("create reference directory {}", dirs.reference_dir.display()))?;

    let covid = RawSource::for_source(Source::Covid);
    let mpox = RawSource::for_source(Source::Mpox);
    let covid_df =
        read_csv(&covid.path(&dirs.input_dir)).with_context(|| format!("load {}", covid.file_name))?;
    let mpox_df =
        read_csv(&mpox.path(&dirs.input_dir)).with_context(|| format!("load {}", mpox.file_name))?;

    let covid_rows = standardize(&covid_df, &covid)?;
    let mpox_rows = standardize(&mpox_df, &mpox)?;

    let observed = observed_countries(&[&covid_rows, &mpox_rows]);
    let mut stubs_written = Vec::new();
    let population = load_or_stub(
        &dirs.reference_dir.join(POPULATION_REFERENCE_FILE),
        "population",
        &observed,
        &mut stubs_written,
    )?;
    let iso_codes = load_or_stub(
        &dirs.reference_dir.join(ISO_REFERENCE_FILE),
        "iso_code",
        &observed,
        &mut stubs_written,
    )?;
    let references = ReferenceJoins {
        population: population.as_ref(),
        iso_codes: iso_codes.as_ref(),
    };

    let covid_report = process_rows(Source::Covid, covid_rows, &references);
    let mpox_report = process_rows(Source::Mpox, mpox_rows, &references);

    let mut tables = Vec::new();
    for report in [&covid_report, &mpox_report] {
        let path = dirs.output_dir.join(report.source.fact_file_name());
        write_fact_table(&report.rows, &path)?;
        tables.push(TableOutput {
            name: report.source.fact_file_name().to_string(),
            rows: report.rows.len(),
            path,
        });
    }

    let countries = country_dimension(&[&covid_report.rows, &mpox_report.rows]);
    let dim_country_path = dirs.output_dir.join(DIM_COUNTRY_FILE);
    write_country_dimension(&countries, &dim_country_path)?;
    tables.push(TableOutput {
        name: DIM_COUNTRY_FILE.to_string(),
        rows: countries.len(),
        path: dim_country_path,
    });
    let dim_indicator_path = dirs.output_dir.join(DIM_INDICATOR_FILE);
    write_indicator_dimension(&dim_indicator_path)?;
    tables.push(TableOutput {
        name: DIM_INDICATOR_FILE.to_string(),
        rows: Indicator::ALL.len(),
        path: dim_indicator_path,
    });

    let unresolved_population = covid_report
        .unresolved_population
        .union(&mpox_report.unresolved_population)
        .count();
    let unresolved_iso = covid_report
        .unresolved_iso
        .union(&mpox_report.unresolved_iso)
        .count();

    info!(
        output_dir = %dirs.output_dir.display(),
        tables = tables.len(),
        stubs = stubs_written.len(),
        "transform complete"
    );
    Ok(TransformRun {
        output_dir: dirs.output_dir.clone(),
        tables,
        stubs_written,
        unresolved_population,
        unresolved_iso,
    })
}

/// Check that every expected star schema table exists, returning the paths
/// that are missing.
pub fn verify_outputs(dirs: &StageDirs) -> Vec<PathBuf> {
    let mut missing = Vec::new();
    for source in [Source::Covid, Source::Mpox] {
        let path = dirs.output_dir.join(source.fact_file_name());
        if !path.exists() {
            missing.push(path);
        }
    }
    for name in [DIM_COUNTRY_FILE, DIM_INDICATOR_FILE] {
        let path = dirs.output_dir.join(name);
        if !path.exists() {
            missing.push(path);
        }
    }
    for path in &missing {
        error!(path = %path.display(), "expected output missing");
    }
    missing
}

fn load_or_stub(
    path: &Path,
    value_column: &str,
    observed: &[String],
    stubs_written: &mut Vec<PathBuf>,
) -> Result<Option<ReferenceTable>> {
    if path.exists() {
        let table = ReferenceTable::load(path, value_column)
            .with_context(|| format!("load reference {}", path.display()))?;
        return Ok(Some(table));
    }
    write_reference_stub(path, value_column, observed)
        .with_context(|| format!("write reference stub {}", path.display()))?;
    stubs_written.push(path.to_path_buf());
    Ok(None)
}

/// Distinct raw country spellings across all row sets, first-seen order.
/// Distinctness is judged on the normalized key, so "France" and " france "
/// produce one stub row.
fn observed_countries(row_sets: &[&[FactRow]]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut countries = Vec::new();
    for rows in row_sets {
        for row in *rows {
            let Some(country) = row.country.as_deref() else {
                continue;
            };
            let trimmed = country.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(normalize_country_key(trimmed)) {
                countries.push(trimmed.to_string());
            }
        }
    }
    countries
}
