//! End-to-end pipeline tests over a temporary workspace.

use std::fs;

use epi_cli::pipeline::{
    DIM_COUNTRY_FILE, DIM_INDICATOR_FILE, run_profile, run_transform, verify_outputs,
};
use epi_cli::types::StageDirs;

const COVID_FILE: &str = "worldometer_coronavirus_daily_data.csv";
const MPOX_FILE: &str = "owid-monkeypox-data.csv";

fn workspace() -> (tempfile::TempDir, StageDirs) {
    let dir = tempfile::tempdir().unwrap();
    let dirs = StageDirs {
        input_dir: dir.path().join("raw_data"),
        reference_dir: dir.path().join("docs"),
        output_dir: dir.path().join("processed"),
        log_dir: dir.path().join("logs"),
    };
    fs::create_dir_all(&dirs.input_dir).unwrap();
    (dir, dirs)
}

fn write_covid(dirs: &StageDirs) {
    fs::write(
        dirs.input_dir.join(COVID_FILE),
        "date,country,daily_new_cases,daily_new_deaths\n\
         2020-03-01,France,10,1\n\
         2020-03-02,France,12,2\n\
         2020-03-01,Spain,5,0\n",
    )
    .unwrap();
}

fn write_mpox(dirs: &StageDirs) {
    fs::write(
        dirs.input_dir.join(MPOX_FILE),
        "location,iso_code,date,new_cases,new_deaths\n\
         France,FRA,2022-05-20,3,0\n\
         France,FRA,2022-05-21,4,0\n",
    )
    .unwrap();
}

#[test]
fn transform_writes_star_schema_and_reference_stubs() {
    let (_dir, dirs) = workspace();
    write_covid(&dirs);
    write_mpox(&dirs);

    let run = run_transform(&dirs).unwrap();

    assert!(verify_outputs(&dirs).is_empty());
    assert_eq!(run.tables.len(), 4);
    assert_eq!(run.stubs_written.len(), 2);

    // Stubs list every distinct observed country with an empty value column.
    let stub = fs::read_to_string(dirs.reference_dir.join("iso_country_codes.csv")).unwrap();
    let lines: Vec<&str> = stub.lines().collect();
    assert_eq!(lines[0], "country,iso_code");
    assert!(lines.contains(&"France,"));
    assert!(lines.contains(&"Spain,"));
    assert_eq!(lines.len(), 3);

    let fact = fs::read_to_string(dirs.output_dir.join("fact_covid_history.csv")).unwrap();
    assert_eq!(
        fact.lines().next().unwrap(),
        "country,date,indicator,value,iso_code,population,unit,source,\
         cases_per_100k,deaths_per_100k,incidence_7j,growth_rate"
    );
    // 3 raw rows unpivot into cases + deaths.
    assert_eq!(fact.lines().count(), 7);

    let dim_indicator = fs::read_to_string(dirs.output_dir.join(DIM_INDICATOR_FILE)).unwrap();
    assert!(dim_indicator.contains("cases"));
    assert!(dim_indicator.contains("deaths"));

    let dim_country = fs::read_to_string(dirs.output_dir.join(DIM_COUNTRY_FILE)).unwrap();
    assert!(dim_country.lines().any(|l| l.starts_with("France")));
    assert!(dim_country.lines().any(|l| l.starts_with("Spain")));
}

#[test]
fn transform_applies_population_reference_when_present() {
    let (_dir, dirs) = workspace();
    write_covid(&dirs);
    write_mpox(&dirs);
    fs::create_dir_all(&dirs.reference_dir).unwrap();
    fs::write(
        dirs.reference_dir.join("country_population_reference.csv"),
        "country,population\nFrance,1000000\nSpain,2000000\n",
    )
    .unwrap();

    let run = run_transform(&dirs).unwrap();

    // Only the ISO stub should have been generated.
    assert_eq!(run.stubs_written.len(), 1);
    assert!(run.stubs_written[0].ends_with("iso_country_codes.csv"));
    assert_eq!(run.unresolved_population, 0);

    let fact = fs::read_to_string(dirs.output_dir.join("fact_covid_history.csv")).unwrap();
    let france_cases: Vec<&str> = fact
        .lines()
        .filter(|l| l.starts_with("France,2020-03-01,cases"))
        .collect();
    assert_eq!(france_cases.len(), 1);
    let fields: Vec<&str> = france_cases[0].split(',').collect();
    assert_eq!(fields[3], "10.0");
    assert_eq!(fields[5], "1000000.0");
    assert_eq!(fields[8], "1.0");
}

#[test]
fn mpox_rows_carry_source_iso_codes_without_a_reference() {
    let (_dir, dirs) = workspace();
    write_covid(&dirs);
    write_mpox(&dirs);

    run_transform(&dirs).unwrap();

    let fact = fs::read_to_string(dirs.output_dir.join("fact_mpox_history.csv")).unwrap();
    let france: Vec<&str> = fact.lines().filter(|l| l.starts_with("France,")).collect();
    assert!(!france.is_empty());
    for line in france {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields[4], "FRA");
        assert_eq!(fields[7], "mpox");
    }
}

#[test]
fn profile_reports_every_source_and_survives_a_missing_file() {
    let (_dir, dirs) = workspace();
    write_covid(&dirs);
    // mpox file deliberately absent

    let run = run_profile(&dirs).unwrap();

    assert_eq!(run.outcomes.len(), 2);
    assert!(run.has_failures());
    assert_eq!(run.outcomes[0].rows, Some(3));
    assert_eq!(run.outcomes[0].columns, Some(4));
    assert!(run.outcomes[0].error.is_none());
    assert!(run.outcomes[1].error.is_some());

    let report = fs::read_to_string(&run.report_path).unwrap();
    assert!(report.contains("===== Profiling covid"));
    assert!(report.contains("===== Profiling mpox"));
    assert!(report.contains("LOAD FAILED"));
}

#[test]
fn run_profile_twice_appends_to_separate_or_same_report_without_clobbering() {
    let (_dir, dirs) = workspace();
    write_covid(&dirs);
    write_mpox(&dirs);

    let first = run_profile(&dirs).unwrap();
    let second = run_profile(&dirs).unwrap();

    // Reports accumulate; a rerun never truncates an existing report file.
    let contents = fs::read_to_string(&second.report_path).unwrap();
    let sections = contents.matches("===== Profiling covid").count();
    if first.report_path == second.report_path {
        assert_eq!(sections, 2);
    } else {
        assert_eq!(sections, 1);
    }
}
