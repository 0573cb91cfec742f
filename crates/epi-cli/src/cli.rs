//! CLI argument definitions for the epidemiological ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "epi-etl",
    version,
    about = "Epidemiological ETL - conform daily COVID-19 and monkeypox data",
    long_about = "Load the daily COVID-19 and monkeypox country files, profile their raw\n\
                  quality, and conform them into a star schema: one fact table per source\n\
                  plus country and indicator dimensions, ready for analysis."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (compact for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to this file instead of the timestamped default under the log directory.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log to stderr instead of a file.
    #[arg(long = "log-stderr", global = true, conflicts_with = "log_file")]
    pub log_stderr: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Profile the raw source files and append to the profiling report.
    Profile(StageArgs),

    /// Transform the raw sources into the star schema tables.
    Transform(StageArgs),

    /// Profile, transform, and verify the outputs in one run.
    Run(StageArgs),
}

impl Command {
    pub fn stage_args(&self) -> &StageArgs {
        match self {
            Command::Profile(args) | Command::Transform(args) | Command::Run(args) => args,
        }
    }
}

#[derive(Parser)]
pub struct StageArgs {
    /// Directory holding the raw daily CSV files.
    #[arg(long = "input-dir", value_name = "DIR", default_value = "raw_data")]
    pub input_dir: PathBuf,

    /// Directory holding the population and ISO-code reference files.
    #[arg(long = "reference-dir", value_name = "DIR", default_value = "docs")]
    pub reference_dir: PathBuf,

    /// Output directory for the star schema tables.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "processed")]
    pub output_dir: PathBuf,

    /// Directory for log files and profiling reports.
    #[arg(long = "log-dir", value_name = "DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_with_defaults() {
        let cli = Cli::try_parse_from(["epi-etl", "run"]).unwrap();
        let args = cli.command.stage_args();
        assert_eq!(args.input_dir, PathBuf::from("raw_data"));
        assert_eq!(args.reference_dir, PathBuf::from("docs"));
        assert_eq!(args.output_dir, PathBuf::from("processed"));
        assert_eq!(args.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn log_file_and_log_stderr_conflict() {
        let result = Cli::try_parse_from(["epi-etl", "run", "--log-file", "x.log", "--log-stderr"]);
        assert!(result.is_err());
    }
}
