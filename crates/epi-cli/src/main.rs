//! Epidemiological ETL CLI.

use clap::{ColorChoice, Parser};
use epi_cli::logging::{LogConfig, LogFormat, init_logging};
use epi_cli::pipeline;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_all, run_profile, run_transform};
use crate::summary::{print_profile_summary, print_transform_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Some(parent) = log_config
        .log_file
        .as_deref()
        .and_then(std::path::Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        && let Err(error) = std::fs::create_dir_all(parent)
    {
        eprintln!(
            "error: failed to create log directory {}: {error}",
            parent.display()
        );
        std::process::exit(1);
    }
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Profile(args) => match run_profile(args) {
            Ok(run) => {
                print_profile_summary(&run);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Transform(args) => match run_transform(args) {
            Ok(run) => {
                print_transform_summary(&run);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Run(args) => match run_all(args) {
            Ok((profile_run, transform_run, missing)) => {
                print_profile_summary(&profile_run);
                print_transform_summary(&transform_run);
                if missing.is_empty() {
                    0
                } else {
                    eprintln!("error: missing expected outputs:");
                    for path in &missing {
                        eprintln!("- {}", path.display());
                    }
                    1
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = if cli.log_stderr {
        None
    } else {
        Some(cli.log_file.clone().unwrap_or_else(|| {
            pipeline::default_log_file(&cli.command.stage_args().log_dir)
        }))
    };
    config.with_timestamps = config.log_file.is_some();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => config.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
