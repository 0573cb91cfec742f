//! Subcommand entry points.

use std::path::PathBuf;

use anyhow::Result;

use epi_cli::pipeline;
use epi_cli::types::{ProfileRun, StageDirs, TransformRun};

use crate::cli::StageArgs;

fn stage_dirs(args: &StageArgs) -> StageDirs {
    StageDirs {
        input_dir: args.input_dir.clone(),
        reference_dir: args.reference_dir.clone(),
        output_dir: args.output_dir.clone(),
        log_dir: args.log_dir.clone(),
    }
}

pub fn run_profile(args: &StageArgs) -> Result<ProfileRun> {
    pipeline::run_profile(&stage_dirs(args))
}

pub fn run_transform(args: &StageArgs) -> Result<TransformRun> {
    pipeline::run_transform(&stage_dirs(args))
}

/// Full pipeline: profile, transform, then verify the exported tables.
pub fn run_all(args: &StageArgs) -> Result<(ProfileRun, TransformRun, Vec<PathBuf>)> {
    let dirs = stage_dirs(args);
    let profile = pipeline::run_profile(&dirs)?;
    let transform = pipeline::run_transform(&dirs)?;
    let missing = pipeline::verify_outputs(&dirs);
    Ok((profile, transform, missing))
}
