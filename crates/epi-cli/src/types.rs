use std::path::PathBuf;

/// Resolved directory configuration for one run.
#[derive(Debug, Clone)]
pub struct StageDirs {
    pub input_dir: PathBuf,
    pub reference_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// Per-file result of the profiling stage.
#[derive(Debug)]
pub struct ProfileOutcome {
    pub name: String,
    pub path: PathBuf,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    /// Load failure message, when the file could not be profiled.
    pub error: Option<String>,
}

/// Result of the profiling stage.
#[derive(Debug)]
pub struct ProfileRun {
    pub report_path: PathBuf,
    pub outcomes: Vec<ProfileOutcome>,
}

impl ProfileRun {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.error.is_some())
    }
}

/// One exported table.
#[derive(Debug)]
pub struct TableOutput {
    pub name: String,
    pub rows: usize,
    pub path: PathBuf,
}

/// Result of the transform stage.
#[derive(Debug)]
pub struct TransformRun {
    pub output_dir: PathBuf,
    pub tables: Vec<TableOutput>,
    /// Reference stubs generated because the file was absent this run.
    pub stubs_written: Vec<PathBuf>,
    pub unresolved_population: usize,
    pub unresolved_iso: usize,
}
