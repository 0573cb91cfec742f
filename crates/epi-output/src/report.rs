//! Append-only profiling report file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Append one rendered section to the profiling report, creating the file on
/// first use.
pub fn append_report_section(path: &Path, section: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(section.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiling_report.txt");
        append_report_section(&path, "first").unwrap();
        append_report_section(&path, "second").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
