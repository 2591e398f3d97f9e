//! Verdict report
//!
//! One line per fixture, ascending index order, literal format
//! `Test case <i>: Test passed` / `Test case <i>: Test failed` /
//! `Test case <i>: Test not run`. The file is truncated when the run
//! starts and appended line by line, so a mid-run abort still leaves the
//! verdicts produced so far on disk.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::HarnessResult;
use crate::runner::Verdict;

pub struct ReportWriter {
    file: File,
    path: PathBuf,
    lines: usize,
}

impl ReportWriter {
    /// Create the report file, truncating any previous run's artifact.
    pub fn create(path: &Path) -> HarnessResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            lines: 0,
        })
    }

    pub fn record(&mut self, index: usize, verdict: Verdict) -> HarnessResult<()> {
        writeln!(self.file, "Test case {index}: {}", verdict.report_text())?;
        self.file.flush()?;
        self.lines += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> usize {
        self.lines
    }
}
