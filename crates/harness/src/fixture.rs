//! Fixture discovery and loading
//!
//! A fixture is one `test_case_<i>/` directory holding three text files:
//! `instructions.txt` (program source), `input.txt` (stdin for the
//! program), `expected_output.txt` (what the output control must hold).
//! Indices are contiguous from 1; the count of matching entries defines
//! the iteration range, and nothing else about the names is validated, so
//! a gap surfaces as a read error at the missing index rather than a
//! silently skipped case.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, HarnessResult};

pub const DIR_PREFIX: &str = "test_case_";

const INSTRUCTIONS_FILE: &str = "instructions.txt";
const INPUT_FILE: &str = "input.txt";
const EXPECTED_OUTPUT_FILE: &str = "expected_output.txt";

/// One test case's triple of text artifacts, exactly as stored on disk
/// (trailing-newline presence included).
#[derive(Debug, Clone)]
pub struct Fixture {
    pub index: usize,
    pub instructions: String,
    pub input: String,
    pub expected_output: String,
}

/// Count the `test_case_*` entries directly under `root`.
pub fn count_fixtures(root: &Path) -> HarnessResult<usize> {
    let mut count = 0;
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with(DIR_PREFIX) {
            count += 1;
        }
    }
    if count == 0 {
        return Err(HarnessError::NoFixtures(root.to_path_buf()));
    }
    Ok(count)
}

impl Fixture {
    pub fn dir(root: &Path, index: usize) -> PathBuf {
        root.join(format!("{DIR_PREFIX}{index}"))
    }

    pub fn load(root: &Path, index: usize) -> HarnessResult<Self> {
        let dir = Self::dir(root, index);
        Ok(Self {
            index,
            instructions: read_artifact(&dir, index, INSTRUCTIONS_FILE)?,
            input: read_artifact(&dir, index, INPUT_FILE)?,
            expected_output: read_artifact(&dir, index, EXPECTED_OUTPUT_FILE)?,
        })
    }
}

fn read_artifact(dir: &Path, index: usize, name: &str) -> HarnessResult<String> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| HarnessError::FixtureRead {
        index,
        path,
        source,
    })
}
