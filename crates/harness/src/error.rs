//! Error types for the E2E harness

use std::path::PathBuf;

use thiserror::Error;

use crate::driver::ControlId;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("WebDriver error: {0}")]
    Driver(#[from] thirtyfour::error::WebDriverError),

    #[error("control `{control}` not found: {source}")]
    ControlNotFound {
        control: ControlId,
        source: thirtyfour::error::WebDriverError,
    },

    #[error("step failed: {step} - {reason}")]
    StepFailed { step: String, reason: String },

    #[error("page title {actual:?} does not contain {expected:?}")]
    TitleMismatch { expected: String, actual: String },

    #[error("session already closed")]
    SessionClosed,

    #[error("no `test_case_*` directories under {0}")]
    NoFixtures(PathBuf),

    #[error("test case {index}: cannot read {path}: {source}")]
    FixtureRead {
        index: usize,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
