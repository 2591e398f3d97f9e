//! PL/0 Playground E2E Harness
//!
//! This crate drives the PL/0 web playground through a WebDriver session,
//! feeding it fixture-defined programs and comparing the rendered output
//! against expected output:
//! - Opens one browser session for the whole run and verifies the page title
//! - Iterates `test_case_<i>/` fixture directories in ascending index order
//! - Executes the load / paste / save / run flow against the page controls
//! - Records one verdict line per fixture into `results.txt`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      E2E Harness (Rust)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Session<D: UiDriver>                                       │
//! │    ├── open(driver, url, title_marker) -> Session           │
//! │    └── close()          guaranteed on every exit path       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  run_all(session, config)                                   │
//! │    ├── count_fixtures(root) -> N        (test_case_* dirs)  │
//! │    ├── Fixture::load(root, i)                               │
//! │    ├── run_one(session, fixture)        (seven-step flow)   │
//! │    └── ReportWriter::record(i, verdict) -> results.txt      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  UiDriver (trait)                                           │
//! │    ├── WebDriverUi      geckodriver/chromedriver endpoint   │
//! │    └── scripted fakes   in the crate's own tests            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod session;

pub use config::HarnessConfig;
pub use driver::{Browser, ControlId, UiDriver, WebDriverUi};
pub use error::{HarnessError, HarnessResult};
pub use fixture::Fixture;
pub use runner::{FixtureOutcome, RunSummary, Verdict};
pub use session::Session;
