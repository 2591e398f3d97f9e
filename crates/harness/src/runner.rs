//! Fixture iteration and verdicts
//!
//! `run_all` owns the whole run: discover the fixture count, truncate the
//! report, then drive every fixture in ascending index order through
//! `run_one`. Fixtures are isolated: a driver failure inside one fixture is
//! coerced to a `Failed` verdict and the loop continues. Fixture-file read
//! failures are fatal, but the report is still completed with `not run`
//! lines for the failed and remaining indices before the run ends.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::HarnessConfig;
use crate::driver::{ControlId, UiDriver};
use crate::error::HarnessResult;
use crate::fixture::{self, Fixture};
use crate::report::ReportWriter;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    Failed,
    /// The fixture was never attempted because the run aborted fatally
    /// before or during its iteration.
    NotRun,
}

impl Verdict {
    /// The literal verdict text used in the report line.
    pub fn report_text(&self) -> &'static str {
        match self {
            Verdict::Passed => "Test passed",
            Verdict::Failed => "Test failed",
            Verdict::NotRun => "Test not run",
        }
    }
}

/// Typed per-fixture result. `detail` preserves the failure cause for logs
/// and the JSON summary; the text report carries only the verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureOutcome {
    pub index: usize,
    pub verdict: Verdict,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FixtureOutcome {
    fn not_run(index: usize, detail: Option<String>) -> Self {
        Self {
            index,
            verdict: Verdict::NotRun,
            duration_ms: 0,
            detail,
        }
    }
}

/// Result of running all fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_run: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
    pub outcomes: Vec<FixtureOutcome>,
}

impl RunSummary {
    /// Whether every fixture was actually attempted.
    pub fn completed(&self) -> bool {
        self.fatal.is_none()
    }

    /// Write the machine-readable summary next to the text report.
    pub fn write_json(&self, path: &Path) -> HarnessResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("summary written to {}", path.display());
        Ok(())
    }
}

/// Run every discovered fixture against the open session.
///
/// Returns `Err` only for failures outside the fixture loop (discovery,
/// report I/O). A fixture-file read failure mid-sequence is surfaced
/// through `RunSummary::fatal` after the report has been completed with
/// `not run` lines.
pub async fn run_all<D: UiDriver>(
    session: &Session<D>,
    config: &HarnessConfig,
) -> HarnessResult<RunSummary> {
    let total = fixture::count_fixtures(&config.fixtures_root)?;
    let mut report = ReportWriter::create(&config.report_path)?;
    let start = Instant::now();

    info!(
        "running {total} test case(s) from {}",
        config.fixtures_root.display()
    );

    let mut outcomes: Vec<FixtureOutcome> = Vec::with_capacity(total);
    let mut fatal: Option<String> = None;

    for index in 1..=total {
        if fatal.is_some() {
            report.record(index, Verdict::NotRun)?;
            outcomes.push(FixtureOutcome::not_run(index, None));
            continue;
        }

        let fixture = match Fixture::load(&config.fixtures_root, index) {
            Ok(fixture) => fixture,
            Err(e) => {
                error!("✗ test case {index} - {e}");
                report.record(index, Verdict::NotRun)?;
                outcomes.push(FixtureOutcome::not_run(index, Some(e.to_string())));
                fatal = Some(e.to_string());
                continue;
            }
        };

        let fixture_start = Instant::now();
        let result = run_one(session, &fixture, config).await;
        let duration_ms = fixture_start.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(true) => FixtureOutcome {
                index,
                verdict: Verdict::Passed,
                duration_ms,
                detail: None,
            },
            Ok(false) => FixtureOutcome {
                index,
                verdict: Verdict::Failed,
                duration_ms,
                detail: Some("output does not match expected output".to_string()),
            },
            // Interaction failures are isolated to this fixture.
            Err(e) => FixtureOutcome {
                index,
                verdict: Verdict::Failed,
                duration_ms,
                detail: Some(e.to_string()),
            },
        };

        match outcome.verdict {
            Verdict::Passed => info!("✓ test case {index} ({duration_ms} ms)"),
            _ => error!(
                "✗ test case {index} - {}",
                outcome.detail.as_deref().unwrap_or("unknown")
            ),
        }

        report.record(index, outcome.verdict)?;
        outcomes.push(outcome);
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    let passed = count(&outcomes, Verdict::Passed);
    let failed = count(&outcomes, Verdict::Failed);
    let not_run = count(&outcomes, Verdict::NotRun);

    info!("results: {passed} passed, {failed} failed, {not_run} not run ({duration_ms} ms)");
    info!("report written to {}", report.path().display());

    Ok(RunSummary {
        total,
        passed,
        failed,
        not_run,
        duration_ms,
        fatal,
        outcomes,
    })
}

fn count(outcomes: &[FixtureOutcome], verdict: Verdict) -> usize {
    outcomes.iter().filter(|o| o.verdict == verdict).count()
}

/// Drive one fixture through the UI and compare the produced output.
///
/// Equality is the sole pass criterion: character for character, including
/// trailing-newline presence, no trimming.
pub async fn run_one<D: UiDriver>(
    session: &Session<D>,
    fixture: &Fixture,
    config: &HarnessConfig,
) -> HarnessResult<bool> {
    let driver = session.driver();

    // Reveal the instructions editor, inject the program, commit it.
    driver.click(ControlId::LoadInstructions).await?;
    driver
        .set_value(ControlId::InstructionsField, &fixture.instructions)
        .await?;
    driver.click(ControlId::SaveInstructions).await?;

    driver.set_value(ControlId::InputField, &fixture.input).await?;

    driver.click(ControlId::Run).await?;
    let output = wait_for_output(driver, config).await?;

    if output != fixture.expected_output {
        debug!(
            "test case {}: expected {:?}, got {:?}",
            fixture.index, fixture.expected_output, output
        );
        return Ok(false);
    }
    Ok(true)
}

/// Bounded poll of the output control after the run trigger.
///
/// Execution is asynchronous with respect to the click, so an immediate
/// read can race the page's own update. The value is accepted once it is
/// non-empty and unchanged across two consecutive reads; past the deadline
/// the last observed value is compared as-is.
async fn wait_for_output<D: UiDriver>(
    driver: &D,
    config: &HarnessConfig,
) -> HarnessResult<String> {
    let deadline = Instant::now() + config.output_timeout;
    let mut last = driver.read_value(ControlId::OutputField).await?;

    loop {
        if Instant::now() >= deadline {
            return Ok(last);
        }
        tokio::time::sleep(config.poll_interval).await;

        let current = driver.read_value(ControlId::OutputField).await?;
        if !current.is_empty() && current == last {
            return Ok(current);
        }
        last = current;
    }
}
