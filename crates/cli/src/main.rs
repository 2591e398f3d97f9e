//! PL/0 playground E2E harness - main entry point
//!
//! Opens one browser session against the configured playground URL, drives
//! every `test_case_*` fixture through the page, and writes the verdict
//! report. Exit codes: 0 when the run completed and the report was written
//! (individual verdicts do not matter), 1 when the run aborted mid-sequence
//! after writing a partial report, 2 when bootstrap or discovery failed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;

use pl0_e2e_harness::config::FileConfig;
use pl0_e2e_harness::runner;
use pl0_e2e_harness::{HarnessConfig, HarnessResult, RunSummary, Session, WebDriverUi};

/// E2E harness for the PL/0 web playground
#[derive(Parser, Debug)]
#[command(name = "pl0-e2e")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target application address
    #[arg(long, env = "PL0_E2E_URL")]
    url: Option<String>,

    /// Substring required in the loaded page's title
    #[arg(long, env = "PL0_E2E_TITLE_MARKER")]
    title_marker: Option<String>,

    /// Directory containing the test_case_* fixture directories
    #[arg(short, long, env = "PL0_E2E_FIXTURES")]
    fixtures: Option<PathBuf>,

    /// Path of the verdict report
    #[arg(short, long, env = "PL0_E2E_REPORT")]
    report: Option<PathBuf>,

    /// WebDriver endpoint (geckodriver/chromedriver)
    #[arg(long, env = "PL0_E2E_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Browser to drive (firefox, chrome)
    #[arg(long, env = "PL0_E2E_BROWSER")]
    browser: Option<String>,

    /// Run the browser headless
    #[arg(long)]
    headless: bool,

    /// Bounded wait for locating a control, in milliseconds
    #[arg(long)]
    step_timeout_ms: Option<u64>,

    /// Poll interval for element and output waits, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Bounded wait for the output control to settle, in milliseconds
    #[arg(long)]
    output_timeout_ms: Option<u64>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a machine-readable run summary to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Flags and env vars win over the config file, which wins over the
    /// built-in defaults.
    fn resolve(self) -> HarnessResult<HarnessConfig> {
        let mut config = HarnessConfig::default();

        if let Some(path) = &self.config {
            FileConfig::load(path)?.apply(&mut config)?;
        }

        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(marker) = self.title_marker {
            config.title_marker = marker;
        }
        if let Some(fixtures) = self.fixtures {
            config.fixtures_root = fixtures;
        }
        if let Some(report) = self.report {
            config.report_path = report;
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.webdriver_url = webdriver_url;
        }
        if let Some(browser) = self.browser {
            config.browser = browser.parse()?;
        }
        if self.headless {
            config.headless = true;
        }
        if let Some(ms) = self.step_timeout_ms {
            config.step_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.output_timeout_ms {
            config.output_timeout = Duration::from_millis(ms);
        }
        if let Some(json) = self.json {
            config.json_summary = Some(json);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    match run(args).await {
        Ok(summary) if summary.completed() => ExitCode::SUCCESS,
        Ok(summary) => {
            // Fatal mid-run: the partial report (with `not run` lines) is
            // already on disk.
            error!(
                "run aborted: {}",
                summary.fatal.as_deref().unwrap_or("unknown")
            );
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> HarnessResult<RunSummary> {
    let config = args.resolve()?;

    let driver = WebDriverUi::connect(&config).await?;
    let mut session = Session::open(driver, &config.url, &config.title_marker).await?;

    let result = runner::run_all(&session, &config).await;

    // The session is torn down on every path; a run error takes precedence
    // over a close error.
    let closed = session.close().await;
    let summary = result?;
    closed?;

    if let Some(path) = &config.json_summary {
        summary.write_json(path)?;
    }
    Ok(summary)
}
