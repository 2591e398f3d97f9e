//! Harness configuration
//!
//! Defaults match the deployed playground; a TOML file may override any
//! subset of them, and the CLI layers its flags on top of the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::driver::Browser;
use crate::error::{HarnessError, HarnessResult};

/// Fully-resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Target application address.
    pub url: String,

    /// Substring required in the loaded page's title.
    pub title_marker: String,

    /// Directory containing the `test_case_*` fixture directories.
    pub fixtures_root: PathBuf,

    /// Path of the verdict report, rewritten each run.
    pub report_path: PathBuf,

    /// WebDriver endpoint (geckodriver/chromedriver).
    pub webdriver_url: String,

    pub browser: Browser,

    pub headless: bool,

    /// Bounded wait for locating a control.
    pub step_timeout: Duration,

    /// Poll interval for element queries and the output wait.
    pub poll_interval: Duration,

    /// Bounded wait for the output control to settle after the run trigger.
    pub output_timeout: Duration,

    /// Optional machine-readable run summary.
    pub json_summary: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            title_marker: "PL/0".to_string(),
            fixtures_root: PathBuf::from("."),
            report_path: PathBuf::from("results.txt"),
            webdriver_url: "http://localhost:4444".to_string(),
            browser: Browser::Firefox,
            headless: false,
            step_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
            output_timeout: Duration::from_secs(10),
            json_summary: None,
        }
    }
}

/// TOML overlay: every field optional, applied over the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub title_marker: Option<String>,
    pub fixtures: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub webdriver_url: Option<String>,
    pub browser: Option<String>,
    pub headless: Option<bool>,
    pub step_timeout_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub output_timeout_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| HarnessError::InvalidConfig(format!("{}: {e}", path.display())))
    }

    /// Apply every present field onto `config`.
    pub fn apply(self, config: &mut HarnessConfig) -> HarnessResult<()> {
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
        if let Some(headless) = self.headless {
            config.headless = headless;
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
        Ok(())
    }
}

impl HarnessConfig {
    /// Reject values that cannot produce a meaningful run.
    pub fn validate(&self) -> HarnessResult<()> {
        if self.url.is_empty() {
            return Err(HarnessError::InvalidConfig("url must not be empty".into()));
        }
        if self.title_marker.is_empty() {
            return Err(HarnessError::InvalidConfig(
                "title_marker must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_playground() {
        let config = HarnessConfig::default();
        assert_eq!(config.url, "http://localhost:3000");
        assert_eq!(config.title_marker, "PL/0");
        assert_eq!(config.report_path, PathBuf::from("results.txt"));
        assert_eq!(config.browser, Browser::Firefox);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overlay_applies_present_fields_only() {
        let overlay: FileConfig = toml::from_str(
            r#"
url = "http://10.0.0.5:3000"
browser = "chrome"
output_timeout_ms = 2500
"#,
        )
        .unwrap();

        let mut config = HarnessConfig::default();
        overlay.apply(&mut config).unwrap();

        assert_eq!(config.url, "http://10.0.0.5:3000");
        assert_eq!(config.browser, Browser::Chrome);
        assert_eq!(config.output_timeout, Duration::from_millis(2500));
        // Untouched fields keep their defaults.
        assert_eq!(config.title_marker, "PL/0");
        assert_eq!(config.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn unknown_browser_is_rejected() {
        let overlay: FileConfig = toml::from_str(r#"browser = "netscape""#).unwrap();
        let mut config = HarnessConfig::default();
        assert!(matches!(
            overlay.apply(&mut config),
            Err(HarnessError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>(r#"ur = "typo""#).is_err());
    }

    #[test]
    fn empty_marker_fails_validation() {
        let config = HarnessConfig {
            title_marker: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidConfig(_))
        ));
    }
}
