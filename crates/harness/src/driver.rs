//! Browser automation behind the `UiDriver` seam
//!
//! The page under test exposes a fixed set of controls addressed by stable
//! DOM ids. Everything the harness needs from a browser is expressed as the
//! `UiDriver` trait; `WebDriverUi` is the production implementation speaking
//! the WebDriver protocol to a geckodriver/chromedriver endpoint, and the
//! crate's tests substitute scripted fakes.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};

/// The addressable controls of the playground page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    LoadInstructions,
    InstructionsField,
    SaveInstructions,
    InputField,
    Run,
    OutputField,
}

impl ControlId {
    /// Stable DOM id of the control on the page under test.
    pub fn dom_id(&self) -> &'static str {
        match self {
            ControlId::LoadInstructions => "load-instructions-button",
            ControlId::InstructionsField => "instructions-textarea",
            ControlId::SaveInstructions => "save-instructions-button",
            ControlId::InputField => "input-textarea",
            ControlId::Run => "play-button",
            ControlId::OutputField => "output-textarea",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Firefox,
    Chrome,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Firefox => "firefox",
            Browser::Chrome => "chrome",
        }
    }
}

impl FromStr for Browser {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firefox" => Ok(Browser::Firefox),
            "chrome" => Ok(Browser::Chrome),
            other => Err(HarnessError::InvalidConfig(format!(
                "unknown browser `{other}` (expected `firefox` or `chrome`)"
            ))),
        }
    }
}

/// Everything the harness needs from a browser.
///
/// `set_value` must inject the whole text at once (the equivalent of a
/// paste), never per-keystroke typing: fixture programs are multi-line and
/// keystroke simulation is subject to control-specific key handling.
#[async_trait]
pub trait UiDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> HarnessResult<()>;

    async fn title(&self) -> HarnessResult<String>;

    async fn click(&self, control: ControlId) -> HarnessResult<()>;

    /// Clear `control` and replace its content with `value` atomically.
    async fn set_value(&self, control: ControlId, value: &str) -> HarnessResult<()>;

    async fn read_value(&self, control: ControlId) -> HarnessResult<String>;

    /// Tear down the underlying browser session. Idempotent.
    async fn close(&mut self) -> HarnessResult<()>;
}

// Direct value assignment; the input/change events keep the page's own
// listeners in sync with the injected content.
const SET_VALUE_SCRIPT: &str = r#"
arguments[0].value = arguments[1];
arguments[0].dispatchEvent(new Event('input', { bubbles: true }));
arguments[0].dispatchEvent(new Event('change', { bubbles: true }));
"#;

/// WebDriver-protocol implementation of `UiDriver`.
pub struct WebDriverUi {
    driver: Option<WebDriver>,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl WebDriverUi {
    /// Launch a fresh, isolated browser through the configured WebDriver
    /// endpoint.
    pub async fn connect(config: &HarnessConfig) -> HarnessResult<Self> {
        let driver = match config.browser {
            Browser::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if config.headless {
                    caps.set_headless()?;
                }
                WebDriver::new(&config.webdriver_url, caps).await?
            }
            Browser::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if config.headless {
                    caps.set_headless()?;
                }
                WebDriver::new(&config.webdriver_url, caps).await?
            }
        };

        debug!(
            "connected to {} ({})",
            config.webdriver_url,
            config.browser.as_str()
        );

        Ok(Self {
            driver: Some(driver),
            wait_timeout: config.step_timeout,
            poll_interval: config.poll_interval,
        })
    }

    fn driver(&self) -> HarnessResult<&WebDriver> {
        self.driver.as_ref().ok_or(HarnessError::SessionClosed)
    }

    /// Locate a control with a bounded explicit wait rather than the
    /// driver's implicit default.
    async fn find(&self, control: ControlId) -> HarnessResult<WebElement> {
        self.driver()?
            .query(By::Id(control.dom_id()))
            .wait(self.wait_timeout, self.poll_interval)
            .first()
            .await
            .map_err(|source| HarnessError::ControlNotFound { control, source })
    }
}

#[async_trait]
impl UiDriver for WebDriverUi {
    async fn navigate(&self, url: &str) -> HarnessResult<()> {
        self.driver()?.goto(url).await?;
        Ok(())
    }

    async fn title(&self) -> HarnessResult<String> {
        Ok(self.driver()?.title().await?)
    }

    async fn click(&self, control: ControlId) -> HarnessResult<()> {
        self.find(control).await?.click().await?;
        Ok(())
    }

    async fn set_value(&self, control: ControlId, value: &str) -> HarnessResult<()> {
        let element = self.find(control).await?;
        element.click().await?;
        element.clear().await?;
        self.driver()?
            .execute(
                SET_VALUE_SCRIPT,
                vec![
                    element.to_json()?,
                    serde_json::Value::String(value.to_owned()),
                ],
            )
            .await?;
        Ok(())
    }

    async fn read_value(&self, control: ControlId) -> HarnessResult<String> {
        let element = self.find(control).await?;
        Ok(element.prop("value").await?.unwrap_or_default())
    }

    async fn close(&mut self) -> HarnessResult<()> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_ids_match_the_page() {
        assert_eq!(ControlId::LoadInstructions.dom_id(), "load-instructions-button");
        assert_eq!(ControlId::InstructionsField.dom_id(), "instructions-textarea");
        assert_eq!(ControlId::SaveInstructions.dom_id(), "save-instructions-button");
        assert_eq!(ControlId::InputField.dom_id(), "input-textarea");
        assert_eq!(ControlId::Run.dom_id(), "play-button");
        assert_eq!(ControlId::OutputField.dom_id(), "output-textarea");
    }

    #[test]
    fn browser_parses_from_str() {
        assert_eq!(Browser::from_str("firefox").unwrap(), Browser::Firefox);
        assert_eq!(Browser::from_str("chrome").unwrap(), Browser::Chrome);
        assert!(Browser::from_str("netscape").is_err());
    }
}
