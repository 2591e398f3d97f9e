//! Browser session bootstrap and teardown

use tracing::{debug, info};

use crate::driver::UiDriver;
use crate::error::{HarnessError, HarnessResult};

/// A live handle to one browser tab, bound to the application under test
/// for the lifetime of the run.
///
/// The session owns its driver exclusively. Callers must invoke [`close`]
/// on every exit path; [`Session::open`] already does so itself when
/// bootstrap fails, so no half-open browser outlives a failed bootstrap.
///
/// [`close`]: Session::close
pub struct Session<D: UiDriver> {
    driver: D,
}

impl<D: UiDriver> Session<D> {
    /// Navigate `driver` to `url` and verify the loaded page identifies
    /// itself via `title_marker`.
    ///
    /// A marker mismatch means the harness is pointed at the wrong
    /// application (or the application failed to load) and is fatal; there
    /// is no retry.
    pub async fn open(driver: D, url: &str, title_marker: &str) -> HarnessResult<Self> {
        let mut session = Session { driver };
        if let Err(e) = session.bootstrap(url, title_marker).await {
            // Best effort: the bootstrap error is the one worth reporting.
            let _ = session.close().await;
            return Err(e);
        }
        Ok(session)
    }

    async fn bootstrap(&self, url: &str, title_marker: &str) -> HarnessResult<()> {
        debug!("navigating to {url}");
        self.driver.navigate(url).await?;

        let title = self.driver.title().await?;
        if !title.contains(title_marker) {
            return Err(HarnessError::TitleMismatch {
                expected: title_marker.to_string(),
                actual: title,
            });
        }

        info!("session open at {url} (title: {title:?})");
        Ok(())
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Tear down the browser session. Idempotent.
    pub async fn close(&mut self) -> HarnessResult<()> {
        self.driver.close().await
    }
}
