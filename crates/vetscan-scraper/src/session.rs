//! Browser session ownership.

use crate::config::StealthConfig;
use crate::dom::{DomDriver, Launcher};
use crate::error::ScraperError;

/// Sole owner of the browser process behind a scraper.
///
/// At most one session is live at a time. [`SessionManager::open`] reuses a
/// live session; [`SessionManager::close`] can be called any number of times.
pub struct SessionManager<L: Launcher> {
    launcher: L,
    stealth: StealthConfig,
    active: Option<L::Driver>,
}

impl<L: Launcher> SessionManager<L> {
    pub fn new(launcher: L, stealth: StealthConfig) -> Self {
        Self {
            launcher,
            stealth,
            active: None,
        }
    }

    /// Starts the browser, or returns the session that is already running.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::SessionSetup`] if the browser cannot be started.
    pub async fn open(&mut self) -> Result<&L::Driver, ScraperError> {
        let driver = match self.active.take() {
            Some(live) => live,
            None => {
                let driver = self
                    .launcher
                    .launch(&self.stealth)
                    .await
                    .map_err(|source| ScraperError::SessionSetup { source })?;
                tracing::debug!(
                    viewport_width = self.stealth.viewport_width,
                    viewport_height = self.stealth.viewport_height,
                    headless = self.stealth.headless,
                    "browser session opened"
                );
                driver
            }
        };
        Ok(self.active.insert(driver))
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Releases the browser. Shutdown errors are logged, never returned.
    pub async fn close(&mut self) {
        let Some(mut driver) = self.active.take() else {
            return;
        };
        match driver.shutdown().await {
            Ok(()) => tracing::debug!("browser session closed"),
            Err(err) => tracing::warn!(error = %err, "browser session did not shut down cleanly"),
        }
    }

    #[must_use]
    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::snapshot::{SnapshotDriver, SnapshotLauncher};
    use crate::dom::DomError;

    fn snapshot_session() -> SessionManager<SnapshotLauncher> {
        SessionManager::new(
            SnapshotLauncher::new(SnapshotDriver::default()),
            StealthConfig::default(),
        )
    }

    #[tokio::test]
    async fn open_twice_reuses_live_session() {
        let mut session = snapshot_session();
        session.open().await.unwrap();
        session.open().await.unwrap();
        assert!(session.is_open());
        assert_eq!(session.launcher().launch_count(), 1);
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mut session = snapshot_session();
        session.open().await.unwrap();
        session.close().await;
        session.close().await;
        assert!(!session.is_open());
        assert_eq!(session.launcher().driver().shutdown_count(), 1);
    }

    #[tokio::test]
    async fn close_without_open_is_a_no_op() {
        let mut session = snapshot_session();
        session.close().await;
        assert_eq!(session.launcher().driver().shutdown_count(), 0);
    }

    #[tokio::test]
    async fn launch_failure_is_session_setup_error() {
        let mut session = SessionManager::new(
            SnapshotLauncher::failing(DomError::Launch("no chrome binary".to_string())),
            StealthConfig::default(),
        );
        let err = session.open().await.map(|_| ()).unwrap_err();
        assert!(matches!(err, ScraperError::SessionSetup { .. }));
        assert!(err.is_fatal());
        assert!(!session.is_open());
    }
}
