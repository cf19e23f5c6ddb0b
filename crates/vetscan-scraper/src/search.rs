//! One location search, end to end.

use std::time::Instant;

use serde::Serialize;
use vetscan_core::ClinicRecord;

use crate::assemble::{Assembly, ResultAssembler};
use crate::config::ScraperConfig;
use crate::dom::chrome::ChromeLauncher;
use crate::dom::{DomDriver, Launcher};
use crate::error::ScraperError;
use crate::extract::{FieldExtractor, NodeDiagnostics};
use crate::navigator::Navigator;
use crate::scroll::{ScrollConverger, ScrollOutcome};
use crate::session::SessionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    Ready,
    /// The feed never appeared.
    TimedOut,
    NavigationFailed,
    /// The overall search deadline elapsed.
    SearchTimedOut,
}

/// Everything one search observed, including why it came back empty.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub location: String,
    pub url: Option<String>,
    pub feed: FeedStatus,
    pub scroll: Option<ScrollOutcome>,
    pub nodes_seen: usize,
    pub nodes_skipped: usize,
    pub records: Vec<ClinicRecord>,
    pub diagnostics: Vec<NodeDiagnostics>,
    /// The non-fatal error that ended the search early, if any.
    pub error: Option<String>,
}

impl SearchReport {
    fn completed(location: &str, url: String, scroll: ScrollOutcome, assembly: Assembly) -> Self {
        Self {
            location: location.to_string(),
            url: Some(url),
            feed: FeedStatus::Ready,
            scroll: Some(scroll),
            nodes_seen: assembly.nodes_seen,
            nodes_skipped: assembly.nodes_skipped,
            records: assembly.records,
            diagnostics: assembly.diagnostics,
            error: None,
        }
    }

    fn degraded(location: &str, err: &ScraperError) -> Self {
        let (feed, url) = match err {
            ScraperError::NavigationTimeout { .. } => (FeedStatus::TimedOut, None),
            ScraperError::SearchTimeout { .. } => (FeedStatus::SearchTimedOut, None),
            ScraperError::Navigation { url, .. } => (FeedStatus::NavigationFailed, Some(url.clone())),
            ScraperError::SessionSetup { .. } | ScraperError::PerNodeExtraction { .. } => {
                (FeedStatus::NavigationFailed, None)
            }
        };
        Self {
            location: location.to_string(),
            url,
            feed,
            scroll: None,
            nodes_seen: 0,
            nodes_skipped: 0,
            records: Vec::new(),
            diagnostics: Vec::new(),
            error: Some(err.to_string()),
        }
    }
}

/// Veterinary clinic search over a map listing platform.
///
/// Each search opens a browser session, runs navigation, scrolling and
/// extraction under the configured deadline, and closes the session on
/// every exit path. Only a failure to start the browser is returned as an
/// error; every other failure degrades to an empty result.
pub struct VetScraper<L: Launcher = ChromeLauncher> {
    config: ScraperConfig,
    extractor: FieldExtractor,
    session: SessionManager<L>,
}

impl VetScraper<ChromeLauncher> {
    #[must_use]
    pub fn new(config: ScraperConfig) -> Self {
        Self::with_launcher(config, ChromeLauncher)
    }
}

impl<L: Launcher> VetScraper<L> {
    pub fn with_launcher(config: ScraperConfig, launcher: L) -> Self {
        let extractor = FieldExtractor::new(&config.platform);
        let session = SessionManager::new(launcher, config.stealth.clone());
        Self {
            config,
            extractor,
            session,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    #[must_use]
    pub fn launcher(&self) -> &L {
        self.session.launcher()
    }

    /// Clinics listed for `location`, in feed order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::SessionSetup`] if the browser cannot start.
    pub async fn search(&mut self, location: &str) -> Result<Vec<ClinicRecord>, ScraperError> {
        self.search_with_report(location)
            .await
            .map(|report| report.records)
    }

    /// Like [`VetScraper::search`], returning the full [`SearchReport`].
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::SessionSetup`] if the browser cannot start.
    pub async fn search_with_report(&mut self, location: &str) -> Result<SearchReport, ScraperError> {
        let started = Instant::now();
        let deadline = self.config.timings.search_timeout;
        tracing::info!(location, "clinic search started");

        let outcome = {
            let driver = self.session.open().await?;
            let pipeline = run_pipeline(driver, &self.config, &self.extractor, location);
            tokio::time::timeout(deadline, pipeline).await
        };
        self.session.close().await;

        let report = match outcome {
            Ok(Ok(report)) => report,
            Ok(Err(err)) if err.is_fatal() => return Err(err),
            Ok(Err(err)) => {
                tracing::warn!(location, error = %err, "search degraded to empty result");
                SearchReport::degraded(location, &err)
            }
            Err(_elapsed) => {
                let err = ScraperError::SearchTimeout {
                    location: location.to_string(),
                    timeout: deadline,
                };
                tracing::warn!(location, error = %err, "search degraded to empty result");
                SearchReport::degraded(location, &err)
            }
        };

        tracing::info!(
            location,
            clinics_found = report.records.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "clinic search finished"
        );
        Ok(report)
    }
}

async fn run_pipeline<D: DomDriver>(
    driver: &D,
    config: &ScraperConfig,
    extractor: &FieldExtractor,
    location: &str,
) -> Result<SearchReport, ScraperError> {
    let url = Navigator::new(&config.platform, &config.timings)
        .open_results(driver, location)
        .await?;
    let scroll = ScrollConverger::new(&config.platform, &config.timings)
        .converge(driver)
        .await;
    let assembly = ResultAssembler::new(&config.platform, extractor)
        .assemble(driver)
        .await;
    Ok(SearchReport::completed(location, url, scroll, assembly))
}
