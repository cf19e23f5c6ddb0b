use std::time::Duration;

use thiserror::Error;

use crate::dom::DomError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("browser session could not be started: {source}")]
    SessionSetup {
        #[source]
        source: DomError,
    },

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DomError,
    },

    #[error("results feed `{selector}` did not appear within {timeout:?}")]
    NavigationTimeout { selector: String, timeout: Duration },

    #[error("search for \"{location}\" did not finish within {timeout:?}")]
    SearchTimeout { location: String, timeout: Duration },

    #[error("extraction failed for result node {index}: {source}")]
    PerNodeExtraction {
        index: usize,
        #[source]
        source: DomError,
    },
}

impl ScraperError {
    /// Whether the error must reach the caller instead of degrading the
    /// search to an empty result.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScraperError::SessionSetup { .. })
    }
}
