//! Search request construction and the wait for the results feed.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::{PlatformProfile, Timings};
use crate::dom::DomDriver;
use crate::error::ScraperError;

/// Characters escaped inside one query word. Words are joined with `+`, so
/// `+` itself must be escaped.
const QUERY_WORD: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Free-text query sent to the platform for `location`.
#[must_use]
pub fn search_query(location: &str) -> String {
    format!("veterinary clinics in {}", location.trim())
}

/// Search URL for `location`: the query's words percent-encoded and joined
/// with `+`, appended to `base`.
#[must_use]
pub fn build_search_url(base: &str, location: &str) -> String {
    let words: Vec<String> = search_query(location)
        .split_whitespace()
        .map(|word| utf8_percent_encode(word, QUERY_WORD).to_string())
        .collect();
    format!("{base}{}", words.join("+"))
}

/// Issues the search and waits until the results feed is rendered.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    platform: &'a PlatformProfile,
    timings: &'a Timings,
}

impl<'a> Navigator<'a> {
    #[must_use]
    pub fn new(platform: &'a PlatformProfile, timings: &'a Timings) -> Self {
        Self { platform, timings }
    }

    /// Navigates to the search page for `location` and returns its URL once
    /// the feed is present and the settle delay has passed.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Navigation`] if the page load itself fails.
    /// - [`ScraperError::NavigationTimeout`] if the feed never appears.
    pub async fn open_results<D: DomDriver>(
        &self,
        driver: &D,
        location: &str,
    ) -> Result<String, ScraperError> {
        let url = build_search_url(&self.platform.search_base_url, location);
        tracing::debug!(url, "navigating to search results");

        driver
            .navigate(&url)
            .await
            .map_err(|source| ScraperError::Navigation {
                url: url.clone(),
                source,
            })?;

        let feed = driver
            .wait_for_selector(&self.platform.feed_selector, self.timings.feed_timeout)
            .await
            .map_err(|source| ScraperError::Navigation {
                url: url.clone(),
                source,
            })?;
        if feed.is_none() {
            return Err(ScraperError::NavigationTimeout {
                selector: self.platform.feed_selector.clone(),
                timeout: self.timings.feed_timeout,
            });
        }

        if !self.timings.settle_delay.is_zero() {
            tokio::time::sleep(self.timings.settle_delay).await;
        }
        Ok(url)
    }
}
