//! Scroll-driven pagination of the results feed.
//!
//! The feed lazily appends listings as it is scrolled. The converger scrolls
//! it to the bottom until its scroll height stops growing, bounded by
//! [`MAX_SCROLL_ITERATIONS`].

use std::time::Duration;

use serde::Serialize;

use crate::config::{PlatformProfile, Timings, MAX_SCROLL_ITERATIONS};
use crate::dom::{DomDriver, DomError, DomNode};

/// Returns the element's `scrollHeight`.
pub const MEASURE_HEIGHT_JS: &str = "function() { return this.scrollHeight; }";

/// Scrolls the element to its bottom edge.
pub const SCROLL_TO_BOTTOM_JS: &str = "function() { this.scrollTop = this.scrollHeight; }";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Two consecutive measurements were equal.
    Converged,
    CapReached,
    /// A scroll or measurement failed; the feed is taken as final.
    MeasurementFailed,
    FeedMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollOutcome {
    /// Scrolls performed.
    pub iterations: usize,
    pub last_height: Option<i64>,
    pub reason: StopReason,
}

#[derive(Debug, Clone)]
pub struct ScrollConverger<'a> {
    feed_selector: &'a str,
    settle: Duration,
    max_iterations: usize,
}

impl<'a> ScrollConverger<'a> {
    #[must_use]
    pub fn new(platform: &'a PlatformProfile, timings: &Timings) -> Self {
        Self {
            feed_selector: &platform.feed_selector,
            settle: timings.scroll_settle,
            max_iterations: MAX_SCROLL_ITERATIONS,
        }
    }

    /// Scrolls the feed until its height stops changing.
    ///
    /// Never fails: every failure ends the loop and is reported in the
    /// outcome's [`StopReason`].
    pub async fn converge<D: DomDriver>(&self, driver: &D) -> ScrollOutcome {
        let feed = match driver.find_all(self.feed_selector).await {
            Ok(nodes) => nodes.into_iter().next(),
            Err(err) => {
                tracing::warn!(error = %err, "could not locate results feed for scrolling");
                return stopped(0, None, StopReason::MeasurementFailed);
            }
        };
        let Some(feed) = feed else {
            tracing::warn!(selector = self.feed_selector, "results feed vanished before scrolling");
            return stopped(0, None, StopReason::FeedMissing);
        };

        let mut last_height = match measure(&feed).await {
            Ok(height) => height,
            Err(err) => {
                tracing::warn!(error = %err, "initial feed height measurement failed");
                return stopped(0, None, StopReason::MeasurementFailed);
            }
        };

        let mut iterations = 0;
        while iterations < self.max_iterations {
            if let Err(err) = feed.call_function(SCROLL_TO_BOTTOM_JS).await {
                tracing::warn!(iterations, error = %err, "feed scroll failed");
                return stopped(iterations, Some(last_height), StopReason::MeasurementFailed);
            }
            iterations += 1;
            if !self.settle.is_zero() {
                tokio::time::sleep(self.settle).await;
            }

            let height = match measure(&feed).await {
                Ok(height) => height,
                Err(err) => {
                    tracing::warn!(iterations, error = %err, "feed height measurement failed");
                    return stopped(iterations, Some(last_height), StopReason::MeasurementFailed);
                }
            };
            tracing::debug!(iterations, previous = last_height, height, "scrolled results feed");
            if height == last_height {
                return stopped(iterations, Some(height), StopReason::Converged);
            }
            last_height = height;
        }

        tracing::debug!(iterations, "scroll iteration cap reached");
        stopped(iterations, Some(last_height), StopReason::CapReached)
    }
}

fn stopped(iterations: usize, last_height: Option<i64>, reason: StopReason) -> ScrollOutcome {
    ScrollOutcome {
        iterations,
        last_height,
        reason,
    }
}

#[allow(clippy::cast_possible_truncation)]
async fn measure<N: DomNode>(feed: &N) -> Result<i64, DomError> {
    let value = feed.call_function(MEASURE_HEIGHT_JS).await?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|h| h.round() as i64))
        .ok_or_else(|| DomError::Script(format!("scrollHeight is not a number: {value}")))
}
