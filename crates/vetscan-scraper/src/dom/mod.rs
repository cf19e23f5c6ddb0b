//! Minimal DOM capability interface the scraping pipeline is written against.
//!
//! The pipeline never talks to a browser directly. It needs to find elements
//! by CSS selector, read their rendered text and attributes, run a small
//! function against an element, and wait for a selector to appear. Two
//! backends implement this: [`chrome`] drives a real headless Chrome over
//! CDP and [`snapshot`] serves a fixed in-memory tree.

pub mod chrome;
pub mod snapshot;

use std::time::Duration;

use crate::config::StealthConfig;

/// Poll interval for [`DomDriver::wait_for_selector`].
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Errors raised by a DOM backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("browser protocol error: {0}")]
    Backend(String),

    #[error("element is no longer attached to the document")]
    Detached,

    #[error("script failed: {0}")]
    Script(String),
}

/// A handle to one element of the current render.
///
/// Handles are only meaningful for the render that produced them; virtualized
/// feeds recycle their children while scrolling, so callers must not keep a
/// handle across a scroll.
#[allow(async_fn_in_trait)]
pub trait DomNode: Sized {
    /// Descendants matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError>;

    /// Rendered text (`innerText`), empty when the element has none.
    async fn text(&self) -> Result<String, DomError>;

    async fn attribute(&self, name: &str) -> Result<Option<String>, DomError>;

    /// Calls a JavaScript function declaration with the element bound to
    /// `this` and returns its JSON result.
    async fn call_function(&self, function: &str) -> Result<serde_json::Value, DomError>;
}

/// Page-level access for one live browser session.
#[allow(async_fn_in_trait)]
pub trait DomDriver {
    type Node: DomNode;

    async fn navigate(&self, url: &str) -> Result<(), DomError>;

    /// Elements of the whole document matching `selector`.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Node>, DomError>;

    /// Releases the browser behind this driver. Must tolerate repeated calls.
    async fn shutdown(&mut self) -> Result<(), DomError>;

    /// Polls until an element matches `selector` or `timeout` elapses.
    ///
    /// Returns `Ok(None)` on timeout. Query errors while polling are treated
    /// as "not there yet" because the document may be mid-navigation.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<Self::Node>, DomError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.find_all(selector).await {
                Ok(nodes) => {
                    if let Some(node) = nodes.into_iter().next() {
                        return Ok(Some(node));
                    }
                }
                Err(err) => {
                    tracing::debug!(selector, error = %err, "selector query failed while waiting");
                }
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}

/// Starts browser sessions for a [`crate::SessionManager`].
#[allow(async_fn_in_trait)]
pub trait Launcher {
    type Driver: DomDriver;

    async fn launch(&self, stealth: &StealthConfig) -> Result<Self::Driver, DomError>;
}
