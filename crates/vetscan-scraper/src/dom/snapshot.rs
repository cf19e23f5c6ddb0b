//! In-memory DOM backend serving a fixed result page.
//!
//! A snapshot is a tree of [`SnapshotNode`]s where each node lists, per
//! selector, the descendants that selector matches. Selectors are matched
//! literally, no CSS engine is involved. This is enough to replay a captured
//! listing set through the full pipeline without a browser.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{DomDriver, DomError, DomNode, Launcher};
use crate::config::{PlatformProfile, StealthConfig};
use crate::scroll::{MEASURE_HEIGHT_JS, SCROLL_TO_BOTTOM_JS};

#[derive(Debug)]
struct ScrollScript {
    /// Height reported after 0, 1, 2, ... scrolls. `None` fails the measurement.
    heights: Vec<Option<i64>>,
    cursor: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotNode {
    text: String,
    attributes: BTreeMap<String, String>,
    matches: Vec<(String, SnapshotNode)>,
    scroll: Option<Arc<ScrollScript>>,
    detached: bool,
}

impl SnapshotNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf element with the given rendered text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Registers `node` as a match for `selector` under this node.
    #[must_use]
    pub fn with_match(mut self, selector: impl Into<String>, node: SnapshotNode) -> Self {
        self.matches.push((selector.into(), node));
        self
    }

    /// Makes this node a scroll container reporting `heights` in sequence.
    ///
    /// The first entry is the height before any scroll; each scroll advances
    /// one entry and the last entry repeats. `None` makes that measurement
    /// fail.
    #[must_use]
    pub fn with_scroll_heights(mut self, heights: Vec<Option<i64>>) -> Self {
        self.scroll = Some(Arc::new(ScrollScript {
            heights,
            cursor: AtomicUsize::new(0),
        }));
        self
    }

    /// Every query against this node fails as if it had been recycled.
    #[must_use]
    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    fn ensure_attached(&self) -> Result<(), DomError> {
        if self.detached {
            Err(DomError::Detached)
        } else {
            Ok(())
        }
    }

    fn matching(&self, selector: &str) -> Vec<SnapshotNode> {
        self.matches
            .iter()
            .filter(|(sel, _)| sel == selector)
            .map(|(_, node)| node.clone())
            .collect()
    }
}

impl DomNode for SnapshotNode {
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError> {
        self.ensure_attached()?;
        Ok(self.matching(selector))
    }

    async fn text(&self) -> Result<String, DomError> {
        self.ensure_attached()?;
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, DomError> {
        self.ensure_attached()?;
        Ok(self.attributes.get(name).cloned())
    }

    async fn call_function(&self, function: &str) -> Result<serde_json::Value, DomError> {
        self.ensure_attached()?;
        let Some(script) = &self.scroll else {
            return Err(DomError::Script("element is not scrollable".to_string()));
        };
        let last = script.heights.len().saturating_sub(1);

        if function == MEASURE_HEIGHT_JS {
            let cursor = script.cursor.load(Ordering::SeqCst).min(last);
            match script.heights.get(cursor).copied().flatten() {
                Some(height) => Ok(serde_json::Value::from(height)),
                None => Err(DomError::Script("scrollHeight unavailable".to_string())),
            }
        } else if function == SCROLL_TO_BOTTOM_JS {
            let _ = script
                .cursor
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |c| {
                    Some((c + 1).min(last))
                });
            Ok(serde_json::Value::Null)
        } else {
            Err(DomError::Script(format!("unsupported function: {function}")))
        }
    }
}

/// A page backed by a [`SnapshotNode`] document root.
#[derive(Debug, Clone, Default)]
pub struct SnapshotDriver {
    root: SnapshotNode,
    visits: Arc<Mutex<Vec<String>>>,
    shutdowns: Arc<AtomicUsize>,
    navigation_error: Option<DomError>,
    closed: bool,
}

impl SnapshotDriver {
    #[must_use]
    pub fn new(root: SnapshotNode) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    /// A result page where `feed` matches the platform's feed selector and
    /// `listings` match its result selector, in order.
    #[must_use]
    pub fn results_page(
        platform: &PlatformProfile,
        feed: SnapshotNode,
        listings: Vec<SnapshotNode>,
    ) -> Self {
        let root = listings.into_iter().fold(
            SnapshotNode::new().with_match(platform.feed_selector.clone(), feed),
            |root, listing| root.with_match(platform.result_selector.clone(), listing),
        );
        Self::new(root)
    }

    /// Every navigation fails with `err`.
    #[must_use]
    pub fn failing_navigation(mut self, err: DomError) -> Self {
        self.navigation_error = Some(err);
        self
    }

    pub async fn visited_urls(&self) -> Vec<String> {
        self.visits.lock().await.clone()
    }

    /// Number of drivers sharing this snapshot that have been shut down.
    #[must_use]
    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

impl DomDriver for SnapshotDriver {
    type Node = SnapshotNode;

    async fn navigate(&self, url: &str) -> Result<(), DomError> {
        self.visits.lock().await.push(url.to_string());
        match &self.navigation_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<SnapshotNode>, DomError> {
        self.root.find_all(selector).await
    }

    async fn shutdown(&mut self) -> Result<(), DomError> {
        if !self.closed {
            self.closed = true;
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Hands out clones of one [`SnapshotDriver`]; counters are shared so tests
/// can observe session lifetimes.
#[derive(Debug, Clone, Default)]
pub struct SnapshotLauncher {
    driver: SnapshotDriver,
    launches: Arc<AtomicUsize>,
    launch_error: Option<DomError>,
}

impl SnapshotLauncher {
    #[must_use]
    pub fn new(driver: SnapshotDriver) -> Self {
        Self {
            driver,
            ..Self::default()
        }
    }

    /// Every launch fails with `err`.
    #[must_use]
    pub fn failing(err: DomError) -> Self {
        Self {
            launch_error: Some(err),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn driver(&self) -> &SnapshotDriver {
        &self.driver
    }

    #[must_use]
    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl Launcher for SnapshotLauncher {
    type Driver = SnapshotDriver;

    async fn launch(&self, _stealth: &StealthConfig) -> Result<SnapshotDriver, DomError> {
        if let Some(err) = &self.launch_error {
            return Err(err.clone());
        }
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(self.driver.clone())
    }
}
