//! Field extraction from one result node.

pub mod fields;
pub mod strategy;

use vetscan_core::{ClinicRecord, Extracted};

use crate::config::PlatformProfile;
use crate::dom::DomNode;
use crate::error::ScraperError;

pub use strategy::{FieldChain, NodeDiagnostics, Source, Strategy, StrategyFailure};

/// Result of extracting one node. `record` is `None` when no name resolved.
#[derive(Debug, Clone)]
pub struct NodeExtraction {
    pub record: Option<ClinicRecord>,
    pub diagnostics: NodeDiagnostics,
}

/// Applies the seven field chains to result nodes.
#[derive(Debug)]
pub struct FieldExtractor {
    name: FieldChain<String>,
    rating: FieldChain<f64>,
    reviews: FieldChain<String>,
    address: FieldChain<String>,
    phone: FieldChain<String>,
    hours: FieldChain<String>,
    website: FieldChain<String>,
}

impl FieldExtractor {
    #[must_use]
    pub fn new(platform: &PlatformProfile) -> Self {
        Self {
            name: fields::name::chain(&platform.brand),
            rating: fields::rating::chain(),
            reviews: fields::reviews::chain(),
            address: fields::address::chain(),
            phone: fields::phone::chain(),
            hours: fields::hours::chain(),
            website: fields::website::chain(&platform.domain),
        }
    }

    /// Extracts a record from the node at feed position `index`.
    ///
    /// Other fields are only looked at once a name has resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::PerNodeExtraction`] when the node's own text
    /// cannot be read, typically because the feed recycled it.
    pub async fn extract<N: DomNode>(
        &self,
        index: usize,
        node: &N,
    ) -> Result<NodeExtraction, ScraperError> {
        let text = node
            .text()
            .await
            .map_err(|source| ScraperError::PerNodeExtraction { index, source })?;
        let mut diagnostics = NodeDiagnostics::new(index);

        let Extracted::Found(name) = self.name.resolve(node, &text, &mut diagnostics).await else {
            tracing::debug!(index, "result node has no usable name");
            return Ok(NodeExtraction {
                record: None,
                diagnostics,
            });
        };

        let record = ClinicRecord {
            name,
            rating: self.rating.resolve(node, &text, &mut diagnostics).await,
            review_count_text: self.reviews.resolve(node, &text, &mut diagnostics).await,
            address: self.address.resolve(node, &text, &mut diagnostics).await,
            phone: self.phone.resolve(node, &text, &mut diagnostics).await,
            hours: self.hours.resolve(node, &text, &mut diagnostics).await,
            website: self.website.resolve(node, &text, &mut diagnostics).await,
        };
        Ok(NodeExtraction {
            record: Some(record),
            diagnostics,
        })
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
