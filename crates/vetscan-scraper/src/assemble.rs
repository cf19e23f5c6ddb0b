//! Turns the rendered result nodes into validated records.

use vetscan_core::ClinicRecord;

use crate::config::{PlatformProfile, MAX_RESULT_NODES};
use crate::dom::DomDriver;
use crate::extract::{FieldExtractor, NodeDiagnostics};

/// Records in feed order plus what was skipped on the way.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub records: Vec<ClinicRecord>,
    /// Result nodes examined, at most [`MAX_RESULT_NODES`].
    pub nodes_seen: usize,
    /// Nodes dropped because they could not be read at all.
    pub nodes_skipped: usize,
    pub diagnostics: Vec<NodeDiagnostics>,
}

#[derive(Debug)]
pub struct ResultAssembler<'a> {
    result_selector: &'a str,
    extractor: &'a FieldExtractor,
}

impl<'a> ResultAssembler<'a> {
    #[must_use]
    pub fn new(platform: &'a PlatformProfile, extractor: &'a FieldExtractor) -> Self {
        Self {
            result_selector: &platform.result_selector,
            extractor,
        }
    }

    /// Extracts the first [`MAX_RESULT_NODES`] result nodes, one at a time.
    ///
    /// Nodes without a name are dropped. A node that fails outright is logged
    /// and skipped; failing to list the nodes yields an empty assembly.
    pub async fn assemble<D: DomDriver>(&self, driver: &D) -> Assembly {
        let nodes = match driver.find_all(self.result_selector).await {
            Ok(nodes) => nodes,
            Err(err) => {
                tracing::warn!(selector = self.result_selector, error = %err, "could not list result nodes");
                return Assembly::default();
            }
        };

        let mut assembly = Assembly::default();
        for (index, node) in nodes.iter().take(MAX_RESULT_NODES).enumerate() {
            assembly.nodes_seen += 1;
            match self.extractor.extract(index, node).await {
                Ok(extraction) => {
                    if let Some(record) = extraction.record {
                        assembly.records.push(record);
                    }
                    assembly.diagnostics.push(extraction.diagnostics);
                }
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping result node");
                    assembly.nodes_skipped += 1;
                }
            }
        }

        tracing::debug!(
            nodes_found = nodes.len(),
            nodes_seen = assembly.nodes_seen,
            records = assembly.records.len(),
            skipped = assembly.nodes_skipped,
            "assembled result records"
        );
        assembly
    }
}
