//! Ordered fallback chains of named extraction strategies.

use serde::Serialize;
use vetscan_core::Extracted;

use crate::dom::{DomError, DomNode};

/// Where a strategy reads its candidate values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Rendered text of every descendant matching the selector.
    Text(&'static str),
    /// `aria-label` of every match, or its text when the label is missing or
    /// blank.
    LabelOrText(&'static str),
    /// The named attribute of every match.
    Attribute(&'static str, &'static str),
    /// Each line of the node's own text.
    NodeLines,
    /// The node's whole text.
    NodeText,
}

type Accept<T> = Box<dyn Fn(&str) -> Option<T> + Send + Sync>;

/// One way of finding a field: a source plus a predicate that turns a
/// candidate string into a value.
pub struct Strategy<T> {
    name: &'static str,
    source: Source,
    accept: Accept<T>,
}

impl<T> Strategy<T> {
    pub fn new(
        name: &'static str,
        source: Source,
        accept: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            source,
            accept: Box::new(accept),
        }
    }

    /// Applies the strategy's validity predicate to a single candidate.
    #[must_use]
    pub fn attempt(&self, candidate: &str) -> Option<T> {
        (self.accept)(candidate.trim())
    }
}

impl<T> std::fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// A strategy whose DOM query failed while resolving a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyFailure {
    pub field: &'static str,
    pub strategy: &'static str,
    pub error: String,
}

/// What happened while extracting one result node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeDiagnostics {
    pub index: usize,
    /// `(field, strategy)` for every field that resolved, in extraction order.
    pub resolved: Vec<(&'static str, &'static str)>,
    pub failures: Vec<StrategyFailure>,
}

impl NodeDiagnostics {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    fn record_failure(&mut self, field: &'static str, strategy: &'static str, error: &DomError) {
        tracing::debug!(index = self.index, field, strategy, error = %error, "extraction strategy failed");
        self.failures.push(StrategyFailure {
            field,
            strategy,
            error: error.to_string(),
        });
    }

    /// Strategy that resolved `field`, if any.
    #[must_use]
    pub fn resolved_by(&self, field: &str) -> Option<&'static str> {
        self.resolved
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, strategy)| *strategy)
    }
}

/// The strategies for one field, tried in order; the first accepted
/// candidate wins.
#[derive(Debug)]
pub struct FieldChain<T> {
    field: &'static str,
    strategies: Vec<Strategy<T>>,
}

impl<T> FieldChain<T> {
    #[must_use]
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            strategies: Vec::new(),
        }
    }

    #[must_use]
    pub fn then(mut self, strategy: Strategy<T>) -> Self {
        self.strategies.push(strategy);
        self
    }

    #[cfg(test)]
    pub(crate) fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name).collect()
    }

    /// Runs the chain against `node`, whose text has already been read into
    /// `node_text`.
    ///
    /// A strategy whose query errors is logged to `diagnostics` and skipped.
    pub async fn resolve<N: DomNode>(
        &self,
        node: &N,
        node_text: &str,
        diagnostics: &mut NodeDiagnostics,
    ) -> Extracted<T> {
        for strategy in &self.strategies {
            match self.run(strategy, node, node_text, diagnostics).await {
                Ok(Some(value)) => {
                    tracing::debug!(
                        index = diagnostics.index,
                        field = self.field,
                        strategy = strategy.name,
                        "field resolved"
                    );
                    diagnostics.resolved.push((self.field, strategy.name));
                    return Extracted::Found(value);
                }
                Ok(None) => {}
                Err(err) => diagnostics.record_failure(self.field, strategy.name, &err),
            }
        }
        Extracted::NotAvailable
    }

    async fn run<N: DomNode>(
        &self,
        strategy: &Strategy<T>,
        node: &N,
        node_text: &str,
        diagnostics: &mut NodeDiagnostics,
    ) -> Result<Option<T>, DomError> {
        let selector = match strategy.source {
            Source::NodeText => return Ok(strategy.attempt(node_text)),
            Source::NodeLines => return Ok(node_text.lines().find_map(|l| strategy.attempt(l))),
            Source::Text(selector)
            | Source::LabelOrText(selector)
            | Source::Attribute(selector, _) => selector,
        };

        for candidate in node.find_all(selector).await? {
            match read_candidate(strategy.source, &candidate).await {
                Ok(Some(value)) => {
                    if let Some(accepted) = strategy.attempt(&value) {
                        return Ok(Some(accepted));
                    }
                }
                Ok(None) => {}
                Err(err) => diagnostics.record_failure(self.field, strategy.name, &err),
            }
        }
        Ok(None)
    }
}

async fn read_candidate<N: DomNode>(source: Source, node: &N) -> Result<Option<String>, DomError> {
    match source {
        Source::Text(_) => node.text().await.map(Some),
        Source::LabelOrText(_) => match node.attribute("aria-label").await? {
            Some(label) if !label.trim().is_empty() => Ok(Some(label)),
            _ => node.text().await.map(Some),
        },
        Source::Attribute(_, name) => node.attribute(name).await,
        Source::NodeLines | Source::NodeText => Ok(None),
    }
}
