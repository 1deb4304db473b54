use crate::config::RetrievalConfig;
use crate::error::{RetrieverError, SchemaContextError};
use crate::models::{SchemaCatalog, TableSelection};
use crate::services::fallback::FallbackSelector;
use crate::services::retriever::SemanticRetriever;
use std::sync::Arc;

/// Coordinates semantic retrieval, the deterministic fallback, and the
/// final selection invariants (bounded, deduplicated, catalog-backed,
/// non-empty for a non-empty catalog).
///
/// Retriever failures are recorded and absorbed here; the only error
/// this returns is `EmptyCatalog`.
pub struct RetrievalOrchestrator {
    retriever: Arc<dyn SemanticRetriever>,
    fallback: FallbackSelector,
    config: RetrievalConfig,
}

impl RetrievalOrchestrator {
    pub fn new(retriever: Arc<dyn SemanticRetriever>, config: RetrievalConfig) -> Self {
        Self {
            retriever,
            fallback: FallbackSelector::new(&config),
            config,
        }
    }

    /// Select the tables relevant to `question` against one catalog
    /// snapshot. The retriever call is the single await point; no
    /// retries are made within a request.
    pub async fn get_relevant_tables(
        &self,
        question: &str,
        catalog: &SchemaCatalog,
    ) -> Result<TableSelection, SchemaContextError> {
        if catalog.is_empty() {
            return Err(SchemaContextError::EmptyCatalog);
        }

        let candidates = match self
            .retriever
            .search(question, self.config.effective_top_k())
            .await
        {
            Ok(result) if !result.is_empty() => {
                let mut scored = result;
                // Stable sort: backend order breaks score ties
                scored.sort_by(|a, b| {
                    b.score
                        .partial_cmp(&a.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                scored.into_iter().map(|s| s.table_name).collect()
            }
            Ok(_) => {
                tracing::debug!(question, "semantic search matched nothing, using fallback");
                self.fallback.select(question, catalog).into_tables()
            }
            Err(err) => {
                self.record_retriever_failure(&err);
                self.fallback.select(question, catalog).into_tables()
            }
        };

        // Stale or duplicate hits are dropped before the cap so they
        // cannot consume selection slots; the over-fetched top_k leaves
        // room for lower-ranked valid hits to move up.
        let mut selected: Vec<String> = Vec::with_capacity(self.config.max_tables);
        for name in candidates {
            if selected.len() >= self.config.max_tables {
                break;
            }
            if selected.contains(&name) {
                continue;
            }
            if !catalog.contains(&name) {
                tracing::warn!(table = %name, "selected table not in catalog, dropping");
                continue;
            }
            selected.push(name);
        }

        if selected.is_empty() {
            selected = self.safety_net(catalog);
        }

        Ok(TableSelection::new(selected))
    }

    /// Last resort when every earlier step produced nothing: the
    /// configured core tables, or failing that the first catalog tables.
    /// The catalog is known non-empty here, so neither path returns
    /// an empty list to the downstream generator.
    fn safety_net(&self, catalog: &SchemaCatalog) -> Vec<String> {
        let core: Vec<String> = self
            .config
            .core_tables
            .iter()
            .filter(|t| catalog.contains(t))
            .take(self.config.max_tables)
            .cloned()
            .collect();
        if !core.is_empty() {
            return core;
        }
        catalog
            .table_names()
            .take(self.config.max_tables)
            .map(|t| t.to_string())
            .collect()
    }

    fn record_retriever_failure(&self, err: &RetrieverError) {
        match err {
            RetrieverError::Timeout(ms) => {
                tracing::warn!(timeout_ms = ms, "semantic search timed out, using fallback")
            }
            RetrieverError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "semantic search unavailable, using fallback")
            }
            RetrieverError::MalformedResponse(msg) => {
                tracing::warn!(error = %msg, "semantic search response unusable, using fallback")
            }
        }
    }
}
