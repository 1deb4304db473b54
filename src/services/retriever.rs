use crate::error::RetrieverError;
use crate::models::{RetrievalResult, ScoredTable};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Semantic search over the table-document corpus.
///
/// The backend is an opaque capability: a hosted vector index, a local
/// embedding store, or an in-memory stand-in for tests all satisfy the
/// same contract. An empty `Ok` result means the search ran and matched
/// nothing, which the orchestrator treats differently from an `Err`.
#[async_trait::async_trait]
pub trait SemanticRetriever: Send + Sync {
    async fn search(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<RetrievalResult, RetrieverError>;
}

/// One match as the search backend reports it.
#[derive(Debug, Deserialize)]
struct SearchHit {
    document_id: String,
    #[serde(default)]
    table_name: Option<String>,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

impl SearchHit {
    /// Map the hit back to a table name. An explicit `table_name` field
    /// wins; otherwise the corpus naming conventions (`doc_<table>`,
    /// `table_<table>`) are stripped from the document id.
    fn into_table_name(self) -> String {
        if let Some(name) = self.table_name {
            return name;
        }
        let id = self.document_id;
        if let Some(name) = id.strip_prefix("doc_") {
            return name.to_string();
        }
        if let Some(name) = id.strip_prefix("table_") {
            return name.to_string();
        }
        id
    }
}

/// HTTP client for an external search backend exposing
/// `POST {base_url}/search`.
pub struct HttpSearchClient {
    base_url: String,
    api_key: Option<String>,
    timeout_ms: u64,
    http_client: HttpClient,
}

impl HttpSearchClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            timeout_ms,
            http_client: HttpClient::new(),
        }
    }

    async fn post_search(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<RetrievalResult, RetrieverError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let mut request = self.http_client.post(&url).json(&json!({
            "query": question,
            "top_k": top_k,
        }));

        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| RetrieverError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RetrieverError::Unavailable(format!(
                "search backend returned {}: {}",
                status, error_text
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| RetrieverError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .results
            .into_iter()
            .map(|hit| {
                let score = hit.score;
                ScoredTable {
                    table_name: hit.into_table_name(),
                    score,
                }
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl SemanticRetriever for HttpSearchClient {
    async fn search(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<RetrievalResult, RetrieverError> {
        // One bounded wait per request; a slow backend becomes a Timeout
        // rather than stalling the pipeline, and the caller falls back.
        match tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            self.post_search(question, top_k),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RetrieverError::Timeout(self.timeout_ms)),
        }
    }
}
