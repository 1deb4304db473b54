use thiserror::Error;

/// Failures raised by a semantic search backend.
///
/// All variants are recovered inside the orchestrator by switching to the
/// fallback selector; none of them reach the public entry points.
#[derive(Debug, Error)]
pub enum RetrieverError {
    #[error("search backend unavailable: {0}")]
    Unavailable(String),

    #[error("search backend did not respond within {0}ms")]
    Timeout(u64),

    #[error("search backend returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors surfaced by the schema-context subsystem itself.
#[derive(Debug, Error)]
pub enum SchemaContextError {
    /// The catalog has zero tables. The only condition under which
    /// `get_relevant_tables` returns an error: it indicates a
    /// configuration problem one level up, not a per-request failure.
    #[error("schema catalog is empty")]
    EmptyCatalog,

    #[error("catalog load error: {0}")]
    CatalogLoad(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for SchemaContextError {
    fn from(err: std::io::Error) -> Self {
        SchemaContextError::CatalogLoad(err.to_string())
    }
}

impl From<serde_json::Error> for SchemaContextError {
    fn from(err: serde_json::Error) -> Self {
        SchemaContextError::CatalogLoad(err.to_string())
    }
}
