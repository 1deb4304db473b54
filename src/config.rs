use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub retrieval: RetrievalConfig,
    pub search: SearchConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Tuning knobs for table selection.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum number of tables in a final selection.
    pub max_tables: usize,
    /// Minimum number of tables the fallback selector must produce
    /// before core tables stop being appended.
    pub min_fallback_tables: usize,
    /// Tables always eligible as fallback filler, in priority order.
    pub core_tables: Vec<String>,
    /// How many matches to request from the search backend. Over-fetched
    /// relative to `max_tables` so stale or unknown hits can be dropped
    /// without starving the selection.
    pub top_k_over_fetch: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog JSON export.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // Load .env first so file-supplied values are visible to the
        // env::var overrides below
        let _ = dotenv::dotenv();

        let mut builder = config::Config::builder()
            .set_default("retrieval.max_tables", 5)?
            .set_default("retrieval.min_fallback_tables", 1)?
            .set_default("retrieval.core_tables", Vec::<String>::new())?
            .set_default("retrieval.top_k_over_fetch", 8)?
            .set_default("search.base_url", "http://localhost:8080")?
            .set_default("search.timeout_ms", 3000)?
            .set_default("catalog.path", "./tables.json")?
            .set_default("logging.level", "info")?;

        // Load from environment variables
        if let Ok(max_tables) = env::var("MAX_TABLES") {
            builder = builder.set_override(
                "retrieval.max_tables",
                max_tables.parse::<usize>().unwrap_or(5) as i64,
            )?;
        }

        if let Ok(min_fallback) = env::var("MIN_FALLBACK_TABLES") {
            builder = builder.set_override(
                "retrieval.min_fallback_tables",
                min_fallback.parse::<usize>().unwrap_or(1) as i64,
            )?;
        }

        if let Ok(core_tables) = env::var("CORE_TABLES") {
            let tables: Vec<String> = core_tables
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            builder = builder.set_override("retrieval.core_tables", tables)?;
        }

        if let Ok(top_k) = env::var("TOP_K_OVER_FETCH") {
            builder = builder.set_override(
                "retrieval.top_k_over_fetch",
                top_k.parse::<usize>().unwrap_or(8) as i64,
            )?;
        }

        if let Ok(base_url) = env::var("SEARCH_BASE_URL") {
            builder = builder.set_override("search.base_url", base_url)?;
        }

        if let Ok(api_key) = env::var("SEARCH_API_KEY") {
            builder = builder.set_override("search.api_key", Some(api_key))?;
        }

        if let Ok(timeout_ms) = env::var("RETRIEVER_TIMEOUT_MS") {
            builder = builder.set_override(
                "search.timeout_ms",
                timeout_ms.parse::<u64>().unwrap_or(3000) as i64,
            )?;
        }

        if let Ok(catalog_path) = env::var("CATALOG_PATH") {
            builder = builder.set_override("catalog.path", catalog_path)?;
        }

        if let Ok(log_level) = env::var("RUST_LOG") {
            builder = builder.set_override("logging.level", log_level)?;
        }

        builder.build()?.try_deserialize()
    }
}

impl RetrievalConfig {
    /// `top_k_over_fetch` is kept at or above `max_tables` so downstream
    /// filtering cannot starve the selection.
    pub fn effective_top_k(&self) -> usize {
        self.top_k_over_fetch.max(self.max_tables)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_tables: 5,
            min_fallback_tables: 1,
            core_tables: Vec::new(),
            top_k_over_fetch: 8,
        }
    }
}
