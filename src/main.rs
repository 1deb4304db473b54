use std::sync::Arc;
use tracing::{error, info};

mod config;
mod error;
mod models;
mod services;

use config::Config;
use models::SchemaCatalog;
use services::{HttpSearchClient, RetrievalOrchestrator, SchemaSummaryRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    // Load the catalog snapshot
    let catalog = SchemaCatalog::from_json_file(&config.catalog.path).map_err(|e| {
        error!("Failed to load catalog from {}: {}", config.catalog.path, e);
        anyhow::anyhow!(e)
    })?;
    info!(
        "Loaded catalog with {} tables from {}",
        catalog.len(),
        config.catalog.path
    );

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.is_empty() {
        anyhow::bail!("usage: schema-retrieval <question>");
    }

    let retriever = Arc::new(HttpSearchClient::new(
        config.search.base_url.clone(),
        config.search.api_key.clone(),
        config.search.timeout_ms,
    ));
    let orchestrator = RetrievalOrchestrator::new(retriever, config.retrieval.clone());

    let selection = orchestrator.get_relevant_tables(&question, &catalog).await?;
    info!("Selected tables: {:?}", selection.tables());

    let summary = SchemaSummaryRenderer::render(&selection, &catalog);
    println!("{}", summary);

    Ok(())
}
