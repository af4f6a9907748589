// Main entry point for the relations API server

use std::sync::Arc;

use anyhow::{Context, Result};
use neo4j_client::Neo4jClient;
use relations_api::kernel::{BaseGraphStore, Neo4jGraphStore};
use relations_api::{server::build_app, server::AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relations_api=debug,neo4j_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Relations API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        neo_url = %config.neo_url,
        database = %config.neo_database,
        port = config.port,
        cache_control = %config.cache_control_header(),
        "Configuration loaded"
    );

    // Graph store
    let mut client = Neo4jClient::new(&config.neo_url, &config.neo_database)
        .with_timeout(config.query_timeout)
        .context("Failed to create Neo4j client")?;
    if let Some((user, password)) = &config.neo_credentials {
        client = client.with_basic_auth(user, password);
    }
    let store: Arc<dyn BaseGraphStore> = Arc::new(Neo4jGraphStore::new(client));

    if let Err(e) = store.verify_connectivity().await {
        // Not fatal: /__gtg reports it until Neo4j is reachable
        tracing::warn!(error = %e, "Neo4j is not reachable yet");
    }

    // Build application
    let mut state = AppState::from_config(store, &config);
    match tokio::fs::read_to_string(&config.api_yml).await {
        Ok(yml) => state = state.with_api_yml(yml),
        Err(e) => tracing::warn!(path = %config.api_yml, error = %e, "API document not loaded, /__api disabled"),
    }
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
