//! Neo4j test harness with testcontainers.
//!
//! A single Neo4j container is started on first use and shared by every test
//! in the binary. Tests isolate themselves by writing fresh UUIDs.

use anyhow::{Context, Result};
use neo4j_client::{Neo4jClient, Statement};
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tokio::sync::OnceCell;

const HTTP_PORT: u16 = 7474;

/// Shared test infrastructure that persists across all tests.
struct SharedNeo4j {
    url: String,
    // Keep the container alive for the entire test run
    _container: ContainerAsync<GenericImage>,
}

static SHARED_NEO4J: OnceCell<SharedNeo4j> = OnceCell::const_new();

impl SharedNeo4j {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --ignored --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let container = GenericImage::new("neo4j", "5")
            .with_exposed_port(HTTP_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Started."))
            .with_env_var("NEO4J_AUTH", "none")
            .start()
            .await
            .context("Failed to start Neo4j container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(HTTP_PORT.tcp()).await?;

        Ok(Self {
            url: format!("http://{}:{}", host, port),
            _container: container,
        })
    }
}

/// Client for the shared Neo4j container, starting it if needed.
pub async fn shared_neo4j_client() -> Result<Neo4jClient> {
    let shared = SHARED_NEO4J
        .get_or_try_init(SharedNeo4j::init)
        .await
        .context("Failed to initialize shared Neo4j")?;

    Ok(Neo4jClient::new(&shared.url, "neo4j"))
}

/// Write fixtures in one auto-committed request.
pub async fn write_graph(client: &Neo4jClient, cypher: &[&str]) -> Result<()> {
    let statements: Vec<Statement> = cypher.iter().map(|c| Statement::new(*c)).collect();
    client
        .execute(&statements)
        .await
        .context("Failed to write fixture graph")?;
    Ok(())
}
