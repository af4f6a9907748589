use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::server::app::{AppState, SERVICE_NAME};

const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    name: String,
    description: String,
    ok: bool,
    checks: Vec<CheckResult>,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    name: String,
    ok: bool,
    severity: u8,
    #[serde(rename = "businessImpact")]
    business_impact: String,
    #[serde(rename = "checkOutput")]
    check_output: String,
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

/// Run the graph connectivity check. `Err` carries a printable reason.
async fn check_graph(state: &AppState) -> Result<(), String> {
    match tokio::time::timeout(CHECK_TIMEOUT, state.store.verify_connectivity()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("Could not connect to the graph: {}", e)),
        Err(_) => Err(format!(
            "Graph connectivity check timed out (>{}s)",
            CHECK_TIMEOUT.as_secs()
        )),
    }
}

/// Health check endpoint
///
/// Returns 200 OK when the graph is reachable, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let outcome = check_graph(&state).await;
    if let Err(reason) = &outcome {
        tracing::warn!(error = %reason, "Health check failed");
    }

    let ok = outcome.is_ok();
    let check = CheckResult {
        name: "Check connectivity to Neo4j".to_string(),
        ok,
        severity: 1,
        business_impact: "Unable to respond to relations API requests".to_string(),
        check_output: outcome.err().unwrap_or_else(|| "Connectivity to Neo4j is ok".to_string()),
    };

    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            name: SERVICE_NAME.to_string(),
            description: "Read-only API for content relations held in Neo4j".to_string(),
            ok,
            checks: vec![check],
        }),
    )
}

/// Good-to-go: plain-text variant of the health check for load balancers.
pub async fn gtg_handler(Extension(state): Extension<AppState>) -> (StatusCode, String) {
    match check_graph(&state).await {
        Ok(()) => (StatusCode::OK, "OK".to_string()),
        Err(reason) => (StatusCode::SERVICE_UNAVAILABLE, reason),
    }
}

pub async fn ping_handler() -> &'static str {
    "pong"
}

pub async fn build_info_handler() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Serve the OpenAPI document loaded at startup.
pub async fn api_yml_handler(Extension(state): Extension<AppState>) -> Response {
    match state.api_yml {
        Some(yml) => ([(CONTENT_TYPE, "text/vnd.yaml")], yml.as_str().to_owned()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
