use std::future::Future;

use axum::{
    extract::{Extension, Path},
    http::{header::CACHE_CONTROL, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::domains::relations::{RelationsError, Resolved};
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Failure responses for the relations endpoints.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Relations(RelationsError),
    /// The resolution task panicked or was aborted.
    Internal(String),
}

impl From<RelationsError> for ApiError {
    fn from(err: RelationsError) -> Self {
        ApiError::Relations(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Relations(err @ RelationsError::Query { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error retrieving relations for uuid {}", err.uuid()),
            ),
            ApiError::Relations(err @ RelationsError::TimedOut { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Relations(err @ RelationsError::Cancelled { .. }) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// GET /content/:uuid/relations
pub async fn content_relations_handler(
    Extension(state): Extension<AppState>,
    Path(uuid): Path<String>,
) -> Result<Response, ApiError> {
    let resolver = state.resolver.clone();
    let id = uuid.clone();
    let resolved = resolve_detached(&uuid, move |cancel| async move {
        resolver.content_relations(&id, &cancel).await
    })
    .await?;
    found_or_404(
        &state,
        resolved,
        format!("No relations found for content with uuid {}", uuid),
    )
}

/// GET /contentcollection/:uuid/relations
pub async fn collection_relations_handler(
    Extension(state): Extension<AppState>,
    Path(uuid): Path<String>,
) -> Result<Response, ApiError> {
    let resolver = state.resolver.clone();
    let id = uuid.clone();
    let resolved = resolve_detached(&uuid, move |cancel| async move {
        resolver.collection_relations(&id, &cancel).await
    })
    .await?;
    found_or_404(
        &state,
        resolved,
        format!("No relations found for content collection with uuid {}", uuid),
    )
}

/// Run a resolution on its own task.
///
/// The task outlives a dropped request future, so the token cancelled by the
/// guard still reaches a live executor, which then releases the graph read.
async fn resolve_detached<T, F, Fut>(uuid: &str, resolve: F) -> Result<T, ApiError>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = Result<T, RelationsError>> + Send + 'static,
    T: Send + 'static,
{
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match tokio::spawn(resolve(cancel)).await {
        Ok(result) => Ok(result?),
        Err(e) => {
            error!(uuid = %uuid, error = %e, "Relations task failed");
            Err(ApiError::Internal(format!(
                "Error retrieving relations for uuid {}",
                uuid
            )))
        }
    }
}

fn found_or_404<T: Serialize>(
    state: &AppState,
    resolved: Resolved<T>,
    not_found: String,
) -> Result<Response, ApiError> {
    let relations = resolved.into_found().ok_or(ApiError::NotFound(not_found))?;
    Ok((
        [(CACHE_CONTROL, state.cache_control.clone())],
        Json(relations),
    )
        .into_response())
}
