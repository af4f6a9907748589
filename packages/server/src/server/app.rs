//! Application setup and server configuration.

use std::sync::Arc;

use axum::{extract::Extension, http::Method, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::relations::{BatchReadExecutor, IdentityMapper, RelationsResolver};
use crate::kernel::BaseGraphStore;
use crate::server::routes::{
    api_yml_handler, build_info_handler, collection_relations_handler,
    content_relations_handler, gtg_handler, health_handler, ping_handler,
};

pub const SERVICE_NAME: &str = "relations-api";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RelationsResolver>,
    pub store: Arc<dyn BaseGraphStore>,
    /// `Cache-Control` value sent with every found relations response.
    pub cache_control: String,
    /// OpenAPI document served at `/__api`, when one was loaded.
    pub api_yml: Option<Arc<String>>,
}

impl AppState {
    pub fn new(store: Arc<dyn BaseGraphStore>, resolver: RelationsResolver, cache_control: &str) -> Self {
        Self {
            resolver: Arc::new(resolver),
            store,
            cache_control: cache_control.to_string(),
            api_yml: None,
        }
    }

    /// Wire the resolver, identity mapping and timeouts from configuration.
    pub fn from_config(store: Arc<dyn BaseGraphStore>, config: &Config) -> Self {
        let executor = BatchReadExecutor::new(store.clone()).with_timeout(config.query_timeout);
        let mapper = IdentityMapper::new(&config.api_url)
            .with_thing_base_url(&config.thing_url)
            .with_paths(&config.content_path, &config.thing_path);

        Self::new(
            store,
            RelationsResolver::new(executor, mapper),
            &config.cache_control_header(),
        )
    }

    pub fn with_api_yml(mut self, api_yml: String) -> Self {
        self.api_yml = Some(Arc::new(api_yml));
        self
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // Read-only API: any origin, GET only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let mut router = Router::new()
        .route("/content/:uuid/relations", get(content_relations_handler))
        .route(
            "/contentcollection/:uuid/relations",
            get(collection_relations_handler),
        )
        .route("/__health", get(health_handler))
        .route("/__gtg", get(gtg_handler))
        .route("/__ping", get(ping_handler))
        .route("/ping", get(ping_handler))
        .route("/__build-info", get(build_info_handler))
        .route("/build-info", get(build_info_handler));

    if state.api_yml.is_some() {
        router = router.route("/__api", get(api_yml_handler));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(Extension(state)),
    )
}
