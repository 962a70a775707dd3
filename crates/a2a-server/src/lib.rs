//! A2A gateway library logic.
//!
//! Exposes an Agent-to-Agent JSON-RPC interface and forwards each call to
//! the NPL policy engine, translating between the two wire formats.

pub mod api;
pub mod config;
pub mod engine;
pub mod middleware;

use a2a_types::AgentCard;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use engine::PolicyEngineClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Client for the policy engine.
    pub engine: PolicyEngineClient,
    /// Agent card served at `/a2a/agent-card`, fixed at startup.
    pub agent_card: Arc<AgentCard>,
}

impl AppState {
    /// Builds state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the engine HTTP client cannot be created.
    pub fn from_config(config: &config::Config) -> Result<Self, engine::EngineError> {
        Ok(Self {
            engine: PolicyEngineClient::new(&config.engine.url)?,
            agent_card: Arc::new(AgentCard::gateway(
                config.server.public_url.clone(),
                env!("CARGO_PKG_VERSION"),
            )),
        })
    }
}

/// Maximum request body size (2 MiB).
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/a2a/request", post(api::a2a_request_handler))
        .layer(axum::middleware::from_fn(middleware::auth_middleware));

    Router::new()
        .route("/health", get(api::health_handler))
        .route("/a2a/agent-card", get(api::agent_card_handler))
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
