//! modelstudio HTTP surface.
//!
//! One resource path for the history CRUD plus thin proxy routes for
//! the external generation API. Handlers are stateless per request:
//! all history state rides in the request/response cookie.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::generation_client::GenerationClient;

/// Shared per-process state. History state itself is per-request (the
/// cookie); this only carries configuration and the upstream client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generation: GenerationClient,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let generation = GenerationClient::new(
            &config.generation_api_url,
            config.generation_api_key.clone(),
        );
        Self { config, generation }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/history",
            get(handlers::list_history)
                .post(handlers::create_history)
                .put(handlers::update_history)
                .delete(handlers::delete_history),
        )
        .route("/api/generate", post(handlers::submit_generation))
        .route("/api/status", post(handlers::check_status))
        .route("/api/download", post(handlers::resolve_download))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
