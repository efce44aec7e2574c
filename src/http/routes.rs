// src/http/routes.rs

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::state::AppState;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/pdf", post(handlers::create_pdf))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
