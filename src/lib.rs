use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod upstream;
pub mod validate;

use state::AppState;

// Build the router. Exposed so integration tests can drive the full stack
// without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/chat", post(handlers::chat_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
