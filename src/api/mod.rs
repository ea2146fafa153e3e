//! HTTP API module
//!
//! Input endpoints for button presses and wake-ups, plus status reporting.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// State shared by the HTTP handlers
#[derive(Debug)]
pub struct ApiState {
    pub app: Arc<AppState>,
    /// Key code treated as the cycle button by POST /key
    pub cycle_key: u32,
}

/// Create the HTTP router with all endpoints
pub fn create_router(app: Arc<AppState>, cycle_key: u32) -> Router {
    let state = Arc::new(ApiState { app, cycle_key });

    Router::new()
        .route("/press", post(press_handler))
        .route("/key", post(key_handler))
        .route("/wake", post(wake_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
