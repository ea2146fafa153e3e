//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error};

use super::{
    responses::{ApiResponse, HealthResponse, StatusResponse},
    ApiState,
};
use crate::state::KeyEvent;

/// Handle POST /press - Cycle-button press
pub async fn press_handler(
    State(api): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match api.app.press("http").await {
        Ok(snapshot) => Ok(Json(ApiResponse::from_snapshot(snapshot))),
        Err(e) => {
            error!("Failed to deliver press: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /key - Raw key event, forwarded only for the cycle key's press-down
pub async fn key_handler(
    State(api): State<Arc<ApiState>>,
    Json(event): Json<KeyEvent>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    if !event.is_cycle_press(api.cycle_key) {
        debug!("Ignoring key event {:?}", event);
        return Ok((
            StatusCode::ACCEPTED,
            Json(ApiResponse::ignored(
                format!("Key {} {:?} ignored", event.key_code, event.action),
                api.app.get_timer_snapshot(),
            )),
        ));
    }

    match api.app.press("key").await {
        Ok(snapshot) => Ok((StatusCode::OK, Json(ApiResponse::from_snapshot(snapshot)))),
        Err(e) => {
            error!("Failed to deliver key press: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /wake - Display turned on
pub async fn wake_handler(
    State(api): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match api.app.wake("http").await {
        Ok(snapshot) => Ok(Json(ApiResponse::new(
            "restored",
            "Normal screen timeout restored".to_string(),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to deliver wake: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(api): State<Arc<ApiState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = api.app.get_last_action();

    Json(StatusResponse {
        timer: api.app.get_timer_snapshot(),
        uptime: api.app.get_uptime(),
        port: api.app.port,
        host: api.app.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
