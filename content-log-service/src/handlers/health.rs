use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "content-log-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once the shared connection has resolved and answers a ping.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let handle = match state.connections.get_connection().await {
        Ok(handle) => handle,
        Err(_) => return StatusCode::SERVICE_UNAVAILABLE,
    };

    match handle.ping().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %state.mask.apply(&e.to_string()), "Readiness ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
