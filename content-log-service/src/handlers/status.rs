use crate::services::status_report;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// `GET /status` (also served as `/example`).
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let environment = &state.config.environment;

    match status_report(&state.connections, environment).await {
        Ok(report) => (StatusCode::OK, Json(json!(report))),
        Err(e) => {
            tracing::error!(error = %state.mask.apply(&e.to_string()), "MongoDB connection error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch data",
                    "details": state.fault_detail(&e),
                    "environment": environment,
                })),
            )
        }
    }
}
