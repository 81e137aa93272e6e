use super::error::ApiError;
use crate::services;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `GET /collections`
pub async fn list_collections(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    services::list_collections(&state.connections)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(error = %state.mask.apply(&e.to_string()), "Error fetching collections");
            ApiError::Internal {
                message: "Failed to fetch collections",
                error: state.fault_detail(&e),
            }
        })
}
