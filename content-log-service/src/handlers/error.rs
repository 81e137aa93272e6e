use crate::models::InvalidReason;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Endpoint-level failures, rendered as `{message, ...}` bodies.
#[derive(Debug)]
pub enum ApiError {
    InvalidIdentifier(InvalidReason),
    NotFound,
    /// `error` has already been masked (or replaced) by the caller.
    Internal { message: &'static str, error: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidIdentifier(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid id", "reason": reason })),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Content not found" })),
            )
                .into_response(),
            ApiError::Internal { message, error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message, "error": error })),
            )
                .into_response(),
        }
    }
}
