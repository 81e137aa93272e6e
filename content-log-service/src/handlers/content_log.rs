use super::error::ApiError;
use crate::models::{document_to_json, InvalidReason, LookupRequest, LookupResult, RawIdentifier};
use crate::startup::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, RawQuery, State},
    Json,
};
use serde_json::Value;

/// `GET /content-log/:id`
///
/// A segment that does not decode to UTF-8 is a malformed id, not a routing
/// error.
pub async fn get_content_log(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    match path {
        Ok(Path(id)) => fetch(&state, LookupRequest::new(id)).await,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected content log path");
            Err(ApiError::InvalidIdentifier(InvalidReason::MalformedIdentifier))
        }
    }
}

/// `GET /content-log?id=...`; a repeated `id` resolves to its first value.
pub async fn get_content_log_by_query(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiError> {
    fetch(
        &state,
        LookupRequest::new(RawIdentifier::from_query(query.as_deref())),
    )
    .await
}

async fn fetch(state: &AppState, request: LookupRequest) -> Result<Json<Value>, ApiError> {
    match state.lookup.lookup(&request).await {
        Ok(LookupResult::Found(document)) => Ok(Json(document_to_json(document))),
        Ok(LookupResult::NotFound) => Err(ApiError::NotFound),
        Ok(LookupResult::InvalidIdentifier(reason)) => Err(ApiError::InvalidIdentifier(reason)),
        Err(e) => {
            tracing::error!(
                error = %state.mask.apply(&e.to_string()),
                collection = %state.lookup.collection(),
                "Error fetching content log"
            );
            Err(ApiError::Internal {
                message: "Internal Server Error",
                error: state.fault_detail(&e),
            })
        }
    }
}
