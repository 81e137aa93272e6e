pub mod collections;
pub mod content_log;
pub mod error;
pub mod health;
pub mod status;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
};

pub use collections::list_collections;
pub use content_log::{get_content_log, get_content_log_by_query};
pub use error::ApiError;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use status::status;

/// Fallback for every read-only route.
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET")],
        format!("Method {} Not Allowed", method),
    )
}
