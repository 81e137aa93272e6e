//! Collection listing and the connectivity report behind `/status`.

use super::connection::ConnectionManager;
use super::store::StoreError;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    pub status: &'static str,
    pub environment: String,
    pub collections: Vec<String>,
}

pub async fn list_collections(connections: &ConnectionManager) -> Result<Vec<String>, StoreError> {
    let handle = connections.get_connection().await?;
    Ok(handle.list_collection_names().await?)
}

/// Pings the deployment explicitly, then lists its collections.
pub async fn status_report(
    connections: &ConnectionManager,
    environment: &str,
) -> Result<StatusReport, StoreError> {
    let handle = connections.get_connection().await?;
    handle.ping().await?;
    let collections = handle.list_collection_names().await?;

    Ok(StatusReport {
        status: "success",
        environment: environment.to_string(),
        collections,
    })
}
