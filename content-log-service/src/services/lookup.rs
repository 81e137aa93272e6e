use super::connection::ConnectionManager;
use super::store::StoreError;
use crate::models::{parse_identifier, LookupRequest, LookupResult};
use std::sync::Arc;

/// Fetches single documents by identifier from one configured collection.
#[derive(Clone)]
pub struct LookupService {
    connections: Arc<ConnectionManager>,
    collection: String,
}

impl LookupService {
    pub fn new(connections: Arc<ConnectionManager>, collection: impl Into<String>) -> Self {
        Self {
            connections,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Validates the identifier, then runs one `_id` query.
    ///
    /// Malformed input is answered without touching the connection. Faults
    /// are returned as they happen; nothing is retried.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, StoreError> {
        let id = match parse_identifier(&request.raw_identifier) {
            Ok(id) => id,
            Err(reason) => {
                tracing::debug!(reason = %reason, "Rejected identifier");
                return Ok(LookupResult::InvalidIdentifier(reason));
            }
        };

        let handle = self.connections.get_connection().await?;

        match handle.find_by_id(&self.collection, id).await? {
            Some(document) => Ok(LookupResult::Found(document)),
            None => {
                tracing::debug!(id = %id, collection = %self.collection, "Document not found");
                Ok(LookupResult::NotFound)
            }
        }
    }
}
