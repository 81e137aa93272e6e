//! Seams between the services and the database driver.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use std::sync::Arc;
use thiserror::Error;

/// Shared, read-only session handle. Cloning is cheap and every clone talks
/// to the same underlying client pool.
pub type ConnectionHandle = Arc<dyn ContentStore>;

/// Read-only queries the service issues against an established session.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn ping(&self) -> Result<(), QueryError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, QueryError>;

    /// Single-document lookup on `_id`.
    async fn find_by_id(&self, collection: &str, id: ObjectId)
        -> Result<Option<Document>, QueryError>;
}

/// Opens a session. A connection manager calls this at most once per slot.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<ConnectionHandle, ConnectionError>;
}

/// Initial connect failure. Messages are masked when the error is built.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid connection string {target}: {message}")]
    InvalidUri { target: String, message: String },

    #[error("failed to connect to {target}: {message}")]
    ConnectFailed { target: String, message: String },
}

/// Transport or server fault while running a query.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct QueryError {
    message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<mongodb::error::Error> for QueryError {
    fn from(err: mongodb::error::Error) -> Self {
        QueryError::new(err.to_string())
    }
}

/// Anything that kept a request from reaching a verdict.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection unavailable: {0}")]
    Connection(Arc<ConnectionError>),

    #[error("lookup failed: {0}")]
    Query(#[from] QueryError),
}

impl From<Arc<ConnectionError>> for StoreError {
    fn from(err: Arc<ConnectionError>) -> Self {
        StoreError::Connection(err)
    }
}
