pub mod connection;
pub mod database;
pub mod diagnostics;
pub mod lookup;
pub mod metrics;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use connection::{ConnectionManager, PendingConnection, SlotRegistry, PROCESS_SLOT};
pub use database::{MongoConnector, MongoDb};
pub use diagnostics::{list_collections, status_report, StatusReport};
pub use lookup::LookupService;
pub use metrics::{get_metrics, init_metrics};
pub use store::{ConnectionError, ConnectionHandle, Connector, ContentStore, QueryError, StoreError};
