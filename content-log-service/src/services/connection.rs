//! Connection lifecycle.
//!
//! A connection attempt is represented by a [`PendingConnection`]: a shared
//! future that every caller awaits. The attempt is stored *before* anyone
//! polls it, so a burst of first callers all land on the same attempt and only
//! one physical connect happens.
//!
//! Where the attempt is stored depends on [`ConnectionReuse`]:
//!
//! - `Persistent`: a named slot in a process-wide [`SlotRegistry`]. An
//!   application rebuilt later in the same process (a reload) finds the slot
//!   already filled and reuses it.
//! - `Fresh`: a cell owned by the manager itself, gone when the manager is.
//!
//! A slot is written once. A failed attempt stays in the slot and every later
//! caller gets the same error until the process restarts.

use super::store::{ConnectionError, ConnectionHandle, Connector};
use crate::config::ConnectionReuse;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use once_cell::sync::Lazy;
use std::sync::{Arc, OnceLock};

pub type ConnectResult = Result<ConnectionHandle, Arc<ConnectionError>>;

/// In-flight or settled connection attempt, shared by all awaiting callers.
pub type PendingConnection = Shared<BoxFuture<'static, ConnectResult>>;

/// Slot used by the service when running in persistent mode.
pub const PROCESS_SLOT: &str = "content-log.mongo-client";

static PROCESS_SLOTS: Lazy<Arc<SlotRegistry>> = Lazy::new(|| Arc::new(SlotRegistry::default()));

/// Named, write-once storage for pending connections.
#[derive(Default)]
pub struct SlotRegistry {
    slots: DashMap<String, PendingConnection>,
}

impl SlotRegistry {
    /// The registry that lives for the whole process.
    pub fn process() -> Arc<Self> {
        Arc::clone(&PROCESS_SLOTS)
    }

    /// Returns the attempt stored under `name`, registering the one built by
    /// `start` if the slot is empty.
    ///
    /// `start` runs while the slot is locked and must only build the future,
    /// never poll it.
    pub fn get_or_start<F>(&self, name: &str, start: F) -> PendingConnection
    where
        F: FnOnce() -> PendingConnection,
    {
        if let Some(existing) = self.slots.get(name) {
            tracing::debug!(slot = %name, "Reusing connection slot");
            return existing.value().clone();
        }

        self.slots
            .entry(name.to_string())
            .or_insert_with(start)
            .value()
            .clone()
    }

    pub fn is_occupied(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }
}

enum Slot {
    Shared {
        registry: Arc<SlotRegistry>,
        name: String,
    },
    Owned(OnceLock<PendingConnection>),
}

/// Hands out the single connection handle of this process (or instance).
pub struct ConnectionManager {
    connector: Arc<dyn Connector>,
    slot: Slot,
}

impl ConnectionManager {
    pub fn new(connector: Arc<dyn Connector>, reuse: ConnectionReuse) -> Self {
        match reuse {
            ConnectionReuse::Persistent => {
                Self::persistent(connector, SlotRegistry::process(), PROCESS_SLOT)
            }
            ConnectionReuse::Fresh => Self::fresh(connector),
        }
    }

    pub fn persistent(
        connector: Arc<dyn Connector>,
        registry: Arc<SlotRegistry>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            connector,
            slot: Slot::Shared {
                registry,
                name: name.into(),
            },
        }
    }

    pub fn fresh(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            slot: Slot::Owned(OnceLock::new()),
        }
    }

    /// Waits for the shared handle, starting the connect if nobody has yet.
    pub async fn get_connection(&self) -> ConnectResult {
        self.pending().await
    }

    /// Whether an attempt has been registered (it may still be in flight).
    pub fn is_started(&self) -> bool {
        match &self.slot {
            Slot::Shared { registry, name } => registry.is_occupied(name),
            Slot::Owned(cell) => cell.get().is_some(),
        }
    }

    fn pending(&self) -> PendingConnection {
        match &self.slot {
            Slot::Shared { registry, name } => registry.get_or_start(name, || self.start()),
            Slot::Owned(cell) => cell.get_or_init(|| self.start()).clone(),
        }
    }

    fn start(&self) -> PendingConnection {
        tracing::info!("Starting database connection attempt");
        let connector = Arc::clone(&self.connector);

        async move {
            connector.connect().await.map_err(|e| {
                tracing::error!(
                    error = %e,
                    "Database connection failed; slot is unusable until restart"
                );
                Arc::new(e)
            })
        }
        .boxed()
        .shared()
    }
}
