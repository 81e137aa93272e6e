use crate::config::ContentConfig;
use crate::handlers;
use crate::services::{ConnectionManager, LookupService, MongoConnector};
use axum::{
    handler::Handler,
    middleware::from_fn,
    routing::{get, MethodRouter},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use service_core::utils::CredentialMask;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const GENERIC_FAULT: &str = "Internal Server Error";

#[derive(Clone)]
pub struct AppState {
    pub config: ContentConfig,
    pub connections: Arc<ConnectionManager>,
    pub lookup: LookupService,
    pub mask: CredentialMask,
}

impl AppState {
    pub fn new(config: ContentConfig, connections: ConnectionManager) -> Self {
        let connections = Arc::new(connections);
        let lookup = LookupService::new(connections.clone(), config.mongodb.collection.clone());
        let mask = config.mongodb.credential_mask();

        Self {
            config,
            connections,
            lookup,
            mask,
        }
    }

    /// What a 500 response may say about `err`.
    pub fn fault_detail(&self, err: &dyn std::fmt::Display) -> String {
        if self.config.error_detail.is_verbose() {
            self.mask.apply(&err.to_string())
        } else {
            GENERIC_FAULT.to_string()
        }
    }
}

/// GET only. HEAD is refused explicitly, since axum would otherwise answer
/// it with the GET handler.
fn read_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler)
        .head(handlers::method_not_allowed)
        .fallback(handlers::method_not_allowed)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/collections", read_only(handlers::list_collections))
        .route("/content-log", read_only(handlers::get_content_log_by_query))
        .route("/content-log/:id", read_only(handlers::get_content_log))
        .route("/status", read_only(handlers::status))
        .route("/example", read_only(handlers::status))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Binds the listener. The database is not contacted until the first
    /// request that needs it.
    pub async fn build(config: ContentConfig) -> Result<Self, AppError> {
        let connector = Arc::new(MongoConnector::new(&config.mongodb));
        tracing::info!(
            uri = %connector.masked_uri(),
            reuse = ?config.connection_reuse,
            "Configured MongoDB connector"
        );
        let connections = ConnectionManager::new(connector, config.connection_reuse);
        Self::build_with(config, connections).await
    }

    pub async fn build_with(
        config: ContentConfig,
        connections: ConnectionManager,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let router = router(AppState::new(config, connections));

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serves until `signal` completes, then drains in-flight requests.
    pub async fn run_until<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
