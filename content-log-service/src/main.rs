use content_log_service::config::ContentConfig;
use content_log_service::services::init_metrics;
use content_log_service::startup::Application;
use service_core::observability::init_tracing;
use tokio::signal;

const SERVICE_NAME: &str = "content-log-service";

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // A missing MONGODB_URI stops the process here, before anything binds.
    let config = match ContentConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(SERVICE_NAME, "info", None);
            tracing::error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::other(format!("Configuration error: {}", e)));
        }
    };

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    );

    init_metrics().map_err(|e| {
        tracing::error!("Failed to initialize metrics: {}", e);
        std::io::Error::other(format!("Metrics error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until(shutdown_signal()).await
}
