use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::utils::CredentialMask;
use std::env;

pub const DEFAULT_DATABASE: &str = "defaultDatabaseName";
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub connection_reuse: ConnectionReuse,
    pub error_detail: ErrorDetail,
    /// Free-form deployment label reported by diagnostics.
    pub environment: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
    pub collection: String,
}

impl MongoConfig {
    pub fn credential_mask(&self) -> CredentialMask {
        CredentialMask::from_uri(self.uri.expose_secret())
    }
}

/// How the connection handle is shared between application instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionReuse {
    /// The pending connection lives in a process-wide named slot and is
    /// picked up again by every application built later in the process.
    Persistent,
    /// Each application owns its connection and drops it with itself.
    Fresh,
}

/// Whether 500 responses carry the (masked) fault detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetail {
    Verbose,
    Generic,
}

impl ErrorDetail {
    pub fn is_verbose(self) -> bool {
        self == ErrorDetail::Verbose
    }
}

impl std::str::FromStr for ConnectionReuse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "persistent" => Ok(ConnectionReuse::Persistent),
            "fresh" => Ok(ConnectionReuse::Fresh),
            _ => Err(format!("Invalid CONNECTION_REUSE: {}", s)),
        }
    }
}

impl std::str::FromStr for ErrorDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(ErrorDetail::Verbose),
            "generic" => Ok(ErrorDetail::Generic),
            _ => Err(format!("Invalid ERROR_DETAIL: {}", s)),
        }
    }
}

impl ContentConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        Self::from_source(common_config, |key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_source<F>(common: core_config::Config, source: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = get_var(&source, "MONGODB_URI", None)?;
        if uri.trim().is_empty() {
            return Err(AppError::config("MONGODB_URI is set but empty"));
        }

        Ok(ContentConfig {
            common,
            mongodb: MongoConfig {
                uri: Secret::new(uri),
                database: get_var(&source, "MONGODB_DB", Some(DEFAULT_DATABASE))?,
                collection: get_var(&source, "MONGODB_COLLECTION", None)?,
            },
            connection_reuse: get_var(&source, "CONNECTION_REUSE", Some("persistent"))?
                .parse()
                .map_err(AppError::config)?,
            error_detail: get_var(&source, "ERROR_DETAIL", Some("generic"))?
                .parse()
                .map_err(AppError::config)?,
            environment: get_var(&source, "ENVIRONMENT", Some(DEFAULT_ENVIRONMENT))?,
            otlp_endpoint: source("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}

fn get_var<F>(source: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match (source(key), default) {
        (Some(val), _) => Ok(val),
        (None, Some(def)) => Ok(def.to_string()),
        (None, None) => Err(AppError::config(format!("{} is required but not set", key))),
    }
}
