use super::store::{ConnectionError, ConnectionHandle, Connector, ContentStore, QueryError};
use crate::config::MongoConfig;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion, Tls, TlsOptions},
    Client as MongoClient, Database,
};
use secrecy::{ExposeSecret, Secret};
use service_core::utils::{mask_credentials, CredentialMask};
use std::sync::Arc;

const APP_NAME: &str = "content-log-service";

#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    pub fn new(client: &MongoClient, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }
}

#[async_trait]
impl ContentStore for MongoDb {
    async fn ping(&self) -> Result<(), QueryError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, QueryError> {
        Ok(self.db.list_collection_names(None).await?)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, QueryError> {
        Ok(self
            .db
            .collection::<Document>(collection)
            .find_one(doc! { "_id": id }, None)
            .await?)
    }
}

/// Builds the MongoDB client: Stable API v1, TLS always on.
pub struct MongoConnector {
    uri: Secret<String>,
    database: String,
    mask: CredentialMask,
}

impl MongoConnector {
    pub fn new(config: &MongoConfig) -> Self {
        Self {
            uri: config.uri.clone(),
            database: config.database.clone(),
            mask: config.credential_mask(),
        }
    }

    /// The connection string with its userinfo replaced.
    pub fn masked_uri(&self) -> String {
        mask_credentials(self.uri.expose_secret())
    }

    fn failure(&self, err: mongodb::error::Error) -> ConnectionError {
        ConnectionError::ConnectFailed {
            target: self.masked_uri(),
            message: self.mask.apply(&err.to_string()),
        }
    }
}

/// Applies the options no deployment may opt out of.
pub fn harden_options(options: &mut ClientOptions) {
    // A `tls=false` in the URI is overridden here.
    options.tls = Some(Tls::Enabled(TlsOptions::default()));
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    if options.app_name.is_none() {
        options.app_name = Some(APP_NAME.to_string());
    }
}

#[async_trait]
impl Connector for MongoConnector {
    async fn connect(&self) -> Result<ConnectionHandle, ConnectionError> {
        let target = self.masked_uri();
        tracing::info!(uri = %target, database = %self.database, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(self.uri.expose_secret())
            .await
            .map_err(|e| ConnectionError::InvalidUri {
                target: target.clone(),
                message: self.mask.apply(&e.to_string()),
            })?;
        harden_options(&mut options);

        let client = MongoClient::with_options(options).map_err(|e| self.failure(e))?;

        // The driver connects lazily; ping so the attempt only resolves once
        // the deployment has answered.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| self.failure(e))?;

        tracing::info!(database = %self.database, "Successfully connected to MongoDB database");
        Ok(Arc::new(MongoDb::new(&client, &self.database)))
    }
}
