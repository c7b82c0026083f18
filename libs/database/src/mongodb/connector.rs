use mongodb::{
    Client,
    bson::doc,
    error::ErrorKind,
    options::ClientOptions,
};
use std::time::Duration;

use super::MongoConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

impl MongoError {
    /// The connection string itself is unusable; retrying cannot help.
    ///
    /// DNS and I/O failures during SRV resolution are not included.
    pub fn is_malformed_uri(&self) -> bool {
        match self {
            MongoError::Mongo(e) => matches!(*e.kind, ErrorKind::InvalidArgument { .. }),
            MongoError::ConnectionFailed(_) => false,
        }
    }
}

/// Parse options from config and construct a client.
///
/// For `mongodb+srv` URLs parsing resolves the SRV and TXT records, so this fails
/// when DNS does. Otherwise the driver connects lazily and the client is returned
/// even while the cluster is unreachable.
pub async fn build_client(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(config.url()).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

/// Round-trip a `ping` to the cluster.
pub async fn verify_connection(client: &Client) -> Result<(), MongoError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;
    Ok(())
}

/// Verify connectivity, retrying `config.connect_retries` extra times with backoff.
///
/// # Example
/// ```ignore
/// let client = database::mongodb::build_client(&config).await?;
/// if let Err(e) = database::mongodb::verify_with_retry(&client, &config).await {
///     tracing::error!("MongoDB unreachable: {}", e);
/// }
/// ```
pub async fn verify_with_retry(client: &Client, config: &MongoConfig) -> Result<(), MongoError> {
    let retry = RetryConfig::new().with_max_retries(config.connect_retries);
    retry_with_backoff(|| verify_connection(client), retry).await
}
