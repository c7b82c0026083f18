use mongodb::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::{MongoConfig, MongoError, build_client};

/// Shared MongoDB client that is built on first successful use.
///
/// A failed build leaves the handle empty, so the next caller tries again. This lets
/// the service start while the cluster, or its DNS, is unavailable.
#[derive(Clone)]
pub struct LazyClient {
    config: Arc<MongoConfig>,
    cell: Arc<OnceCell<Client>>,
}

impl LazyClient {
    pub fn new(config: MongoConfig) -> Self {
        Self {
            config: Arc::new(config),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Handle around an already constructed client
    pub fn from_client(config: MongoConfig, client: Client) -> Self {
        Self {
            config: Arc::new(config),
            cell: Arc::new(OnceCell::new_with(Some(client))),
        }
    }

    /// The client, building it now if no earlier attempt succeeded
    pub async fn get(&self) -> Result<Client, MongoError> {
        self.cell
            .get_or_try_init(|| build_client(&self.config))
            .await
            .cloned()
    }

    /// The client if it has been built, without attempting to build it
    pub fn built(&self) -> Option<Client> {
        self.cell.get().cloned()
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }
}
