//! Shared application state.

use database::mongodb::LazyClient;

/// Cloned into handlers that need direct access to the store (readiness).
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Built on first use; clones share the driver's connection pool
    pub mongo: LazyClient,
}
