//! MongoDB connector and utilities
//!
//! Provides client construction, a lazily built shared client, connectivity checks
//! and health checks.

mod config;
mod connector;
mod health;
mod lazy;

pub use config::{DEFAULT_APP_NAME, DEFAULT_CLUSTER_HOST, DEFAULT_DATABASE, MongoConfig};
pub use connector::{MongoError, build_client, verify_connection, verify_with_retry};
pub use health::{HealthStatus, check_health_detailed};
pub use lazy::LazyClient;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
