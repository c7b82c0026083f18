//! Database connectors and utilities for the catalog services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, lazy shared client, connectivity checks and health
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{LazyClient, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
//! let mongo = LazyClient::new(config);
//! let db = mongo.get().await?.database(mongo.config().database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry_with_backoff};
