//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Plain-text body of `GET /`
pub const GREETING: &str = "Product catalog server is running";

/// Create all API routes, mounted at the root
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(products::router(state))
        .merge(health::router(state.mongo.clone()))
}

async fn root() -> &'static str {
    GREETING
}
