//! Product catalog routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::lazy(state.mongo.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}
