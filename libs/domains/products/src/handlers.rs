//! HTTP handlers for the catalog API

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CatalogQuery, ListProductsParams, Product, ProductPage};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Listing endpoint
pub const LIST_PATH: &str = "/productAll";
/// Seeding endpoint. The mixed casing is part of the public contract.
pub const SEED_PATH: &str = "/productALl/dummy";

pub const SEED_CONFIRMATION: &str = "Dummy products added";

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, seed_dummy_products),
    components(schemas(Product, ProductPage)),
    tags(
        (name = "Products", description = "Product catalog browsing and seeding")
    )
)]
pub struct ApiDoc;

/// Create the catalog router. Paths are absolute; merge it at the root.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(LIST_PATH, get(list_products))
        .route(SEED_PATH, post(seed_dummy_products))
        .with_state(shared_service)
}

/// List one page of products with optional filters and sorting
///
/// Malformed numeric parameters fall back to their defaults instead of failing.
#[utoipa::path(
    get,
    path = "/productAll",
    tag = "Products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Page of matching products", body = ProductPage),
        (status = 500, description = "Catalog query failed", body = String, content_type = "text/plain")
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(params): Query<ListProductsParams>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(CatalogQuery::from(params)).await?;
    Ok(Json(page))
}

/// Insert a batch of 40 synthetic products
///
/// Any request body is ignored. Each call adds a new batch.
#[utoipa::path(
    post,
    path = "/productALl/dummy",
    tag = "Products",
    responses(
        (status = 201, description = "Products inserted", body = String, content_type = "text/plain"),
        (status = 500, description = "Insert failed", body = String, content_type = "text/plain")
    )
)]
async fn seed_dummy_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<impl IntoResponse> {
    service.seed_dummy_products().await?;
    Ok((StatusCode::CREATED, SEED_CONFIRMATION))
}
