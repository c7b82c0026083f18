use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CatalogQuery, Product};

/// Data access interface for the product catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products matching the query, in the query's sort order
    async fn find_page(&self, query: &CatalogQuery) -> ProductResult<Vec<Product>>;

    /// Count all products matching the query's filters, ignoring pagination
    async fn count(&self, query: &CatalogQuery) -> ProductResult<u64>;

    /// Insert products as a single batch, returning how many were stored
    async fn insert_many(&self, products: Vec<Product>) -> ProductResult<u64>;
}
