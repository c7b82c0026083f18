//! Product Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CatalogQuery, ProductPage};
use crate::repository::ProductRepository;
use crate::seed::{SEED_BATCH_SIZE, dummy_products};

/// Catalog operations on top of a [`ProductRepository`]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Fetch one page of the filtered catalog together with its totals.
    ///
    /// The count and the page query run concurrently and are not isolated from
    /// each other, so concurrent writes may make them disagree slightly.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: CatalogQuery) -> ProductResult<ProductPage> {
        let (total, products) = tokio::try_join!(
            self.repository.count(&query),
            self.repository.find_page(&query)
        )?;

        tracing::debug!(total, returned = products.len(), "Listed products");
        Ok(ProductPage::new(products, total, &query))
    }

    /// Insert a fresh batch of synthetic products. Repeated calls add duplicates.
    #[instrument(skip(self))]
    pub async fn seed_dummy_products(&self) -> ProductResult<u64> {
        let products = dummy_products(SEED_BATCH_SIZE, Utc::now(), &mut rand::thread_rng());
        let inserted = self.repository.insert_many(products).await?;

        tracing::info!(inserted, "Seeded dummy products");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::models::Product;
    use crate::repository::MockProductRepository;

    fn product(name: &str) -> Product {
        Product {
            id: Some("65a1f0c2e4b0a1b2c3d4e5f6".to_string()),
            name: name.to_string(),
            image: String::new(),
            description: String::new(),
            price: 10.0,
            category: "Category1".to_string(),
            brand: "Brand1".to_string(),
            ratings: 4.0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_products_combines_count_and_page() {
        let mut mock_repo = MockProductRepository::new();
        let query = CatalogQuery {
            page: 2,
            limit: 10,
            ..CatalogQuery::default()
        };

        mock_repo
            .expect_count()
            .with(mockall::predicate::eq(query.clone()))
            .times(1)
            .returning(|_| Ok(25));
        mock_repo
            .expect_find_page()
            .with(mockall::predicate::eq(query.clone()))
            .times(1)
            .returning(|_| Ok(vec![product("Product 11"), product("Product 12")]));

        let service = ProductService::new(mock_repo);
        let page = service.list_products(query).await.unwrap();

        assert_eq!(page.total_products, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.products.len(), 2);
    }

    #[tokio::test]
    async fn test_list_products_past_last_page_is_empty_not_error() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_count().returning(|_| Ok(5));
        mock_repo.expect_find_page().returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let query = CatalogQuery {
            page: 9,
            ..CatalogQuery::default()
        };
        let page = service.list_products(query).await.unwrap();

        assert!(page.products.is_empty());
        assert_eq!(page.total_products, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 9);
    }

    #[tokio::test]
    async fn test_list_products_propagates_count_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_count()
            .returning(|_| Err(ProductError::Database("count failed".into())));
        mock_repo.expect_find_page().returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let err = service
            .list_products(CatalogQuery::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "count failed");
    }

    #[tokio::test]
    async fn test_seed_inserts_one_batch_of_forty() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert_many()
            .withf(|products| {
                products.len() == SEED_BATCH_SIZE
                    && products[0].name == "Product 1"
                    && products.iter().all(|p| p.id.is_none())
            })
            .times(1)
            .returning(|products| Ok(products.len() as u64));

        let service = ProductService::new(mock_repo);
        let inserted = service.seed_dummy_products().await.unwrap();

        assert_eq!(inserted, 40);
    }

    #[tokio::test]
    async fn test_seed_propagates_insert_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert_many()
            .returning(|_| Err(ProductError::Database("write failed".into())));

        let service = ProductService::new(mock_repo);
        assert!(service.seed_dummy_products().await.is_err());
    }
}
