//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{DateTime as BsonDateTime, Document, doc, oid::ObjectId},
    options::FindOptions,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use database::mongodb::LazyClient;

use crate::error::ProductResult;
use crate::models::{CatalogQuery, Product};
use crate::repository::ProductRepository;

/// Collection holding the catalog
pub const COLLECTION_NAME: &str = "productAll";

/// Stored shape of a product.
///
/// Documents may come from other writers, so numbers stored as text are accepted
/// and a missing `createdAt` falls back to the ObjectId timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ratings: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<BsonDateTime>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        let created_millis = doc
            .created_at
            .or_else(|| doc.id.map(|id| id.timestamp()))
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_default();

        Product {
            id: doc.id.map(|id| id.to_hex()),
            name: doc.name,
            image: doc.image,
            description: doc.description,
            price: doc.price,
            category: doc.category,
            brand: doc.brand,
            ratings: doc.ratings,
            created_at: DateTime::<Utc>::from_timestamp_millis(created_millis).unwrap_or_default(),
        }
    }
}

impl From<Product> for ProductDocument {
    fn from(product: Product) -> Self {
        ProductDocument {
            id: product
                .id
                .as_deref()
                .and_then(|hex| ObjectId::parse_str(hex).ok()),
            name: product.name,
            image: product.image,
            description: product.description,
            price: product.price,
            category: product.category,
            brand: product.brand,
            ratings: product.ratings,
            created_at: Some(BsonDateTime::from_millis(
                product.created_at.timestamp_millis(),
            )),
        }
    }
}

enum Source {
    Collection(Collection<ProductDocument>),
    /// Client built on demand; the catalog database comes from its config
    Lazy(LazyClient),
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    source: Source,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            source: Source::Collection(db.collection::<ProductDocument>(COLLECTION_NAME)),
        }
    }

    /// Repository that builds its client on first use.
    ///
    /// While the client cannot be built (e.g. the cluster's DNS does not resolve) every
    /// operation fails with the build error, and the next operation tries again.
    pub fn lazy(client: LazyClient) -> Self {
        Self {
            source: Source::Lazy(client),
        }
    }

    async fn collection(&self) -> ProductResult<Collection<ProductDocument>> {
        match &self.source {
            Source::Collection(collection) => Ok(collection.clone()),
            Source::Lazy(lazy) => Ok(lazy
                .get()
                .await?
                .database(lazy.config().database())
                .collection(COLLECTION_NAME)),
        }
    }

    /// Translate the query's filters into a MongoDB filter document
    fn build_filter(query: &CatalogQuery) -> Document {
        let mut filter = Document::new();

        for (field, needle) in [
            ("name", &query.search),
            ("category", &query.category),
            ("brand", &query.brand),
        ] {
            if !needle.is_empty() {
                filter.insert(
                    field,
                    doc! { "$regex": regex::escape(needle), "$options": "i" },
                );
            }
        }

        let mut bounds = vec![
            doc! { "$gte": [numeric("price"), query.min_price] },
            doc! { "$gte": [numeric("ratings"), query.min_rating] },
        ];
        if let Some(max) = query.max_price {
            bounds.push(doc! { "$lte": [numeric("price"), max] });
        }
        filter.insert("$expr", doc! { "$and": bounds });

        filter
    }

    fn build_sort(query: &CatalogQuery) -> Document {
        let mut sort = Document::new();
        sort.insert(query.sort.field.clone(), query.sort.direction.as_order());
        sort
    }
}

/// `$field` as a double. Numeric strings are parsed; anything else becomes null, which
/// sorts below every number and so fails the lower bounds.
fn numeric(field: &str) -> Document {
    doc! {
        "$convert": {
            "input": format!("${field}"),
            "to": "double",
            "onError": null,
            "onNull": null,
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_page(&self, query: &CatalogQuery) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .sort(Self::build_sort(query))
            .skip(query.skip())
            .limit(query.limit_i64())
            .build();

        let cursor = self
            .collection()
            .await?
            .find(Self::build_filter(query))
            .with_options(options)
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &CatalogQuery) -> ProductResult<u64> {
        let count = self
            .collection()
            .await?
            .count_documents(Self::build_filter(query))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, products), fields(batch = products.len()))]
    async fn insert_many(&self, products: Vec<Product>) -> ProductResult<u64> {
        let documents: Vec<ProductDocument> =
            products.into_iter().map(ProductDocument::from).collect();
        let result = self.collection().await?.insert_many(documents).await?;
        Ok(result.inserted_ids.len() as u64)
    }
}
