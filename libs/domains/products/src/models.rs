use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Page number used when `page` is missing or not a positive integer.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when `limit` is missing or not a positive integer.
pub const DEFAULT_LIMIT: u64 = 40;
/// Sort field used when `sort` is missing or blank.
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Product entity as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier (hex ObjectId); absent before insertion
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Image URL
    pub image: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub brand: String,
    /// Average rating in [0, 5]
    pub ratings: f64,
    pub created_at: DateTime<Utc>,
}

/// Raw query string of the listing endpoint.
///
/// Every field is kept as text so that a malformed value never rejects the request;
/// [`CatalogQuery`] does the coercion.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 40)
    pub limit: Option<String>,
    /// Case-insensitive substring of the product name
    pub search: Option<String>,
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    /// Case-insensitive substring of the brand
    pub brand: Option<String>,
    /// Inclusive lower price bound (default 0)
    pub min_price: Option<String>,
    /// Inclusive upper price bound (default unbounded)
    pub max_price: Option<String>,
    /// Minimum rating (default 0)
    pub min_rating: Option<String>,
    /// Field to sort by (default `createdAt`)
    pub sort: Option<String>,
    /// `asc` for ascending; anything else sorts descending
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Only the exact string `asc` selects ascending order.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    /// Direction as a MongoDB sort specifier
    pub fn as_order(self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Not validated against the schema; unknown fields sort as a no-op
    pub field: String,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

/// Typed listing request derived from [`ListProductsParams`].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    /// 1-based, always >= 1
    pub page: u64,
    /// Always >= 1
    pub limit: u64,
    pub search: String,
    pub category: String,
    pub brand: String,
    pub min_price: f64,
    /// `None` means no upper bound
    pub max_price: Option<f64>,
    pub min_rating: f64,
    pub sort: SortSpec,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            category: String::new(),
            brand: String::new(),
            min_price: 0.0,
            max_price: None,
            min_rating: 0.0,
            sort: SortSpec::default(),
        }
    }
}

impl CatalogQuery {
    /// Number of matching documents to skip for the requested page.
    ///
    /// Capped at `i64::MAX`, the largest skip the server accepts.
    pub fn skip(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }

    /// Page size as the driver's signed limit
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl From<ListProductsParams> for CatalogQuery {
    fn from(params: ListProductsParams) -> Self {
        let defaults = CatalogQuery::default();

        let sort_field = params
            .sort
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.sort.field);

        Self {
            page: parse_positive(params.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(params.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
            search: params.search.unwrap_or_default(),
            category: params.category.unwrap_or_default(),
            brand: params.brand.unwrap_or_default(),
            min_price: parse_number(params.min_price.as_deref()).unwrap_or(defaults.min_price),
            max_price: parse_number(params.max_price.as_deref()),
            min_rating: parse_number(params.min_rating.as_deref()).unwrap_or(defaults.min_rating),
            sort: SortSpec {
                field: sort_field,
                direction: SortDirection::from_param(params.order.as_deref()),
            },
        }
    }
}

/// Positive integer, or `None` for anything else (missing, zero, negative, garbage).
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|n| *n >= 1)
}

/// Finite number, or `None` for anything else. `NaN` and infinities count as garbage.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// One page of listing results plus totals for the whole filtered set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Documents matching the filter, ignoring pagination
    pub total_products: u64,
    /// `ceil(totalProducts / limit)`
    pub total_pages: u64,
    pub current_page: u64,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, total_products: u64, query: &CatalogQuery) -> Self {
        Self {
            products,
            total_products,
            total_pages: total_products.div_ceil(query.limit),
            current_page: query.page,
        }
    }
}
