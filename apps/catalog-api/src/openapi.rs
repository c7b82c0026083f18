//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "0.1.0",
        description = "Paginated, filterable product catalog backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Products", description = "Product catalog browsing and seeding")
    )
)]
struct ApiInfo;

/// Combined OpenAPI documentation served by the docs UIs.
///
/// Catalog paths are absolute, so the domain document is merged rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ApiInfo::openapi();
        doc.merge(domain_products::ApiDoc::openapi());
        doc
    }
}
