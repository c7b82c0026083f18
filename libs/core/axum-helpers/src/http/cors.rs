use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Debug, thiserror::Error)]
pub enum CorsError {
    #[error("Invalid CORS origin '{origin}': {details}")]
    InvalidOrigin { origin: String, details: String },

    #[error("At least one CORS origin is required")]
    NoOrigins,
}

/// Creates the CORS layer for browser clients.
///
/// The layer allows:
/// - exactly the configured origins
/// - methods GET, POST, PUT, PATCH, DELETE
/// - Content-Type, Authorization and Accept request headers
/// - credentials
/// - a 1 hour preflight cache
pub fn create_cors_layer(config: &CorsConfig) -> Result<CorsLayer, CorsError> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| CorsError::InvalidOrigin {
                    origin: origin.clone(),
                    details: e.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(CorsError::NoOrigins);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}
