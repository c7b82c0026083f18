use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Storage failure; the message is the driver's own text
    #[error("{0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Catalog failures are reported as a plain-text 500 carrying the error message.
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!(error = %message, "Product request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<database::mongodb::MongoError> for ProductError {
    fn from(err: database::mongodb::MongoError) -> Self {
        ProductError::Database(err.to_string())
    }
}
