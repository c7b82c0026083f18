//! Readiness endpoint

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::AppError;
use database::mongodb::LazyClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub mongodb: String,
}

pub fn router(mongo: LazyClient) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(mongo)
}

/// Readiness check - builds the client if needed, then pings MongoDB
async fn readiness_check(State(mongo): State<LazyClient>) -> Result<Json<ReadyResponse>, AppError> {
    let client = mongo
        .get()
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("MongoDB is unreachable: {e}")))?;
    let status = database::mongodb::check_health_detailed(&client).await;

    if !status.healthy {
        let reason = status.message.unwrap_or_else(|| "ping failed".to_string());
        return Err(AppError::ServiceUnavailable(format!(
            "MongoDB is unreachable: {reason}"
        )));
    }

    tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping ok");
    Ok(Json(ReadyResponse {
        status: "ready".to_string(),
        mongodb: "connected".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use axum_helpers::ErrorResponse;
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn ready_response(mongo: LazyClient) -> ErrorResponse {
        let response = router(mongo)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ready_is_503_when_mongodb_unreachable() {
        // Nothing listens on port 1; server selection gives up quickly.
        let url = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200";
        let client = mongodb::Client::with_uri_str(url).await.unwrap();
        let mongo = LazyClient::from_client(MongoConfig::new(url), client);

        let body = ready_response(mongo).await;
        assert_eq!(body.error, "ServiceUnavailable");
        assert!(body.message.starts_with("MongoDB is unreachable"));
    }

    #[tokio::test]
    async fn test_ready_is_503_when_cluster_host_does_not_resolve() {
        let mongo = LazyClient::new(MongoConfig::from_credentials(
            "user",
            "pass",
            "cluster0.catalog-test.invalid",
        ));

        let body = ready_response(mongo.clone()).await;
        assert_eq!(body.error, "ServiceUnavailable");
        assert!(body.message.starts_with("MongoDB is unreachable"));
        assert!(mongo.built().is_none());
    }
}
