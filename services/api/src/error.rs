//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how it is
//! rendered as an HTTP response.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use studytrack_core::DomainError;
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the core use-cases.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The request itself is malformed (bad date, bad id, missing parameter).
    #[error("{0}")]
    BadRequest(String),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents an error while applying database migrations.
    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Validation(_)) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Domain(DomainError::Internal(_))
            | ApiError::Config(_)
            | ApiError::Database(_)
            | ApiError::Migration(_)
            | ApiError::Io(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Client errors carry their own message; server errors are only logged.
        let message = match &self {
            ApiError::Domain(e) if !status.is_server_error() => e.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
            _ => {
                error!("Request failed: {}", self);
                "internal server error".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::not_found("user"), StatusCode::NOT_FOUND),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("dup"), StatusCode::CONFLICT),
            (DomainError::internal("down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        use http_body_util::BodyExt;
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_details_are_not_exposed() {
        let (status, body) = body_of(ApiError::from(DomainError::internal("pool timed out"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let (status, body) = body_of(ApiError::from(DomainError::not_found("subject"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "subject not found");
    }
}
