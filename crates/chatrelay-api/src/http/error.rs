//! Application error type mapping to HTTP status codes.
//!
//! Every failure is rendered as `{"detail": "..."}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_core::chat::service::ChatError;
use chatrelay_types::error::RepositoryError;

/// Prefix of every internal error detail.
pub const DETAIL_PREFIX: &str = "Bir hata oluştu";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A chat turn failed in the store or upstream.
    Chat(ChatError),
    /// A store read failed.
    Repository(RepositoryError),
    /// The request body was not a valid payload.
    Rejected(JsonRejection),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Rejected(e)
    }
}

impl AppError {
    fn internal_detail(message: &dyn std::fmt::Display) -> String {
        format!("{DETAIL_PREFIX}: {message}")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Chat(e) => {
                tracing::error!(error = %e, "Chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::internal_detail(e),
                )
            }
            AppError::Repository(e) => {
                tracing::error!(error = %e, "History request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::internal_detail(e),
                )
            }
            AppError::Rejected(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                (rejection.status(), rejection.body_text())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::llm::LlmError;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_upstream_error_is_500_with_detail() {
        let err = AppError::from(ChatError::from(LlmError::Timeout(60)));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Bir hata oluştu: request timed out after 60s"
        );
    }

    #[tokio::test]
    async fn test_repository_error_is_500_with_detail() {
        let err = AppError::from(RepositoryError::Connection("database is locked".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Bir hata oluştu: database connection error: database is locked"
        );
    }
}
