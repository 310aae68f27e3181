use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// External-call failures (LLM, taste graph) log the provider detail but
/// surface a generic message to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Taste graph error: {0}")]
    TasteGraph(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTERNAL_CALL_FAILED",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::TasteGraph(msg) => {
                tracing::error!("Taste graph error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTERNAL_CALL_FAILED",
                    "A taste lookup error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let response = AppError::Validation("music cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_external_failures_map_to_502() {
        let llm = AppError::Llm("timeout".to_string()).into_response();
        assert_eq!(llm.status(), StatusCode::BAD_GATEWAY);

        let taste = AppError::TasteGraph("status 500".to_string()).into_response();
        assert_eq!(taste.status(), StatusCode::BAD_GATEWAY);
    }
}
