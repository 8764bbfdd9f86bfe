use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::github::GithubError;
use crate::llm_client::LlmError;

pub const EXTRACTION_ABSENT_MESSAGE: &str = "Failed to parse analysis result";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// A hosting-platform or inference call failed (transport, status, or response shape).
    #[error("{0}")]
    Upstream(String),

    /// The model reply held no `{...}` span. `partial` is a JSON object whose
    /// keys are merged into the error body so the caller keeps the fetched data.
    #[error("Failed to parse analysis result")]
    ExtractionAbsent { partial: Value },

    /// The model reply held a `{...}` span that is not valid JSON.
    #[error("Malformed analysis JSON: {0}")]
    ExtractionMalformed(String),

    #[error(transparent)]
    Aggregation(#[from] AggregateError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GithubError> for AppError {
    fn from(e: GithubError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", msg.clone())
            }
            AppError::ExtractionAbsent { .. } => {
                tracing::error!("Model reply contained no JSON object");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ABSENT",
                    EXTRACTION_ABSENT_MESSAGE.to_string(),
                )
            }
            AppError::ExtractionMalformed(msg) => {
                tracing::error!("Malformed model JSON: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_MALFORMED",
                    self.to_string(),
                )
            }
            AppError::Aggregation(e) => {
                tracing::error!("Aggregation error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "AGGREGATION_ERROR", e.to_string())
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

        let mut body = json!({
            "error": message,
            "code": code,
        });

        if let (AppError::ExtractionAbsent { partial: Value::Object(partial) }, Value::Object(map)) =
            (&self, &mut body)
        {
            for (key, value) in partial {
                map.insert(key.clone(), value.clone());
            }
        }

        (status, Json(body)).into_response()
    }
}
