use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Clients only ever see `{"error": "<reason>"}`; the underlying cause of a 500
/// is logged here and never returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Text extraction produced no text")]
    Extraction,

    #[error("Resume structuring failed: {0}")]
    Structuring(#[source] LlmError),

    #[error("ATS scoring failed: {0}")]
    Scoring(#[source] LlmError),

    #[error("Malformed model output during {stage}: {source}")]
    MalformedModelOutput {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The reason string exposed to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Extraction => "Failed to extract text from resume".to_string(),
            AppError::Structuring(_) => "Failed to parse resume into structured JSON".to_string(),
            AppError::Scoring(_) => "Failed to calculate ATS score".to_string(),
            AppError::MalformedModelOutput { .. } | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => tracing::warn!("Rejected request: {msg}"),
            AppError::Extraction => tracing::error!("Failed to extract text from resume"),
            AppError::Structuring(e) => tracing::error!("Error in resume structuring: {e}"),
            AppError::Scoring(e) => tracing::error!("Error in ATS scoring: {e}"),
            AppError::MalformedModelOutput { stage, source } => {
                tracing::error!("Model returned unparseable {stage} output: {source}")
            }
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn test_validation_is_bad_request_with_reason() {
        let err = AppError::Validation("Only PDF files are allowed".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Only PDF files are allowed");
    }

    #[test]
    fn test_stage_failures_are_server_errors() {
        let structuring = AppError::Structuring(LlmError::EmptyContent);
        let scoring = AppError::Scoring(LlmError::EmptyContent);
        assert_eq!(structuring.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            structuring.public_message(),
            "Failed to parse resume into structured JSON"
        );
        assert_eq!(scoring.public_message(), "Failed to calculate ATS score");
        assert_eq!(
            AppError::Extraction.public_message(),
            "Failed to extract text from resume"
        );
    }

    #[test]
    fn test_malformed_output_hides_detail() {
        let err = AppError::MalformedModelOutput {
            stage: "scoring",
            source: parse_error(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = AppError::Internal(anyhow::anyhow!("join error: task panicked"));
        assert_eq!(err.public_message(), "Internal server error");
    }
}
