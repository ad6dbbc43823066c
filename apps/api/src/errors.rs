use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::tailor::analyzer::TailorError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    Llm(String),

    /// The model answered but nothing usable could be parsed from the reply.
    #[error("Parse failure: {exception}")]
    Parse { raw: String, exception: String },

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<TailorError> for AppError {
    fn from(err: TailorError) -> Self {
        let message = err.to_string();
        match err {
            TailorError::EmptyInput(_) => AppError::Validation(message),
            TailorError::Llm(e) => AppError::Llm(e.to_string()),
            TailorError::Parse { raw, source } => AppError::Parse {
                raw,
                exception: source.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Parse { raw, exception } => {
                let body = Json(json!({
                    "error": {
                        "code": "PARSE_FAILURE",
                        "message": "Agent response could not be parsed",
                        "raw": raw,
                        "exception": exception
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
    use crate::llm_client::LlmError;
    use crate::tailor::analyzer::InputField;
    use crate::tailor::parser::ParseError;

    #[test]
    fn test_empty_input_maps_to_validation() {
        let err: AppError = TailorError::EmptyInput(InputField::ResumeText).into();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Resume text is empty."),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_llm_failure_is_bad_gateway() {
        let err: AppError = TailorError::Llm(LlmError::EmptyContent).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_parse_failure_keeps_raw_text() {
        let err: AppError = TailorError::Parse {
            raw: "nope".to_string(),
            source: ParseError::Unparseable { attempts: vec![] },
        }
        .into();
        match &err {
            AppError::Parse { raw, exception } => {
                assert_eq!(raw, "nope");
                assert_eq!(exception, "Could not parse JSON from agent response.");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
