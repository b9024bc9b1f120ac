//! Error handling for the HTTP layer
//!
//! Maps internal task errors to status codes and JSON bodies of the form
//! `{"detail": ...}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use task_core::{FieldSource, FieldViolation, TaskError};
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// One entry of a 422 response body
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<&FieldViolation> for ErrorDetail {
    fn from(violation: &FieldViolation) -> Self {
        Self {
            loc: vec![violation.source.to_string(), violation.field.clone()],
            msg: violation.message.clone(),
            kind: violation.kind.clone(),
        }
    }
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error; internal causes are never exposed
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            ApiError::NotFound(message) => serde_json::json!({ "detail": message }),
            ApiError::Validation(violations) => {
                let details: Vec<ErrorDetail> = violations.iter().map(ErrorDetail::from).collect();
                serde_json::json!({ "detail": details })
            }
            ApiError::Internal(_) => serde_json::json!({ "detail": "Internal server error" }),
        }
    }
}

/// Convert from TaskError to ApiError
impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::Validation(violations) => ApiError::Validation(violations),
            TaskError::Database(_) | TaskError::Configuration(_) | TaskError::Internal(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

/// Bodies that are not JSON at all are reported like field violations
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let violation = match &rejection {
            JsonRejection::JsonSyntaxError(_) => {
                FieldViolation::body("body", "JSON decode error", "json_invalid")
            }
            JsonRejection::MissingJsonContentType(_) => FieldViolation {
                source: FieldSource::Body,
                field: "body".to_string(),
                message: "Expected request with `Content-Type: application/json`".to_string(),
                kind: "content_type".to_string(),
            },
            _ => FieldViolation::body("body", rejection.body_text(), "body_invalid"),
        };
        ApiError::Validation(vec![violation])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(cause) => tracing::error!(error = %cause, "Request failed"),
            ApiError::NotFound(message) => tracing::debug!(%message, "Task not found"),
            ApiError::Validation(violations) => {
                tracing::warn!(violations = violations.len(), "Rejected invalid request")
            }
        }
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(TaskError::NotFound(3)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(TaskError::Validation(vec![])).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(TaskError::Database("locked".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_body() {
        let body = ApiError::from(TaskError::NotFound(12)).to_body();
        assert_eq!(body["detail"], "Task with id #12 was not found");
    }

    #[test]
    fn test_validation_body() {
        let error = ApiError::from(TaskError::Validation(vec![
            FieldViolation::body("title", "String should have at least 3 characters", "length"),
            FieldViolation::path("task_id", "Input should be greater than 0", "greater_than"),
        ]));
        let body = error.to_body();

        assert_eq!(body["detail"][0]["loc"], serde_json::json!(["body", "title"]));
        assert_eq!(body["detail"][0]["type"], "length");
        assert_eq!(body["detail"][1]["loc"], serde_json::json!(["path", "task_id"]));
        assert_eq!(body["detail"][1]["msg"], "Input should be greater than 0");
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let body = ApiError::from(TaskError::Database("secret path /var/db".into())).to_body();
        assert_eq!(body["detail"], "Internal server error");
    }
}
