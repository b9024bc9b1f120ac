//! Request extractors that reject invalid input before any storage access

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::Value;
use task_core::{FieldViolation, TaskError, TaskFields, TaskId, TaskValidator};

use crate::error::ApiError;

/// The `{task_id}` path segment, parsed and checked to be positive.
#[derive(Debug, Clone, Copy)]
pub struct TaskIdPath(pub TaskId);

#[async_trait]
impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::from(TaskError::invalid_field(FieldViolation::path(
                    "task_id",
                    rejection.body_text(),
                    "missing",
                )))
            })?;

        let id = TaskValidator::parse_task_id(&raw)?;
        Ok(TaskIdPath(id))
    }
}

/// A JSON task body that passed every presence, type and field constraint.
#[derive(Debug, Clone)]
pub struct TaskInput(pub TaskFields);

#[async_trait]
impl<S> FromRequest<S> for TaskInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let fields = TaskValidator::validate_json(&body)?;
        Ok(TaskInput(fields))
    }
}
