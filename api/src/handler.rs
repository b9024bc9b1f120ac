//! Task route handlers
//!
//! Extractors validate the path and body first; only then does a handler
//! open a storage session and hand it to the matching service operation.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use task_core::{service, Task, TaskStore};

use crate::{
    error::ApiError,
    extract::{TaskIdPath, TaskInput},
    server::AppState,
};

type ApiResult<T> = Result<T, ApiError>;

/// `GET /tasks`
pub async fn list_tasks<S: TaskStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<Vec<Task>>> {
    let mut session = state.store.session().await?;
    let tasks = service::list_tasks(&mut session).await?;
    Ok(Json(tasks))
}

/// `POST /tasks`
pub async fn create_task<S: TaskStore>(
    State(state): State<Arc<AppState<S>>>,
    TaskInput(fields): TaskInput,
) -> ApiResult<StatusCode> {
    let session = state.store.session().await?;
    service::create_task(session, fields).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /tasks/{task_id}`
pub async fn get_task<S: TaskStore>(
    State(state): State<Arc<AppState<S>>>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<Json<Task>> {
    let mut session = state.store.session().await?;
    let task = service::get_task(&mut session, id).await?;
    Ok(Json(task))
}

/// `PUT /tasks/{task_id}`
pub async fn update_task<S: TaskStore>(
    State(state): State<Arc<AppState<S>>>,
    TaskIdPath(id): TaskIdPath,
    TaskInput(fields): TaskInput,
) -> ApiResult<StatusCode> {
    let session = state.store.session().await?;
    service::update_task(session, id, fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /tasks/{task_id}`
pub async fn delete_task<S: TaskStore>(
    State(state): State<Arc<AppState<S>>>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<StatusCode> {
    let session = state.store.session().await?;
    service::delete_task(session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
pub async fn health<S: TaskStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<&'static str> {
    state.store.health_check().await?;
    Ok("OK")
}
