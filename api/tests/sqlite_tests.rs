//! The HTTP surface backed by a real SQLite store

mod common;

use axum::{http::StatusCode, Router};
use common::*;
use database::SqliteTaskStore;
use mocks::{assert_insertion_order, TaskPayloadBuilder};
use std::sync::Arc;
use task_api::create_router;
use task_core::Task;

async fn sqlite_app() -> (Router, Arc<SqliteTaskStore>) {
    let store = Arc::new(SqliteTaskStore::new(":memory:").await.unwrap());
    store.migrate().await.unwrap();
    (create_router(store.clone()), store)
}

#[tokio::test]
async fn test_scenario_against_sqlite() {
    let (app, _store) = sqlite_app().await;

    assert_eq!(
        post(&app, "/tasks", TaskPayloadBuilder::new().build_json()).await.status,
        StatusCode::CREATED
    );
    let id = list(&app).await[0].id;

    let before: Task =
        serde_json::from_value(get(&app, &format!("/tasks/{id}")).await.body).unwrap();
    assert_eq!(before.title, "Buy milk");

    let update = TaskPayloadBuilder::new()
        .with_priority(5)
        .with_complete(true)
        .build_json();
    assert_eq!(
        put(&app, &format!("/tasks/{id}"), update).await.status,
        StatusCode::NO_CONTENT
    );

    let after: Task =
        serde_json::from_value(get(&app, &format!("/tasks/{id}")).await.body).unwrap();
    assert_eq!(after.priority, 5);
    assert!(after.complete);
    assert_eq!(after.created_on, before.created_on);

    assert_eq!(
        delete(&app, &format!("/tasks/{id}")).await.status,
        StatusCode::NO_CONTENT
    );
    let gone = get(&app, &format!("/tasks/{id}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(
        gone.body["detail"],
        format!("Task with id #{id} was not found")
    );
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (app, _store) = sqlite_app().await;

    for _ in 0..3 {
        post(&app, "/tasks", TaskPayloadBuilder::new().build_json()).await;
    }
    delete(&app, "/tasks/3").await;
    post(&app, "/tasks", TaskPayloadBuilder::new().build_json()).await;

    let tasks = list(&app).await;
    assert_insertion_order(&tasks);
    assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 4]);
}

#[tokio::test]
async fn test_closed_pool_is_internal_error() {
    let (app, store) = sqlite_app().await;
    store.close().await;

    let response = get(&app, "/tasks").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["detail"], "Internal server error");

    assert_eq!(get(&app, "/health").await.status, StatusCode::INTERNAL_SERVER_ERROR);
}
