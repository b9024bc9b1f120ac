//! The five task operations.
//!
//! Each function takes ownership of (or borrows) a session that the caller
//! acquired for the current request. Mutating operations commit exactly once
//! on success; on any early return the session is dropped and rolls back.

use tracing::debug;

use crate::{
    error::{Result, TaskError},
    models::{Task, TaskFields, TaskId},
    repository::TaskSession,
};

/// Every stored task, oldest first
pub async fn list_tasks<S: TaskSession>(session: &mut S) -> Result<Vec<Task>> {
    let tasks = session.all().await?;
    debug!(count = tasks.len(), "Listed tasks");
    Ok(tasks)
}

/// Insert a validated task and commit
pub async fn create_task<S: TaskSession>(mut session: S, fields: TaskFields) -> Result<Task> {
    let task = session.insert(&fields).await?;
    session.commit().await?;
    debug!(task_id = task.id, "Created task");
    Ok(task)
}

/// Fetch one task or fail with [`TaskError::NotFound`]
pub async fn get_task<S: TaskSession>(session: &mut S, id: TaskId) -> Result<Task> {
    session
        .find(id)
        .await?
        .ok_or(TaskError::NotFound(id.get()))
}

/// Replace every mutable field of an existing task and commit
pub async fn update_task<S: TaskSession>(
    mut session: S,
    id: TaskId,
    fields: TaskFields,
) -> Result<Task> {
    let mut task = get_task(&mut session, id).await?;
    task.overwrite(fields);
    session.update(&task).await?;
    session.commit().await?;
    debug!(task_id = task.id, "Updated task");
    Ok(task)
}

/// Remove an existing task and commit
pub async fn delete_task<S: TaskSession>(mut session: S, id: TaskId) -> Result<()> {
    get_task(&mut session, id).await?;
    session.delete(id).await?;
    session.commit().await?;
    debug!(task_id = id.get(), "Deleted task");
    Ok(())
}
