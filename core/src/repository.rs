use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Task, TaskFields, TaskId},
};

/// Source of storage sessions.
///
/// Implementations hold whatever is shared across requests (a connection
/// pool, an in-memory table) and must be safe to use concurrently.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Session type handed out for a single request
    type Session: TaskSession;

    /// Open a new session.
    ///
    /// # Returns
    /// * `Ok(Session)` - A session with an open transaction
    /// * `Err(TaskError::Database)` - If no connection could be acquired
    async fn session(&self) -> Result<Self::Session>;

    /// Get store health status for monitoring
    ///
    /// # Returns
    /// * `Ok(())` - Store is reachable
    /// * `Err(TaskError::Database)` - Store is unhealthy
    async fn health_check(&self) -> Result<()>;
}

/// Transactional handle scoped to one request.
///
/// Changes become visible to other sessions only after [`TaskSession::commit`].
/// Dropping a session without committing discards its changes and releases
/// the underlying connection.
#[async_trait]
pub trait TaskSession: Send {
    /// All tasks ordered by insertion (ascending id)
    async fn all(&mut self) -> Result<Vec<Task>>;

    /// Look up a task by primary key
    ///
    /// # Returns
    /// * `Ok(Some(Task))` - The task if found
    /// * `Ok(None)` - If no task exists with that id
    /// * `Err(TaskError::Database)` - If the query fails
    async fn find(&mut self, id: TaskId) -> Result<Option<Task>>;

    /// Insert a new row.
    ///
    /// The store assigns `id` and stamps `created_on` with the current time.
    async fn insert(&mut self, fields: &TaskFields) -> Result<Task>;

    /// Write the mutable fields of an existing task back to its row
    async fn update(&mut self, task: &Task) -> Result<()>;

    /// Remove the row with the given id
    async fn delete(&mut self, id: TaskId) -> Result<()>;

    /// Make this session's changes durable and release it
    async fn commit(self) -> Result<()>;
}
