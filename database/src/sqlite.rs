use crate::common::{row_to_task, sqlx_error_to_task_error, TASK_COLUMNS};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};
use std::{str::FromStr, time::Duration};
use task_core::{
    error::{Result, TaskError},
    models::{Task, TaskFields, TaskId},
    repository::{TaskSession, TaskStore},
};

/// Connection pool sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// SQLite implementation of the TaskStore trait
///
/// Every session is an immediate transaction on a pooled connection, so
/// concurrent writers queue on the busy timeout. File databases run
/// in WAL mode; `:memory:` databases are pinned to a single long-lived
/// connection so the schema survives between sessions.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    /// Create a new SQLite store with default pool settings
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (file path, `sqlite://path` or `:memory:`)
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTaskStore;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let store = SqliteTaskStore::new(":memory:").await?;
    ///
    /// // File-based database
    /// let store = SqliteTaskStore::new("sqlite:///tmp/tasks.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(database_url, PoolSettings::default()).await
    }

    /// Create a new SQLite store with explicit pool settings
    ///
    /// # Returns
    /// * `Ok(SqliteTaskStore)` - Successfully connected store
    /// * `Err(TaskError::Database)` - If connection fails
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self> {
        let pool_options = SqlitePoolOptions::new().acquire_timeout(settings.acquire_timeout);

        let connected = if database_url.contains(":memory:") {
            let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(sqlx_error_to_task_error)?
                .journal_mode(SqliteJournalMode::Memory)
                .foreign_keys(true);

            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(connect_options)
                .await
        } else {
            let path = database_url
                .strip_prefix("sqlite://")
                .or_else(|| database_url.strip_prefix("sqlite:"))
                .unwrap_or(database_url);

            let connect_options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true);

            pool_options
                .max_connections(settings.max_connections)
                .connect_with(connect_options)
                .await
        };
        let pool = connected.map_err(sqlx_error_to_task_error)?;

        tracing::info!(
            max_connections = settings.max_connections,
            "SQLite connection pool ready"
        );
        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// This method applies all pending migrations to bring the database schema
    /// up to date. It should be called after creating a new store instance.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TaskError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    type Session = SqliteTaskSession;

    async fn session(&self) -> Result<SqliteTaskSession> {
        // Take the write lock up front; a deferred transaction that reads and
        // then writes fails with SQLITE_BUSY instead of waiting on busy_timeout.
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(|e| {
            tracing::error!(error = %e, "Failed to open database session");
            sqlx_error_to_task_error(e)
        })?;
        Ok(SqliteTaskSession { tx })
    }

    async fn health_check(&self) -> Result<()> {
        // Simple query to verify database connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }
}

/// A single transaction on a pooled connection.
///
/// Dropping it without calling `commit` rolls the transaction back and
/// returns the connection to the pool.
pub struct SqliteTaskSession {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl TaskSession for SqliteTaskSession {
    async fn all(&mut self) -> Result<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(sqlx_error_to_task_error)?;

        rows.iter().map(row_to_task).collect()
    }

    async fn find(&mut self, id: TaskId) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?");
        let result = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(sqlx_error_to_task_error)?;

        match result {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&mut self, fields: &TaskFields) -> Result<Task> {
        let sql = format!(
            "INSERT INTO tasks (title, author, description, priority, complete, created_on) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {TASK_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(&fields.description)
            .bind(fields.priority)
            .bind(fields.complete)
            .bind(Utc::now())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(sqlx_error_to_task_error)?;

        row_to_task(&row)
    }

    async fn update(&mut self, task: &Task) -> Result<()> {
        let result = sqlx::query(
            "UPDATE tasks SET title = ?, author = ?, description = ?, priority = ?, complete = ? \
             WHERE id = ?",
        )
        .bind(&task.title)
        .bind(&task.author)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.complete)
        .bind(task.id)
        .execute(&mut *self.tx)
        .await
        .map_err(sqlx_error_to_task_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(task.id));
        }
        Ok(())
    }

    async fn delete(&mut self, id: TaskId) -> Result<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await
            .map_err(sqlx_error_to_task_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id.get()));
        }
        Ok(())
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to commit database session");
            sqlx_error_to_task_error(e)
        })
    }
}
