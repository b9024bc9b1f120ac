use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use task_core::{
    error::{Result, TaskError},
    models::Task,
};

/// Column list shared by every query that returns whole tasks
pub const TASK_COLUMNS: &str = "id, title, author, description, priority, complete, created_on";

/// Convert SQLite row to Task model
pub fn row_to_task(row: &SqliteRow) -> Result<Task> {
    let created_on: DateTime<Utc> = row.try_get("created_on").map_err(sqlx_error_to_task_error)?;

    Ok(Task {
        id: row.try_get("id").map_err(sqlx_error_to_task_error)?,
        title: row.try_get("title").map_err(sqlx_error_to_task_error)?,
        author: row.try_get("author").map_err(sqlx_error_to_task_error)?,
        description: row.try_get("description").map_err(sqlx_error_to_task_error)?,
        priority: row.try_get("priority").map_err(sqlx_error_to_task_error)?,
        complete: row.try_get("complete").map_err(sqlx_error_to_task_error)?,
        created_on,
    })
}

/// Convert SQLx error to TaskError
pub fn sqlx_error_to_task_error(err: sqlx::Error) -> TaskError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            if message.contains("CHECK constraint failed") {
                TaskError::Database(format!("constraint violated: {message}"))
            } else {
                TaskError::Database(message.to_string())
            }
        }
        sqlx::Error::RowNotFound => {
            // Lookups use fetch_optional, so this only surfaces from a broken query
            TaskError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TaskError::Database("Connection pool timeout".to_string()),
        sqlx::Error::PoolClosed => TaskError::Database("Connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => TaskError::Database(format!("I/O error: {io_err}")),
        sqlx::Error::ColumnNotFound(column) => {
            TaskError::Database(format!("Missing column in result: {column}"))
        }
        _ => TaskError::Database(format!("Database operation failed: {err}")),
    }
}
