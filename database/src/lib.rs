//! Database crate for the task service
//!
//! This crate provides the SQLite implementation of the `TaskStore` and
//! `TaskSession` traits from task-core.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for better concurrency
//! - Database migrations with proper schema management
//! - Connection pooling with configurable size and acquire timeout
//! - One transaction per session, rolled back when dropped uncommitted
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTaskStore;
//! use task_core::repository::TaskStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create store (in-memory for testing)
//!     let store = SqliteTaskStore::new(":memory:").await?;
//!
//!     // Run migrations
//!     store.migrate().await?;
//!
//!     // Store is ready to use
//!     store.health_check().await?;
//!     println!("Database is healthy!");
//!
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::{PoolSettings, SqliteTaskSession, SqliteTaskStore};

// Re-export commonly used types from task-core for convenience
pub use task_core::{
    error::{Result, TaskError},
    models::{Task, TaskFields, TaskId, TaskPayload},
    repository::{TaskSession, TaskStore},
};
