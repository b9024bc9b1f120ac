//! Task HTTP API
//!
//! This crate exposes the task operations from `task-core` over HTTP with
//! axum. It provides:
//!
//! - Routes for listing, creating, reading, replacing and deleting tasks
//! - Extractors that validate path ids and JSON bodies before storage access
//! - Error mapping from core errors to status codes and `{"detail": ...}` bodies
//! - Per-request structured logging
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use task_api::TaskServer;
//!
//! async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(database::SqliteTaskStore::new(":memory:").await?);
//!     store.migrate().await?;
//!
//!     TaskServer::new(store).serve("127.0.0.1:8000").await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod handler;
pub mod request_logger;
pub mod server;

pub use error::{ApiError, ErrorDetail};
pub use extract::{TaskIdPath, TaskInput};
pub use server::{create_router, AppState, TaskServer};

pub use task_core::{Task, TaskError, TaskStore};
