//! Task Core Library
//!
//! This crate provides the domain model, input validation, error type and
//! storage interfaces for the task service. All other crates depend on the
//! types and interfaces defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `Task` record, the request payload and `TaskId`
//! - [`error`] - Error types and result handling
//! - [`validation`] - Payload and path parameter validation
//! - [`repository`] - Store and per-request session traits
//! - [`service`] - List, create, get, update and delete
//!
//! # Example
//!
//! ```rust
//! use task_core::{models::TaskPayload, validation::TaskValidator};
//!
//! let payload = TaskPayload {
//!     title: "Buy milk".to_string(),
//!     author: "Jo".to_string(),
//!     description: "2% milk".to_string(),
//!     priority: 3,
//!     complete: false,
//! };
//!
//! // Validate the payload before it reaches storage
//! let fields = TaskValidator::validate_payload(payload).unwrap();
//! assert_eq!(fields.priority, 3);
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{FieldSource, FieldViolation, Result, TaskError};
pub use models::{Task, TaskFields, TaskId, TaskPayload};
pub use repository::{TaskSession, TaskStore};
pub use validation::TaskValidator;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "task-core");
    }

    #[test]
    fn test_re_exports() {
        let error = TaskError::NotFound(1);
        assert!(error.is_not_found());
        assert!(TaskId::new(1).is_some());
    }
}
