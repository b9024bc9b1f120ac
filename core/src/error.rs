use serde::Serialize;
use thiserror::Error;

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Where a rejected value came from in the incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSource {
    /// JSON request body
    Body,
    /// URL path parameter
    Path,
}

impl std::fmt::Display for FieldSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSource::Body => write!(f, "body"),
            FieldSource::Path => write!(f, "path"),
        }
    }
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub source: FieldSource,
    pub field: String,
    pub message: String,
    /// Machine readable constraint code (e.g. `length`, `range`, `int_parsing`)
    pub kind: String,
}

impl FieldViolation {
    pub fn body(
        field: impl Into<String>,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            source: FieldSource::Body,
            field: field.into(),
            message: message.into(),
            kind: kind.into(),
        }
    }

    pub fn path(
        field: impl Into<String>,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            source: FieldSource::Path,
            field: field.into(),
            message: message.into(),
            kind: kind.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.source, self.field, self.message)
    }
}

/// Error types for the task service.
///
/// Each variant maps to one HTTP status class: validation failures are
/// client errors, a missing record is a 404, and everything that comes out
/// of storage or process wiring is a server error.
///
/// # Examples
///
/// ```rust
/// use task_core::error::TaskError;
///
/// let not_found = TaskError::NotFound(42);
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
/// assert_eq!(not_found.to_string(), "Task with id #42 was not found");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// No task with the given id exists
    #[error("Task with id #{0} was not found")]
    NotFound(i64),

    /// One or more input constraints were violated
    #[error("Validation error: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TaskError {
    /// Create a validation error for a single field
    pub fn invalid_field(violation: FieldViolation) -> Self {
        Self::Validation(vec![violation])
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TaskError::Database(_))
    }

    /// Violations carried by a validation error, empty for other variants
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            TaskError::Validation(violations) => violations,
            _ => &[],
        }
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TaskError::NotFound(_) => 404,
            TaskError::Validation(_) => 422,
            TaskError::Database(_) => 500,
            TaskError::Configuration(_) => 500,
            TaskError::Internal(_) => 500,
        }
    }
}
