use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored task record.
///
/// `id` is assigned by storage on insert and `created_on` is stamped at the
/// same moment; neither changes afterwards. The remaining fields are the
/// mutable part of the record and are always replaced together.
///
/// # Examples
///
/// ```rust
/// use task_core::models::{Task, TaskFields};
/// use chrono::Utc;
///
/// let mut task = Task {
///     id: 1,
///     title: "Buy milk".to_string(),
///     author: "Jo".to_string(),
///     description: "2% milk".to_string(),
///     priority: 3,
///     complete: false,
///     created_on: Utc::now(),
/// };
///
/// task.overwrite(TaskFields {
///     title: "Buy milk".to_string(),
///     author: "Jo".to_string(),
///     description: "2% milk".to_string(),
///     priority: 5,
///     complete: true,
/// });
/// assert_eq!(task.id, 1);
/// assert!(task.complete);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Auto-increment primary key
    pub id: i64,
    /// Short task title
    pub title: String,
    /// Who wrote the task
    pub author: String,
    /// Free-form details
    pub description: String,
    /// 1 (lowest) to 5 (highest)
    pub priority: i32,
    /// Completion flag
    pub complete: bool,
    /// Insertion timestamp
    pub created_on: DateTime<Utc>,
}

impl Task {
    /// Replace every mutable field with the given values.
    ///
    /// `id` and `created_on` are left untouched.
    pub fn overwrite(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.author = fields.author;
        self.description = fields.description;
        self.priority = fields.priority;
        self.complete = fields.complete;
    }

    /// The mutable part of this record
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            priority: self.priority,
            complete: self.complete,
        }
    }
}

/// Request body for create and full-replace update.
///
/// Unknown keys (including a client supplied `id` or `created_on`) are
/// ignored by deserialization. Constraints are declared here and checked by
/// [`crate::validation::TaskValidator::validate_payload`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct TaskPayload {
    #[validate(length(min = 3, message = "String should have at least 3 characters"))]
    pub title: String,

    #[validate(length(min = 2, message = "String should have at least 2 characters"))]
    pub author: String,

    #[validate(length(
        min = 3,
        max = 250,
        message = "String should have between 3 and 250 characters"
    ))]
    pub description: String,

    #[validate(range(
        exclusive_min = 0,
        exclusive_max = 6,
        message = "Input should be greater than 0 and less than 6"
    ))]
    pub priority: i32,

    #[serde(default)]
    pub complete: bool,
}

/// Validated mutable fields of a task, ready to be written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub author: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
}

/// A task primary key that is known to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wrap a raw id, returning `None` unless it is greater than zero
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TaskId> for i64 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: 9,
            title: "Write report".to_string(),
            author: "Sam".to_string(),
            description: "Quarterly numbers".to_string(),
            priority: 2,
            complete: false,
            created_on: Utc::now(),
        }
    }

    #[test]
    fn test_overwrite_keeps_identity() {
        let mut task = sample_task();
        let id = task.id;
        let created_on = task.created_on;

        task.overwrite(TaskFields {
            title: "Rewrite report".to_string(),
            author: "Al".to_string(),
            description: "Annual numbers".to_string(),
            priority: 4,
            complete: true,
        });

        assert_eq!(task.id, id);
        assert_eq!(task.created_on, created_on);
        assert_eq!(task.title, "Rewrite report");
        assert_eq!(task.author, "Al");
        assert_eq!(task.description, "Annual numbers");
        assert_eq!(task.priority, 4);
        assert!(task.complete);
    }

    #[test]
    fn test_fields_round_trip_through_overwrite() {
        let mut task = sample_task();
        let fields = task.fields();
        task.overwrite(fields.clone());
        assert_eq!(task.fields(), fields);
    }

    #[test]
    fn test_payload_ignores_server_owned_keys() {
        let payload: TaskPayload = serde_json::from_str(
            r#"{"id": 99, "created_on": "2020-01-01T00:00:00Z", "title": "Buy milk",
                "author": "Jo", "description": "2% milk", "priority": 3}"#,
        )
        .unwrap();

        assert_eq!(payload.title, "Buy milk");
        assert!(!payload.complete);
    }

    #[test]
    fn test_task_id_must_be_positive() {
        assert_eq!(TaskId::new(1).map(TaskId::get), Some(1));
        assert!(TaskId::new(0).is_none());
        assert!(TaskId::new(-1).is_none());
        assert_eq!(TaskId::new(42).unwrap().to_string(), "42");
    }

    #[test]
    fn test_task_serializes_created_on_as_rfc3339() {
        let task = sample_task();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 9);
        assert!(value["created_on"].as_str().unwrap().contains('T'));
    }
}
