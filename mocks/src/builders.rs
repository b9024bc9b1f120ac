//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - Task construction with sensible defaults
//! - TaskPayload construction, including invalid variants

use crate::fixtures::{buy_milk_payload, create_test_task};
use chrono::{DateTime, Utc};
use task_core::{Task, TaskPayload};

/// Builder for constructing Task instances in tests
pub struct TaskBuilder {
    task: Task,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        Self {
            task: create_test_task(),
        }
    }

    /// Set task ID
    pub fn with_id(mut self, id: i64) -> Self {
        self.task.id = id;
        self
    }

    /// Set task title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.task.title = title.into();
        self
    }

    /// Set task author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.task.author = author.into();
        self
    }

    /// Set task description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task.description = description.into();
        self
    }

    /// Set task priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.task.priority = priority;
        self
    }

    /// Mark the task complete
    pub fn completed(mut self) -> Self {
        self.task.complete = true;
        self
    }

    /// Set creation timestamp
    pub fn with_created_on(mut self, created_on: DateTime<Utc>) -> Self {
        self.task.created_on = created_on;
        self
    }

    /// Build the final Task
    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for request payloads
pub struct TaskPayloadBuilder {
    payload: TaskPayload,
}

impl Default for TaskPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskPayloadBuilder {
    /// Start from the "Buy milk" payload
    pub fn new() -> Self {
        Self {
            payload: buy_milk_payload(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.payload.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.payload.author = author.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.payload.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.payload.priority = priority;
        self
    }

    pub fn with_complete(mut self, complete: bool) -> Self {
        self.payload.complete = complete;
        self
    }

    /// Build the payload
    pub fn build(self) -> TaskPayload {
        self.payload
    }

    /// Build the payload as a JSON body
    pub fn build_json(self) -> String {
        serde_json::to_string(&self.payload).expect("payload serializes")
    }
}
