//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - The "Buy milk" task used across scenario tests
//! - Payloads at and just past every field boundary
//! - Bulk task generators

use chrono::Utc;
use task_core::{Task, TaskFields, TaskPayload};

/// Create a basic test task with sensible defaults
pub fn create_test_task() -> Task {
    Task {
        id: 1,
        title: "Test Task".to_string(),
        author: "test-author".to_string(),
        description: "A standard test task with default values".to_string(),
        priority: 3,
        complete: false,
        created_on: Utc::now(),
    }
}

/// Create multiple unique tasks with ids `1..=count`
pub fn create_test_tasks(count: usize) -> Vec<Task> {
    (1..=count)
        .map(|i| Task {
            id: i as i64,
            title: format!("Task number {i}"),
            description: format!("Description for task {i}"),
            priority: (i % 5) as i32 + 1,
            complete: i % 2 == 0,
            ..create_test_task()
        })
        .collect()
}

/// `{title: "Buy milk", author: "Jo", description: "2% milk", priority: 3}`
pub fn buy_milk_payload() -> TaskPayload {
    TaskPayload {
        title: "Buy milk".to_string(),
        author: "Jo".to_string(),
        description: "2% milk".to_string(),
        priority: 3,
        complete: false,
    }
}

/// Validated counterpart of [`buy_milk_payload`]
pub fn buy_milk_fields() -> TaskFields {
    let payload = buy_milk_payload();
    TaskFields {
        title: payload.title,
        author: payload.author,
        description: payload.description,
        priority: payload.priority,
        complete: payload.complete,
    }
}

/// Payloads sitting exactly on each inclusive bound
pub fn boundary_payloads() -> Vec<TaskPayload> {
    let base = buy_milk_payload();
    vec![
        TaskPayload {
            title: "abc".to_string(),
            ..base.clone()
        },
        TaskPayload {
            author: "ab".to_string(),
            ..base.clone()
        },
        TaskPayload {
            description: "abc".to_string(),
            ..base.clone()
        },
        TaskPayload {
            description: "d".repeat(250),
            ..base.clone()
        },
        TaskPayload {
            priority: 1,
            ..base.clone()
        },
        TaskPayload {
            priority: 5,
            complete: true,
            ..base
        },
    ]
}

/// Payloads that each violate exactly one constraint, paired with the field
pub fn single_violation_payloads() -> Vec<(&'static str, TaskPayload)> {
    let base = buy_milk_payload();
    vec![
        ("title", TaskPayload {
            title: "ab".to_string(),
            ..base.clone()
        }),
        ("title", TaskPayload {
            title: String::new(),
            ..base.clone()
        }),
        ("author", TaskPayload {
            author: "J".to_string(),
            ..base.clone()
        }),
        ("description", TaskPayload {
            description: "ab".to_string(),
            ..base.clone()
        }),
        ("description", TaskPayload {
            description: "d".repeat(251),
            ..base.clone()
        }),
        ("priority", TaskPayload {
            priority: 0,
            ..base.clone()
        }),
        ("priority", TaskPayload {
            priority: 6,
            ..base.clone()
        }),
        ("priority", TaskPayload {
            priority: -1,
            ..base
        }),
    ]
}
