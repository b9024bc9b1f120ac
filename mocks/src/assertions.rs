//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Comparing stored tasks with the payload they came from
//! - Checking server-owned fields survive updates
//! - Collection-based assertions

use task_core::{Task, TaskPayload};

/// Assert a stored task carries every field of the payload it was created from
pub fn assert_task_matches_payload(task: &Task, payload: &TaskPayload) {
    assert_eq!(task.title, payload.title, "Task titles don't match");
    assert_eq!(task.author, payload.author, "Task authors don't match");
    assert_eq!(task.description, payload.description, "Task descriptions don't match");
    assert_eq!(task.priority, payload.priority, "Task priorities don't match");
    assert_eq!(task.complete, payload.complete, "Task completion flags don't match");
}

/// Assert `id` and `created_on` are unchanged between two versions of a task
pub fn assert_same_identity(before: &Task, after: &Task) {
    assert_eq!(before.id, after.id, "Task id changed");
    assert_eq!(before.created_on, after.created_on, "Task created_on changed");
}

/// Assert tasks are equal ignoring timestamps
pub fn assert_task_equals(actual: &Task, expected: &Task) {
    assert_eq!(actual.id, expected.id, "Task IDs don't match");
    assert_eq!(actual.fields(), expected.fields(), "Task fields don't match");
}

/// Assert a list of tasks is in ascending id order
pub fn assert_insertion_order(tasks: &[Task]) {
    assert!(
        tasks.windows(2).all(|pair| pair[0].id < pair[1].id),
        "Tasks are not in insertion order: {:?}",
        tasks.iter().map(|task| task.id).collect::<Vec<_>>()
    );
}

/// Assert a list contains a task with the given id
pub fn assert_contains_task(tasks: &[Task], id: i64) {
    assert!(
        tasks.iter().any(|task| task.id == id),
        "Expected task #{id} in {:?}",
        tasks.iter().map(|task| task.id).collect::<Vec<_>>()
    );
}

/// Assert a list does not contain a task with the given id
pub fn assert_missing_task(tasks: &[Task], id: i64) {
    assert!(
        tasks.iter().all(|task| task.id != id),
        "Task #{id} should not be present"
    );
}
