//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any `TaskStore` implementation
//! should pass, ensuring the in-memory store and SQLite behave alike.
//! Every helper expects a freshly created, empty store.

use crate::{assert_insertion_order, assert_same_identity, buy_milk_fields};
use task_core::{TaskFields, TaskId, TaskSession, TaskStore};

fn id(raw: i64) -> TaskId {
    TaskId::new(raw).expect("stored ids are positive")
}

/// Run the full store contract against an empty store
pub async fn test_store_contract<S: TaskStore>(store: &S) {
    test_health_check_contract(store).await;
    test_insert_contract(store).await;
    test_rollback_contract(store).await;
    test_update_contract(store).await;
    test_delete_contract(store).await;
    test_ordering_contract(store).await;
}

/// Health check passes on a working store
pub async fn test_health_check_contract<S: TaskStore>(store: &S) {
    assert!(
        store.health_check().await.is_ok(),
        "Health check should pass for healthy store"
    );
}

/// Inserted rows get a positive id and a creation time, and are visible after commit
pub async fn test_insert_contract<S: TaskStore>(store: &S) {
    let before = chrono::Utc::now();

    let mut session = store.session().await.expect("session should open");
    let task = session
        .insert(&buy_milk_fields())
        .await
        .expect("insert should succeed");
    session.commit().await.expect("commit should succeed");

    assert!(task.id > 0, "Created task should have positive ID");
    assert!(task.created_on >= before, "created_on should be stamped at insert");
    assert_eq!(task.fields(), buy_milk_fields(), "Inserted fields should be preserved");

    let mut session = store.session().await.expect("session should open");
    let found = session
        .find(id(task.id))
        .await
        .expect("find should succeed")
        .expect("committed task should be visible");
    assert_eq!(found, task, "Stored task should round-trip exactly");

    let missing = session
        .find(id(task.id + 1000))
        .await
        .expect("find should succeed");
    assert!(missing.is_none(), "Unknown id should yield None, not an error");
}

/// Changes from a dropped session are discarded
pub async fn test_rollback_contract<S: TaskStore>(store: &S) {
    let mut session = store.session().await.expect("session should open");
    let before = session.all().await.expect("all should succeed").len();
    drop(session);

    {
        let mut session = store.session().await.expect("session should open");
        session
            .insert(&buy_milk_fields())
            .await
            .expect("insert should succeed");
        // dropped without commit
    }

    let mut session = store.session().await.expect("session should open");
    let after = session.all().await.expect("all should succeed").len();
    assert_eq!(before, after, "Uncommitted insert must not persist");
}

/// Update rewrites mutable fields only
pub async fn test_update_contract<S: TaskStore>(store: &S) {
    let mut session = store.session().await.expect("session should open");
    let original = session
        .insert(&buy_milk_fields())
        .await
        .expect("insert should succeed");
    session.commit().await.expect("commit should succeed");

    let mut changed = original.clone();
    changed.overwrite(TaskFields {
        title: "Buy oat milk".to_string(),
        author: "Sam".to_string(),
        description: "1 litre".to_string(),
        priority: 5,
        complete: true,
    });

    let mut session = store.session().await.expect("session should open");
    session.update(&changed).await.expect("update should succeed");
    session.commit().await.expect("commit should succeed");

    let mut session = store.session().await.expect("session should open");
    let stored = session
        .find(id(original.id))
        .await
        .expect("find should succeed")
        .expect("updated task should exist");
    assert_same_identity(&original, &stored);
    assert_eq!(stored.fields(), changed.fields());
}

/// Delete removes the row from subsequent lookups
pub async fn test_delete_contract<S: TaskStore>(store: &S) {
    let mut session = store.session().await.expect("session should open");
    let task = session
        .insert(&buy_milk_fields())
        .await
        .expect("insert should succeed");
    session.commit().await.expect("commit should succeed");

    let mut session = store.session().await.expect("session should open");
    session.delete(id(task.id)).await.expect("delete should succeed");
    session.commit().await.expect("commit should succeed");

    let mut session = store.session().await.expect("session should open");
    assert!(session.find(id(task.id)).await.expect("find should succeed").is_none());
    let all = session.all().await.expect("all should succeed");
    assert!(all.iter().all(|t| t.id != task.id), "Deleted task should not be listed");

    let error = session
        .delete(id(task.id))
        .await
        .expect_err("deleting twice should fail");
    assert!(error.is_not_found());
}

/// `all` returns rows oldest first
pub async fn test_ordering_contract<S: TaskStore>(store: &S) {
    let mut session = store.session().await.expect("session should open");
    for priority in 1..=3 {
        session
            .insert(&TaskFields {
                priority,
                ..buy_milk_fields()
            })
            .await
            .expect("insert should succeed");
    }
    session.commit().await.expect("commit should succeed");

    let mut session = store.session().await.expect("session should open");
    let tasks = session.all().await.expect("all should succeed");
    assert!(tasks.len() >= 3);
    assert_insertion_order(&tasks);
}
