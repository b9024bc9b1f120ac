//! In-memory implementation of the TaskStore trait
//!
//! Provides a thread-safe store with:
//! - Sessions that stage changes and apply them on commit
//! - Error injection capabilities
//! - Call tracking for verification

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};
use task_core::{Result, Task, TaskError, TaskFields, TaskId, TaskSession, TaskStore};

#[derive(Default)]
struct Shared {
    tasks: Mutex<BTreeMap<i64, Task>>,
    next_id: AtomicI64,
    error_injection: Mutex<Option<TaskError>>,
    call_history: Mutex<Vec<String>>,
}

impl Shared {
    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        match self.error_injection.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn record_call(&self, call: String) {
        self.call_history.lock().push(call);
    }
}

/// In-memory task store for testing
///
/// Clones share the same table, so a test can keep one handle for
/// inspection while another is owned by the code under test.
#[derive(Clone)]
pub struct InMemoryTaskStore {
    shared: Arc<Shared>,
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                next_id: AtomicI64::new(1),
                ..Shared::default()
            }),
        }
    }

    /// Create a store with pre-populated tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let max_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        let store = Self::new();
        store.shared.next_id.store(max_id + 1, Ordering::SeqCst);
        store
            .shared
            .tasks
            .lock()
            .extend(tasks.into_iter().map(|task| (task.id, task)));
        store
    }

    /// Fail the next store or session operation with the given error
    pub fn inject_error(&self, error: TaskError) {
        *self.shared.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.shared.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.shared.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.shared.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.shared.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert no session was ever opened
    pub fn assert_untouched(&self) {
        let history = self.shared.call_history.lock();
        assert!(
            history.is_empty(),
            "Store should not have been used. Call history: {:?}",
            *history
        );
    }

    /// Committed tasks, oldest first
    pub fn snapshot(&self) -> Vec<Task> {
        self.shared.tasks.lock().values().cloned().collect()
    }

    /// Number of committed tasks
    pub fn len(&self) -> usize {
        self.shared.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    type Session = InMemoryTaskSession;

    async fn session(&self) -> Result<InMemoryTaskSession> {
        self.shared.record_call("session()".to_string());
        self.shared.check_error_injection()?;

        let working = self.shared.tasks.lock().clone();
        Ok(InMemoryTaskSession {
            shared: self.shared.clone(),
            working,
            staged: Vec::new(),
        })
    }

    async fn health_check(&self) -> Result<()> {
        self.shared.record_call("health_check()".to_string());
        self.shared.check_error_injection()
    }
}

enum Change {
    Upsert(Task),
    Delete(i64),
}

/// Session over [`InMemoryTaskStore`].
///
/// Reads see a snapshot taken when the session opened plus the session's own
/// changes. Commit replays the staged changes onto the shared table; dropping
/// the session discards them.
pub struct InMemoryTaskSession {
    shared: Arc<Shared>,
    working: BTreeMap<i64, Task>,
    staged: Vec<Change>,
}

#[async_trait]
impl TaskSession for InMemoryTaskSession {
    async fn all(&mut self) -> Result<Vec<Task>> {
        self.shared.record_call("all()".to_string());
        self.shared.check_error_injection()?;
        Ok(self.working.values().cloned().collect())
    }

    async fn find(&mut self, id: TaskId) -> Result<Option<Task>> {
        self.shared.record_call(format!("find(id={id})"));
        self.shared.check_error_injection()?;
        Ok(self.working.get(&id.get()).cloned())
    }

    async fn insert(&mut self, fields: &TaskFields) -> Result<Task> {
        self.shared
            .record_call(format!("insert(title={})", fields.title));
        self.shared.check_error_injection()?;

        let task = Task {
            id: self.shared.next_id.fetch_add(1, Ordering::SeqCst),
            title: fields.title.clone(),
            author: fields.author.clone(),
            description: fields.description.clone(),
            priority: fields.priority,
            complete: fields.complete,
            created_on: Utc::now(),
        };
        self.working.insert(task.id, task.clone());
        self.staged.push(Change::Upsert(task.clone()));
        Ok(task)
    }

    async fn update(&mut self, task: &Task) -> Result<()> {
        self.shared.record_call(format!("update(id={})", task.id));
        self.shared.check_error_injection()?;

        let Some(existing) = self.working.get_mut(&task.id) else {
            return Err(TaskError::NotFound(task.id));
        };
        let mut updated = existing.clone();
        updated.overwrite(task.fields());
        *existing = updated.clone();
        self.staged.push(Change::Upsert(updated));
        Ok(())
    }

    async fn delete(&mut self, id: TaskId) -> Result<()> {
        self.shared.record_call(format!("delete(id={id})"));
        self.shared.check_error_injection()?;

        if self.working.remove(&id.get()).is_none() {
            return Err(TaskError::NotFound(id.get()));
        }
        self.staged.push(Change::Delete(id.get()));
        Ok(())
    }

    async fn commit(self) -> Result<()> {
        self.shared.record_call("commit()".to_string());
        self.shared.check_error_injection()?;

        let mut tasks = self.shared.tasks.lock();
        for change in self.staged {
            match change {
                Change::Upsert(task) => {
                    tasks.insert(task.id, task);
                }
                Change::Delete(id) => {
                    tasks.remove(&id);
                }
            }
        }
        Ok(())
    }
}
