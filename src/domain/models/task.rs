//! Task domain model.
//!
//! A `TaskList` is one tenant's collection: insertion-ordered, ids unique
//! within the collection, alive for the process lifetime. Ids come from a
//! per-collection counter rather than the wall clock, so two creations in
//! the same clock tick cannot collide.

use serde::{Deserialize, Serialize};

use crate::domain::errors::TaskError;

/// A single to-do item. This is the wire format on both surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Collection-local identifier, monotonically increasing from 1.
    pub id: u64,
    /// Trimmed, non-empty task text.
    pub text: String,
    /// Completion flag; flips to `true` exactly once.
    pub completed: bool,
}

/// One tenant's ordered task collection.
#[derive(Debug)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { tasks: Vec::new(), next_id: 1 }
    }

    /// Append a new task with the given text.
    ///
    /// The text is trimmed first; an empty result is rejected and the
    /// collection is left untouched.
    pub fn create(&mut self, text: &str) -> Result<Task, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }

        let task = Task {
            id: self.next_id,
            text: text.to_string(),
            completed: false,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Mark the task with the given id completed.
    ///
    /// Idempotent; completing an already-completed task is a no-op. Returns
    /// `None` when no task has that id; absence is an outcome, not an error.
    pub fn complete(&mut self, id: u64) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = true;
        Some(task.clone())
    }

    /// Remove the task with the given id, returning it.
    ///
    /// Returns `None` when no task has that id; the collection is unchanged.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_appends_with_counter_ids() {
        let mut list = TaskList::new();
        let first = list.create("buy milk").unwrap();
        let second = list.create("walk dog").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.completed);
        assert_eq!(list.tasks().len(), 2);
        assert_eq!(list.tasks()[0].text, "buy milk");
    }

    #[test]
    fn create_trims_text() {
        let mut list = TaskList::new();
        let task = list.create("  buy milk  ").unwrap();
        assert_eq!(task.text, "buy milk");
    }

    #[test]
    fn create_rejects_empty_and_whitespace_text() {
        let mut list = TaskList::new();
        assert_eq!(list.create(""), Err(TaskError::EmptyText));
        assert_eq!(list.create("   \t"), Err(TaskError::EmptyText));
        assert!(list.is_empty());
    }

    #[test]
    fn complete_is_idempotent() {
        let mut list = TaskList::new();
        let id = list.create("buy milk").unwrap().id;

        let once = list.complete(id).unwrap();
        let twice = list.complete(id).unwrap();
        assert!(once.completed);
        assert_eq!(once, twice);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn complete_unknown_id_returns_none_and_leaves_list_unchanged() {
        let mut list = TaskList::new();
        list.create("buy milk").unwrap();

        assert!(list.complete(999).is_none());
        assert_eq!(list.len(), 1);
        assert!(!list.tasks()[0].completed);
    }

    #[test]
    fn remove_takes_exactly_one_task_and_keeps_order() {
        let mut list = TaskList::new();
        let a = list.create("a").unwrap();
        let b = list.create("b").unwrap();
        let c = list.create("c").unwrap();

        let removed = list.remove(b.id).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].id, a.id);
        assert_eq!(list.tasks()[1].id, c.id);
    }

    #[test]
    fn remove_unknown_id_returns_none() {
        let mut list = TaskList::new();
        list.create("a").unwrap();
        assert!(list.remove(42).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut list = TaskList::new();
        let a = list.create("a").unwrap();
        list.remove(a.id).unwrap();
        let b = list.create("b").unwrap();
        assert_eq!(b.id, 2);
    }

    #[test]
    fn wire_format_has_exactly_three_fields() {
        let task = Task { id: 7, text: "x".into(), completed: true };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value, serde_json::json!({"id": 7, "text": "x", "completed": true}));
    }
}
