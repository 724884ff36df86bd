//! Task service implementing the four operations shared by both adapters.
//!
//! The REST handlers and the MCP tools call these methods identically; only
//! response shaping differs per surface. Not-found is `Ok(None)`, never an
//! error.

use crate::domain::errors::ApiResult;
use crate::domain::models::Task;
use crate::services::registry::TaskRegistry;

/// Business operations over a caller's task collection.
#[derive(Debug)]
pub struct TaskService {
    registry: TaskRegistry,
}

impl TaskService {
    /// Wrap a registry.
    pub fn new(registry: TaskRegistry) -> Self {
        Self { registry }
    }

    /// Access the underlying registry (tests use its reset hook).
    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Create a task in the caller's collection.
    pub async fn create(&self, user_id: Option<&str>, text: &str) -> ApiResult<Task> {
        let store = self.registry.store_for(user_id).await?;
        let task = store.lock().await.create(text)?;
        tracing::info!(user_id, task_id = task.id, "task created");
        Ok(task)
    }

    /// List the caller's tasks in insertion order.
    pub async fn list(&self, user_id: Option<&str>) -> ApiResult<Vec<Task>> {
        let store = self.registry.store_for(user_id).await?;
        let tasks = store.lock().await.tasks().to_vec();
        tracing::debug!(user_id, task_count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Mark a task completed; `Ok(None)` when the id is unknown.
    pub async fn complete(&self, user_id: Option<&str>, id: u64) -> ApiResult<Option<Task>> {
        let store = self.registry.store_for(user_id).await?;
        let task = store.lock().await.complete(id);
        match &task {
            Some(task) => tracing::info!(user_id, task_id = task.id, "task completed"),
            None => tracing::debug!(user_id, task_id = id, "complete: no such task"),
        }
        Ok(task)
    }

    /// Remove a task; `Ok(None)` when the id is unknown.
    pub async fn delete(&self, user_id: Option<&str>, id: u64) -> ApiResult<Option<Task>> {
        let store = self.registry.store_for(user_id).await?;
        let task = store.lock().await.remove(id);
        match &task {
            Some(task) => tracing::info!(user_id, task_id = task.id, "task deleted"),
            None => tracing::debug!(user_id, task_id = id, "delete: no such task"),
        }
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ApiError, TaskError};

    fn service() -> TaskService {
        TaskService::new(TaskRegistry::new(true))
    }

    #[tokio::test]
    async fn create_then_list_grows_by_one() {
        let service = service();
        let before = service.list(Some("u")).await.unwrap().len();

        let task = service.create(Some("u"), "buy milk").await.unwrap();
        assert!(!task.completed);

        let after = service.list(Some("u")).await.unwrap();
        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last().unwrap(), &task);
    }

    #[tokio::test]
    async fn create_whitespace_fails_and_collection_is_unchanged() {
        let service = service();
        let err = service.create(Some("u"), "   ").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidTask(TaskError::EmptyText)));
        assert!(service.list(Some("u")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn operations_are_tenant_scoped() {
        let service = service();
        let task = service.create(Some("alice"), "hers").await.unwrap();

        // Bob cannot see, complete, or delete Alice's task.
        assert!(service.list(Some("bob")).await.unwrap().is_empty());
        assert!(service.complete(Some("bob"), task.id).await.unwrap().is_none());
        assert!(service.delete(Some("bob"), task.id).await.unwrap().is_none());
        assert_eq!(service.list(Some("alice")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn complete_twice_yields_completed_both_times() {
        let service = service();
        let id = service.create(Some("u"), "t").await.unwrap().id;

        let first = service.complete(Some("u"), id).await.unwrap().unwrap();
        let second = service.complete(Some("u"), id).await.unwrap().unwrap();
        assert!(first.completed && second.completed);
        assert_eq!(service.list(Some("u")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_returns_removed_task() {
        let service = service();
        let id = service.create(Some("u"), "t").await.unwrap().id;

        let removed = service.delete(Some("u"), id).await.unwrap().unwrap();
        assert_eq!(removed.id, id);
        assert!(service.list(Some("u")).await.unwrap().is_empty());
    }
}
