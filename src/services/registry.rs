//! Tenant registry mapping user identifiers to task collections.
//!
//! The registry is an owned state object built once at startup and injected
//! into request handlers; there are no module-level singletons. Collections
//! are created lazily on first access and never evicted (process-lifetime
//! growth is in scope). Each collection carries its own mutex, so mutations
//! within one tenant serialize while distinct tenants never contend. No
//! collection lock is ever held across a remote call: session resolution
//! finishes before the registry is consulted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::TaskList;

/// Handle to one tenant's collection.
pub type SharedTaskList = Arc<Mutex<TaskList>>;

/// Maps user identifiers to isolated task collections, with one shared
/// collection serving every caller when the auth gate is disabled.
#[derive(Debug)]
pub struct TaskRegistry {
    auth_enabled: bool,
    shared: SharedTaskList,
    by_user: Mutex<HashMap<String, SharedTaskList>>,
}

impl TaskRegistry {
    /// Create an empty registry.
    ///
    /// `auth_enabled` mirrors the process-wide auth gate: when false the
    /// registry runs in single-tenant fallback mode and every lookup returns
    /// the one shared collection.
    pub fn new(auth_enabled: bool) -> Self {
        Self {
            auth_enabled,
            shared: Arc::new(Mutex::new(TaskList::new())),
            by_user: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the collection for a caller, creating it on first access.
    ///
    /// With the gate enabled a missing user identifier is `Forbidden`; the
    /// HTTP gate normally rejects such requests before they get here, so this
    /// is a backstop, mirroring the gate's own behavior.
    pub async fn store_for(&self, user_id: Option<&str>) -> ApiResult<SharedTaskList> {
        if !self.auth_enabled {
            return Ok(Arc::clone(&self.shared));
        }

        let user_id = user_id.ok_or(ApiError::Forbidden)?;
        let mut by_user = self.by_user.lock().await;
        let list = by_user
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TaskList::new())));
        Ok(Arc::clone(list))
    }

    /// Number of per-user collections created so far.
    pub async fn tenant_count(&self) -> usize {
        self.by_user.lock().await.len()
    }

    /// Drop every collection. Teardown hook for tests.
    pub async fn reset(&self) {
        self.by_user.lock().await.clear();
        *self.shared.lock().await = TaskList::new();
    }
}
