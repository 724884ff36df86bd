//! Service layer: tenant registry and the shared task operations.

pub mod registry;
pub mod task_service;

pub use registry::TaskRegistry;
pub use task_service::TaskService;
