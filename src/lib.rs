//! Taskdeck - Multi-tenant task list with a dual exposure surface
//!
//! Taskdeck keeps per-user task collections in process memory and exposes the
//! same four operations (create, list, complete, delete) two ways: a small
//! REST API and an MCP (Model Context Protocol) tool server speaking JSON-RPC
//! over streamable HTTP. Identity is delegated to an external provider and
//! revalidated on every guarded request; MCP discovery metadata is proxied
//! from a remote source through a TTL cache.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors, and the session-verifier port
//! - **Service Layer** (`services`): Tenant registry and shared task operations
//! - **Infrastructure Layer** (`infrastructure`): Config loading, identity
//!   client, metadata cache
//! - **Adapter Layer** (`adapters`): The HTTP surface (REST + MCP + discovery)

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ApiError, ApiResult, TaskError};
pub use domain::models::{AuthConfig, Config, CorsConfig, MetadataConfig, ServerConfig};
pub use domain::models::{Session, SessionClaims, Task, TaskList};
pub use domain::ports::SessionVerifier;
pub use infrastructure::auth::HttpSessionVerifier;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::metadata::MetadataCache;
pub use services::{TaskRegistry, TaskService};
