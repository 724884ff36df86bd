pub mod config;
pub mod session;
pub mod task;

pub use config::{AuthConfig, Config, CorsConfig, MetadataConfig, ServerConfig};
pub use session::{Session, SessionClaims};
pub use task::{Task, TaskList};
