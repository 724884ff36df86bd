//! Identity provider integration.

pub mod session_client;

pub use session_client::HttpSessionVerifier;
