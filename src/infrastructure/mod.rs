//! Infrastructure layer: external integrations and process-level plumbing.

pub mod auth;
pub mod config;
pub mod metadata;
