//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that infrastructure adapters implement:
//! - `SessionVerifier`: credential verification against the identity provider
//!
//! The seam exists so the HTTP auth gate can be exercised in tests with an
//! in-process verifier instead of a live identity service.

pub mod session_verifier;

pub use session_verifier::SessionVerifier;
