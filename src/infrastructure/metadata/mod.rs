//! Remote metadata documents and their TTL cache.

pub mod cache;

pub use cache::MetadataCache;
