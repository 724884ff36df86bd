//! Keyed TTL cache fronting remote JSON metadata documents.
//!
//! Discovery metadata changes slowly, so a fetched document is served from
//! memory for the TTL window (moka evaluates expiry lazily on access, no
//! timer threads). Failures are surfaced distinctly, never cached, and never
//! evict a live entry for another key.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;

use crate::domain::errors::{ApiError, ApiResult};

/// Default TTL for cached metadata documents.
const METADATA_CACHE_TTL_SECS: u64 = 300;

/// Default deadline for a single metadata fetch.
const METADATA_FETCH_TIMEOUT_SECS: u64 = 10;

/// Maximum number of cached documents. Two URLs flow through in practice.
const METADATA_CACHE_MAX_CAPACITY: u64 = 16;

/// TTL cache over remote JSON metadata, keyed by URL.
///
/// Concurrent callers racing on a cold key may each issue a fetch; the last
/// insert wins. The documents are tiny and slow-changing, so no
/// single-flight coordination is attempted.
#[derive(Clone)]
pub struct MetadataCache {
    http: Client,
    entries: Cache<String, Arc<serde_json::Value>>,
    timeout: Duration,
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataCache {
    /// Create a cache with the default 5-minute TTL and 10-second deadline.
    pub fn new() -> Self {
        Self::with_ttl_and_timeout(
            Duration::from_secs(METADATA_CACHE_TTL_SECS),
            Duration::from_secs(METADATA_FETCH_TIMEOUT_SECS),
        )
    }

    /// Create with custom TTL and per-fetch deadline.
    pub fn with_ttl_and_timeout(ttl: Duration, timeout: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(METADATA_CACHE_MAX_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self { http: Client::new(), entries, timeout }
    }

    /// Return the document at `url`, fetching it if absent or expired.
    ///
    /// A fetch failure leaves the cache untouched: no negative caching, and
    /// entries for other keys stay servable.
    pub async fn fetch(&self, url: &str) -> ApiResult<Arc<serde_json::Value>> {
        if let Some(hit) = self.entries.get(url).await {
            tracing::debug!(%url, "metadata cache hit");
            return Ok(hit);
        }

        let payload = Arc::new(self.fetch_remote(url).await?);
        self.entries.insert(url.to_string(), Arc::clone(&payload)).await;
        Ok(payload)
    }

    /// Drop the cached entry for one URL, forcing the next fetch to go remote.
    pub async fn invalidate(&self, url: &str) {
        self.entries.invalidate(url).await;
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    async fn fetch_remote(&self, url: &str) -> ApiResult<serde_json::Value> {
        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    tracing::error!(%url, "metadata fetch timed out");
                    ApiError::MetadataTimeout { url: url.to_string() }
                } else {
                    tracing::error!(%url, %err, "metadata fetch failed in transport");
                    ApiError::MetadataUnavailable { url: url.to_string(), status: None }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%url, %status, "metadata fetch returned non-success status");
            return Err(ApiError::MetadataUnavailable {
                url: url.to_string(),
                status: Some(status.as_u16()),
            });
        }

        response.json().await.map_err(|err| {
            if err.is_timeout() {
                tracing::error!(%url, "metadata fetch timed out reading body");
                ApiError::MetadataTimeout { url: url.to_string() }
            } else {
                tracing::error!(%url, %err, "metadata document is not valid JSON");
                ApiError::MetadataParseError { url: url.to_string() }
            }
        })
    }
}
