//! Typed JSON helpers on top of [`CacheService`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::service::CacheService;

/// Reads and decodes a JSON value. Undecodable payloads count as a miss.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn CacheService, key: &str) -> Option<T> {
    let raw = cache.get(key).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding undecodable cache entry");
            None
        }
    }
}

/// Encodes and stores a JSON value with a TTL. Encoding failures are logged and skipped.
pub async fn set_json<T: Serialize + ?Sized>(
    cache: &dyn CacheService,
    key: &str,
    value: &T,
    ttl_seconds: u64,
) {
    match serde_json::to_string(value) {
        Ok(json) => cache.set(key, &json, ttl_seconds).await,
        Err(e) => warn!(key = %key, error = %e, "Failed to encode cache entry"),
    }
}
