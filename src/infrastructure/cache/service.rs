//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors raised inside cache implementations.
///
/// These never cross the [`CacheService`] boundary: every operation converts
/// them into a miss or a no-op and logs them.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache discovery error: {0}")]
    DiscoveryError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache not ready (state: {0})")]
    NotReady(&'static str),

    #[error("Cache operation timed out after {0} ms")]
    Timeout(u64),
}

/// Result type for cache internals.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache used for analysis results and redirect outcomes.
///
/// Every operation is total: an unreachable backend turns `get` into a miss,
/// `set`/`delete` into no-ops and `is_healthy` into `false`. Callers never
/// block or fail because of the cache.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with reconnect
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the stored value, or `None` on miss or any backend failure.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl_seconds`. Failures are swallowed.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64);

    /// Removes `key`. Failures are swallowed.
    async fn delete(&self, key: &str);

    /// Checks if the cache backend is reachable.
    async fn is_healthy(&self) -> bool;

    /// Short human-readable backend name for readiness reports.
    fn backend(&self) -> &'static str {
        "cache"
    }
}
