//! Caching layer for analysis results and redirect outcomes.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Redis-backed cache, direct or Sentinel topology, with reconnect
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! Typed access goes through [`get_json`] / [`set_json`].

mod backoff;
mod connection_state;
mod json;
mod null_cache;
mod redis_cache;
mod service;

pub use backoff::Backoff;
pub use connection_state::ConnectionState;
pub use json::{get_json, set_json};
pub use null_cache::NullCache;
pub use redis_cache::{RedisCache, RedisSettings, Topology};
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
