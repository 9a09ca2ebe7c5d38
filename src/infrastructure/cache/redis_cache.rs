//! Redis-backed cache implementation.
//!
//! The client owns a [`ConnectionState`] machine:
//!
//! - `Connecting -> Ready` once a handshake (connect + `PING`) succeeds
//! - `Ready -> Degraded` on any command error, timeout or failed liveness ping
//! - `Degraded -> Connecting` when the reconnect task starts its next attempt
//!
//! Commands are only issued in `Ready`; in any other state they fail fast
//! locally and the caller sees a miss or a no-op.

use super::backoff::Backoff;
use super::connection_state::{ConnectionState, StateCell};
use super::service::{CacheError, CacheResult, CacheService};
use crate::config::mask_connection_string;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisResult};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{error::Elapsed, timeout};
use tracing::{debug, info, warn};

/// Interval between liveness pings while the connection is ready.
const LIVENESS_INTERVAL: Duration = Duration::from_secs(5);

/// How the client locates its Redis primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topology {
    /// A single fixed endpoint given as a `redis://` / `rediss://` URL.
    Direct { url: String },
    /// Primary discovered through Sentinel nodes (`host:port`) for a named master.
    Sentinel {
        sentinels: Vec<String>,
        master_name: String,
    },
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { url } => write!(f, "direct {}", mask_connection_string(url)),
            Self::Sentinel {
                sentinels,
                master_name,
            } => write!(f, "sentinel {} via [{}]", master_name, sentinels.join(", ")),
        }
    }
}

/// Connection settings for [`RedisCache`].
#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub topology: Topology,
    /// Credentials and database applied to a Sentinel-discovered primary.
    /// Direct URLs carry their own.
    pub username: Option<String>,
    pub password: Option<String>,
    pub db: i64,
    /// Use `rediss://` for Sentinel nodes and the discovered primary.
    pub tls: bool,
    pub command_timeout: Duration,
    pub connect_timeout: Duration,
    pub transport_backoff: Backoff,
    pub discovery_backoff: Backoff,
    pub key_prefix: String,
}

impl RedisSettings {
    /// Settings for a single endpoint with default timeouts.
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            topology: Topology::Direct { url: url.into() },
            username: None,
            password: None,
            db: 0,
            tls: false,
            command_timeout: Duration::from_millis(500),
            connect_timeout: Duration::from_secs(2),
            transport_backoff: Backoff::transport(),
            discovery_backoff: Backoff::discovery(),
            key_prefix: "intake:".to_string(),
        }
    }

    /// Settings for Sentinel discovery with default timeouts.
    pub fn sentinel(sentinels: Vec<String>, master_name: impl Into<String>) -> Self {
        Self {
            topology: Topology::Sentinel {
                sentinels,
                master_name: master_name.into(),
            },
            ..Self::direct(String::new())
        }
    }

    fn scheme(&self) -> &'static str {
        if self.tls { "rediss" } else { "redis" }
    }

    /// URL of a Sentinel node given as `host:port`.
    fn sentinel_url(&self, endpoint: &str) -> String {
        format!("{}://{}", self.scheme(), endpoint.trim())
    }

    /// URL of the discovered primary, with credentials and database applied.
    pub fn primary_url(&self, host: &str, port: u16) -> CacheResult<String> {
        let raw = format!("{}://{}:{}/{}", self.scheme(), host, port, self.db);
        let mut url = url::Url::parse(&raw)
            .map_err(|e| CacheError::DiscoveryError(format!("Invalid primary address: {e}")))?;

        if let Some(user) = self.username.as_deref().filter(|u| !u.is_empty()) {
            url.set_username(user).map_err(|_| {
                CacheError::DiscoveryError("Cannot apply username to primary URL".to_string())
            })?;
        }
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            url.set_password(Some(password)).map_err(|_| {
                CacheError::DiscoveryError("Cannot apply password to primary URL".to_string())
            })?;
        }

        Ok(url.to_string())
    }
}

struct Inner {
    settings: RedisSettings,
    conn: Mutex<Option<MultiplexedConnection>>,
    state: StateCell,
    reconnecting: AtomicBool,
}

/// Redis cache with connection supervision and fail-fast commands.
///
/// Construction never blocks on the network: [`RedisCache::start`] spawns the
/// connect task and returns a client in `Connecting`. Until the handshake
/// completes every lookup misses.
#[derive(Clone)]
pub struct RedisCache {
    inner: Arc<Inner>,
}

impl RedisCache {
    /// Creates the client and spawns its connect and liveness tasks.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(settings: RedisSettings) -> Self {
        info!(topology = %settings.topology, "Starting Redis cache client");

        let inner = Arc::new(Inner {
            settings,
            conn: Mutex::new(None),
            state: StateCell::new(ConnectionState::Connecting),
            reconnecting: AtomicBool::new(false),
        });

        spawn_reconnect(&inner);
        tokio::spawn(liveness_loop(Arc::downgrade(&inner)));

        Self { inner }
    }

    /// Waits up to `limit` for the first handshake. Returns whether the client is ready.
    pub async fn wait_ready(&self, limit: Duration) -> bool {
        let poll = async {
            while !self.inner.state.is_ready() {
                tokio::time::sleep(Duration::from_millis(25)).await;
            }
        };
        timeout(limit, poll).await.is_ok()
    }

    /// Current connection state, for diagnostics.
    pub fn state(&self) -> ConnectionState {
        self.inner.state.get()
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.inner.settings.key_prefix, key)
    }

    /// Returns the live connection, or fails fast when not ready.
    async fn connection(&self) -> CacheResult<MultiplexedConnection> {
        let state = self.inner.state.get();
        if state != ConnectionState::Ready {
            return Err(CacheError::NotReady(state.as_str()));
        }
        self.inner
            .conn
            .lock()
            .await
            .clone()
            .ok_or(CacheError::NotReady(ConnectionState::Connecting.as_str()))
    }

    /// Maps a timed command result, degrading the connection on failure.
    fn settle<T>(&self, op: &str, result: Result<RedisResult<T>, Elapsed>) -> CacheResult<T> {
        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                self.inner.on_transport_error(op, &e.to_string());
                Err(CacheError::OperationError(format!("Redis {op} failed: {e}")))
            }
            Err(_) => {
                let ms = self.inner.settings.command_timeout.as_millis() as u64;
                self.inner.on_transport_error(op, "timed out");
                Err(CacheError::Timeout(ms))
            }
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let full_key = self.build_key(key);
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                debug!(key = %key, error = %e, "Cache GET skipped");
                return None;
            }
        };

        let result = timeout(
            self.inner.settings.command_timeout,
            conn.get::<_, Option<String>>(&full_key),
        )
        .await;

        match self.settle("GET", result) {
            Ok(Some(value)) => {
                debug!("Cache HIT: {}", key);
                Some(value)
            }
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                None
            }
            Err(e) => {
                warn!("Redis GET error for {}: {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) {
        let full_key = self.build_key(key);
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                debug!(key = %key, error = %e, "Cache SET skipped");
                return;
            }
        };

        let result = timeout(
            self.inner.settings.command_timeout,
            conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds),
        )
        .await;

        match self.settle("SETEX", result) {
            Ok(()) => debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds),
            Err(e) => warn!("Redis SET error for {}: {}", key, e),
        }
    }

    async fn delete(&self, key: &str) {
        let full_key = self.build_key(key);
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                debug!(key = %key, error = %e, "Cache DEL skipped");
                return;
            }
        };

        let result = timeout(
            self.inner.settings.command_timeout,
            conn.del::<_, i32>(&full_key),
        )
        .await;

        match self.settle("DEL", result) {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", key);
                }
            }
            Err(e) => warn!("Redis DEL error for {}: {}", key, e),
        }
    }

    async fn is_healthy(&self) -> bool {
        let Ok(mut conn) = self.connection().await else {
            return false;
        };
        let result = timeout(self.inner.settings.command_timeout, conn.ping::<()>()).await;
        self.settle("PING", result).is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

impl Inner {
    /// Handles a failed command: `Ready -> Degraded` and schedule a reconnect.
    fn on_transport_error(self: &Arc<Self>, op: &str, reason: &str) {
        if self.state.degrade_if_ready() {
            warn!(op = %op, reason = %reason, "Redis connection degraded, reconnecting");
            spawn_reconnect(self);
        }
    }

    /// Connects to the primary (discovering it first in Sentinel mode) and verifies it with `PING`.
    async fn establish(&self) -> CacheResult<MultiplexedConnection> {
        let url = match &self.settings.topology {
            Topology::Direct { url } => url.clone(),
            Topology::Sentinel {
                sentinels,
                master_name,
            } => self.discover_primary(sentinels, master_name).await?,
        };

        let mut conn = self.open(&url).await?;
        timeout(self.settings.command_timeout, conn.ping::<()>())
            .await
            .map_err(|_| CacheError::Timeout(self.settings.command_timeout.as_millis() as u64))?
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {e}")))?;

        Ok(conn)
    }

    async fn open(&self, url: &str) -> CacheResult<MultiplexedConnection> {
        let client = Client::open(url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {e}"))
        })?;

        timeout(
            self.settings.connect_timeout,
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Timeout(self.settings.connect_timeout.as_millis() as u64))?
        .map_err(|e| CacheError::ConnectionError(format!("Failed to connect to Redis: {e}")))
    }

    /// Asks each Sentinel in turn for the current primary address.
    async fn discover_primary(&self, sentinels: &[String], master_name: &str) -> CacheResult<String> {
        let mut failures = Vec::with_capacity(sentinels.len());

        for endpoint in sentinels {
            match self.query_sentinel(endpoint, master_name).await {
                Ok((host, port)) => {
                    debug!(sentinel = %endpoint, host = %host, port, "Discovered Redis primary");
                    return self.settings.primary_url(&host, port);
                }
                Err(e) => {
                    debug!(sentinel = %endpoint, error = %e, "Sentinel query failed");
                    failures.push(format!("{endpoint}: {e}"));
                }
            }
        }

        Err(CacheError::DiscoveryError(format!(
            "No sentinel resolved master '{}' ({})",
            master_name,
            failures.join("; ")
        )))
    }

    async fn query_sentinel(&self, endpoint: &str, master_name: &str) -> CacheResult<(String, u16)> {
        let mut conn = self.open(&self.settings.sentinel_url(endpoint)).await?;

        let address: Option<(String, u16)> = timeout(
            self.settings.command_timeout,
            redis::cmd("SENTINEL")
                .arg("get-master-addr-by-name")
                .arg(master_name)
                .query_async(&mut conn),
        )
        .await
        .map_err(|_| CacheError::Timeout(self.settings.command_timeout.as_millis() as u64))?
        .map_err(|e| CacheError::DiscoveryError(e.to_string()))?;

        address.ok_or_else(|| {
            CacheError::DiscoveryError(format!("Unknown master '{master_name}'"))
        })
    }
}

/// Starts a reconnect task unless one is already running.
fn spawn_reconnect(inner: &Arc<Inner>) {
    if inner.reconnecting.swap(true, Ordering::AcqRel) {
        return;
    }

    let weak = Arc::downgrade(inner);
    tokio::spawn(async move {
        loop {
            reconnect_loop(weak.clone()).await;

            let Some(inner) = weak.upgrade() else { return };
            inner.reconnecting.store(false, Ordering::Release);

            // A failure may have slipped in between the handshake and the flag reset.
            if inner.state.is_ready() || inner.reconnecting.swap(true, Ordering::AcqRel) {
                return;
            }
        }
    });
}

/// Retries the handshake until it succeeds or the client is dropped.
///
/// Discovery failures and transport failures back off independently.
async fn reconnect_loop(weak: Weak<Inner>) {
    let mut transport_attempt = 0u32;
    let mut discovery_attempt = 0u32;

    loop {
        let Some(inner) = weak.upgrade() else { return };

        inner.state.set(ConnectionState::Connecting);
        let error = match inner.establish().await {
            Ok(conn) => {
                *inner.conn.lock().await = Some(conn);
                inner.state.set(ConnectionState::Ready);
                info!(topology = %inner.settings.topology, "✓ Connected to Redis");
                return;
            }
            Err(e) => e,
        };

        inner.state.set(ConnectionState::Degraded);
        let delay = match error {
            CacheError::DiscoveryError(_) => {
                discovery_attempt = discovery_attempt.saturating_add(1);
                inner.settings.discovery_backoff.delay(discovery_attempt)
            }
            _ => {
                transport_attempt = transport_attempt.saturating_add(1);
                inner.settings.transport_backoff.delay(transport_attempt)
            }
        };
        warn!(
            error = %error,
            retry_in_ms = delay.as_millis() as u64,
            "Redis connection attempt failed"
        );

        drop(inner);
        tokio::time::sleep(delay).await;
    }
}

/// Pings the backend periodically so a dropped connection is noticed without traffic.
async fn liveness_loop(weak: Weak<Inner>) {
    let mut ticker = tokio::time::interval(LIVENESS_INTERVAL);
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let Some(inner) = weak.upgrade() else { return };
        if !inner.state.is_ready() {
            continue;
        }

        let Some(mut conn) = inner.conn.lock().await.clone() else {
            continue;
        };
        match timeout(inner.settings.command_timeout, conn.ping::<()>()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => inner.on_transport_error("PING", &e.to_string()),
            Err(_) => inner.on_transport_error("PING", "timed out"),
        }
    }
}
