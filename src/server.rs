//! HTTP server initialization and runtime setup.
//!
//! Handles cache setup, collaborator wiring and the Axum server lifecycle.

use crate::application::services::{AnalysisService, LanguageResolver, RedirectResolver};
use crate::config::Config;
use crate::domain::shorteners::ShortenerTable;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::detection::LinguaDetector;
use crate::infrastructure::extraction::SignalExtractor;
use crate::infrastructure::http::ReqwestProbe;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Starts the configured cache client, or [`NullCache`] when caching is disabled.
///
/// Never blocks on the network beyond `wait`: a Redis client that is not
/// ready by then keeps connecting in the background while lookups miss.
pub async fn build_cache(config: &Config, wait: Duration) -> Arc<dyn CacheService> {
    let Some(settings) = config.redis_settings() else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    let redis = RedisCache::start(settings);
    if redis.wait_ready(wait).await {
        tracing::info!("Cache enabled (Redis)");
    } else {
        tracing::warn!(
            state = %redis.state(),
            "Redis not ready yet, continuing without cache until it connects"
        );
    }
    Arc::new(redis)
}

/// Wires the analysis pipeline from configuration.
///
/// # Errors
///
/// Returns an error if the phone region is invalid or the HTTP client
/// cannot be built.
pub fn build_analysis_service(
    config: &Config,
    cache: Arc<dyn CacheService>,
) -> Result<AnalysisService> {
    let region = config.phone_region()?;
    let probe = ReqwestProbe::new(config.redirect_timeout(), &config.probe_user_agent)
        .context("Failed to build redirect probe")?;

    let redirects = RedirectResolver::new(Arc::new(probe), cache.clone())
        .with_max_hops(config.redirect_max_hops)
        .with_ttl(config.redirect_cache_ttl_seconds);

    let language = LanguageResolver::new(Arc::new(LinguaDetector::new()));

    Ok(AnalysisService::new(
        cache,
        language,
        Arc::new(SignalExtractor::new(region)),
        redirects,
        ShortenerTable::new(&config.extra_shorteners),
    )
    .with_ttl(config.analysis_cache_ttl_seconds))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis cache (or NullCache fallback)
/// - Language detector, extractors and redirect probe
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let cache = build_cache(&config, Duration::from_millis(config.cache_connect_timeout_ms)).await;

    let analysis_service = build_analysis_service(&config, cache.clone())?;
    tracing::info!("Analysis pipeline ready");

    let state = AppState::new(
        Arc::new(analysis_service),
        cache,
        config.max_content_length,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
