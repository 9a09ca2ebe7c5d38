//! Analysis orchestration: cache lookup, detection, extraction, redirect resolution.

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;

use crate::application::services::{LanguageResolver, RedirectResolver};
use crate::domain::entities::{AnalysisRequest, AnalysisResult};
use crate::domain::ports::ContentExtractor;
use crate::domain::shorteners::ShortenerTable;
use crate::infrastructure::cache::{CacheService, get_json, set_json};
use crate::telemetry;
use crate::utils::content_hash::content_hash;
use crate::utils::dedup::dedup_in_order;

/// Analysis results are cached for a minute.
pub const DEFAULT_ANALYSIS_TTL_SECONDS: u64 = 60;

/// Cache key for an analysis of `content`.
pub fn analysis_cache_key(content: &str) -> String {
    format!("analysis:{}", content_hash(content))
}

/// Produces an [`AnalysisResult`] for a message, cache-aside.
///
/// Each call performs exactly one cache read and, on a miss, one cache
/// write. Nothing here fails: every collaborator degrades to a partial
/// result instead.
pub struct AnalysisService {
    cache: Arc<dyn CacheService>,
    language: LanguageResolver,
    extractor: Arc<dyn ContentExtractor>,
    redirects: RedirectResolver,
    shorteners: ShortenerTable,
    ttl_seconds: u64,
}

impl AnalysisService {
    pub fn new(
        cache: Arc<dyn CacheService>,
        language: LanguageResolver,
        extractor: Arc<dyn ContentExtractor>,
        redirects: RedirectResolver,
        shorteners: ShortenerTable,
    ) -> Self {
        Self {
            cache,
            language,
            extractor,
            redirects,
            shorteners,
            ttl_seconds: DEFAULT_ANALYSIS_TTL_SECONDS,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Analyzes one message.
    ///
    /// On a cache hit the stored result is returned with `cached = true` and
    /// the lookup time. On a miss the result is computed, stored and returned
    /// with `cached = false` and the total elapsed time.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let started = Instant::now();
        let key = analysis_cache_key(&request.content);

        if let Some(mut hit) = get_json::<AnalysisResult>(self.cache.as_ref(), &key).await {
            hit.cached = true;
            hit.processing_time_ms = elapsed_ms(started);
            metrics::counter!(telemetry::ANALYSIS_CACHE_HITS_TOTAL).increment(1);
            record_duration(started, true);
            tracing::debug!(
                message_id = request.message_id.as_deref().unwrap_or("-"),
                "Analysis cache hit"
            );
            return hit;
        }
        metrics::counter!(telemetry::ANALYSIS_CACHE_MISSES_TOTAL).increment(1);

        let guess = self.language.detect(&request.content);
        let signals = self.extractor.extract(&request.content);
        let (urls, shorteners_used) = self.expand_shortened(signals.urls).await;

        let mut result = AnalysisResult {
            language: guess.language,
            confidence: guess.confidence,
            cached: false,
            processing_time_ms: 0,
            urls,
            phones: dedup_in_order(signals.phones),
            public_ips: dedup_in_order(signals.public_ips),
            shorteners_used,
        };

        set_json(self.cache.as_ref(), &key, &result, self.ttl_seconds).await;

        result.processing_time_ms = elapsed_ms(started);
        record_duration(started, false);
        tracing::debug!(
            message_id = request.message_id.as_deref().unwrap_or("-"),
            language = %result.language,
            confidence = result.confidence,
            urls = result.urls.len(),
            shorteners = result.shorteners_used.len(),
            elapsed_ms = result.processing_time_ms,
            "Analysis computed"
        );
        result
    }

    /// Replaces shortener URLs with their final destinations.
    ///
    /// Redirect chains are resolved concurrently; output order follows input order.
    async fn expand_shortened(&self, urls: Vec<String>) -> (Vec<String>, Vec<String>) {
        let hosts: Vec<Option<String>> = urls
            .iter()
            .map(|url| self.shorteners.shortener_host(url))
            .collect();

        let resolutions = join_all(urls.iter().zip(&hosts).map(|(url, host)| async move {
            match host {
                Some(_) => self.redirects.resolve_redirects(url).await.final_url,
                None => url.clone(),
            }
        }))
        .await;

        (
            dedup_in_order(resolutions),
            dedup_in_order(hosts.into_iter().flatten()),
        )
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn record_duration(started: Instant, cached: bool) {
    metrics::histogram!(telemetry::ANALYSIS_DURATION_SECONDS,
        "cached" => if cached { "true" } else { "false" },
    )
    .record(started.elapsed().as_secs_f64());
}
