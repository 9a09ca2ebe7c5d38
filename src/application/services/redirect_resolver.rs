//! Cache-aside redirect chain resolution.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{MAX_REDIRECTS, RedirectOutcome};
use crate::domain::ports::{ProbeError, ProbeMethod, ProbeResponse, RedirectProbe};
use crate::infrastructure::cache::{CacheService, get_json, set_json};
use crate::telemetry;
use crate::utils::content_hash::content_hash;
use crate::utils::url_normalizer::{ensure_scheme, resolve_location};

/// Redirect outcomes stay cached for a day.
pub const DEFAULT_REDIRECT_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Cache key for the outcome of `url`.
pub fn redirect_cache_key(url: &str) -> String {
    format!("redirect:{}", content_hash(url))
}

/// Follows HTTP redirects hop by hop, up to a fixed bound.
///
/// Resolution never fails. Transport problems, loops and the hop bound all
/// end the walk and return the last URL reached. Every computed outcome is
/// written back to the cache, including degraded ones.
pub struct RedirectResolver {
    probe: Arc<dyn RedirectProbe>,
    cache: Arc<dyn CacheService>,
    max_hops: u32,
    ttl_seconds: u64,
}

impl RedirectResolver {
    /// Creates a resolver following up to [`MAX_REDIRECTS`] hops.
    pub fn new(probe: Arc<dyn RedirectProbe>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            probe,
            cache,
            max_hops: MAX_REDIRECTS,
            ttl_seconds: DEFAULT_REDIRECT_TTL_SECONDS,
        }
    }

    /// Lowers the hop bound. Values above [`MAX_REDIRECTS`] are capped.
    pub fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.max_hops = max_hops.min(MAX_REDIRECTS);
        self
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Resolves `url` to its final destination.
    ///
    /// A cached outcome is returned without any network I/O. Otherwise the
    /// chain is walked and the outcome stored under [`redirect_cache_key`].
    pub async fn resolve_redirects(&self, url: &str) -> RedirectOutcome {
        let key = redirect_cache_key(url);

        if let Some(outcome) = get_json::<RedirectOutcome>(self.cache.as_ref(), &key).await {
            metrics::counter!(telemetry::REDIRECT_CACHE_HITS_TOTAL).increment(1);
            tracing::debug!(url = %url, final_url = %outcome.final_url, "Redirect cache hit");
            return outcome;
        }

        let outcome = self.walk(url).await;
        set_json(self.cache.as_ref(), &key, &outcome, self.ttl_seconds).await;
        outcome
    }

    async fn walk(&self, url: &str) -> RedirectOutcome {
        let mut current = ensure_scheme(url);
        let mut count = 0;
        let mut visited = HashSet::new();

        while count < self.max_hops {
            if !visited.insert(current.clone()) {
                tracing::info!(url = %url, at = %current, hops = count, "Redirect loop detected");
                break;
            }

            let Some(response) = self.probe_with_fallback(&current).await else {
                break;
            };

            let Some(location) = response.redirect_target() else {
                break;
            };

            let Some(next) = resolve_location(&current, location) else {
                tracing::warn!(at = %current, location = %location, "Unresolvable Location header");
                break;
            };

            tracing::debug!(from = %current, to = %next, status = response.status, "Following redirect");
            current = next;
            count += 1;
        }

        if count == self.max_hops {
            tracing::info!(url = %url, final_url = %current, "Redirect hop limit reached");
        }

        if count == 0 {
            RedirectOutcome::unresolved(url)
        } else {
            RedirectOutcome {
                final_url: current,
                redirect_count: count,
            }
        }
    }

    /// HEAD first, then a one-byte ranged GET. `None` if both fail.
    async fn probe_with_fallback(&self, url: &str) -> Option<ProbeResponse> {
        match self.probe_once(url, ProbeMethod::Head).await {
            Ok(response) => return Some(response),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "HEAD probe failed, retrying with ranged GET");
            }
        }

        match self.probe_once(url, ProbeMethod::RangedGet).await {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Redirect probe failed");
                None
            }
        }
    }

    async fn probe_once(&self, url: &str, method: ProbeMethod) -> Result<ProbeResponse, ProbeError> {
        let result = self.probe.probe(url, method).await;
        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::REDIRECT_PROBES_TOTAL,
            "method" => method.as_str(),
            "outcome" => outcome,
        )
        .increment(1);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRedirectProbe;
    use crate::infrastructure::cache::{MockCacheService, NullCache};
    use mockall::predicate::{always, eq};

    fn redirect_to(location: &str) -> ProbeResponse {
        ProbeResponse {
            status: 301,
            location: Some(location.to_string()),
        }
    }

    fn ok() -> ProbeResponse {
        ProbeResponse {
            status: 200,
            location: None,
        }
    }

    fn resolver(probe: MockRedirectProbe) -> RedirectResolver {
        RedirectResolver::new(Arc::new(probe), Arc::new(NullCache::new()))
    }

    #[tokio::test]
    async fn test_single_hop_shortener() {
        let mut probe = MockRedirectProbe::new();
        probe
            .expect_probe()
            .with(eq("http://bit.ly/x"), eq(ProbeMethod::Head))
            .times(1)
            .returning(|_, _| Ok(redirect_to("https://example.com/landing")));
        probe
            .expect_probe()
            .with(eq("https://example.com/landing"), eq(ProbeMethod::Head))
            .times(1)
            .returning(|_, _| Ok(ok()));

        let outcome = resolver(probe).resolve_redirects("http://bit.ly/x").await;

        assert_eq!(outcome.final_url, "https://example.com/landing");
        assert_eq!(outcome.redirect_count, 1);
    }

    #[tokio::test]
    async fn test_endless_chain_stops_at_bound() {
        let mut probe = MockRedirectProbe::new();
        probe.expect_probe().returning(|url, _| {
            let n: u32 = url.rsplit('/').next().and_then(|s| s.parse().ok()).unwrap_or(0);
            Ok(redirect_to(&format!("http://loop.example/{}", n + 1)))
        });

        let outcome = resolver(probe)
            .resolve_redirects("http://loop.example/0")
            .await;

        assert_eq!(outcome.redirect_count, MAX_REDIRECTS);
        assert_eq!(outcome.final_url, "http://loop.example/10");
    }

    #[tokio::test]
    async fn test_two_node_cycle_detected() {
        let mut probe = MockRedirectProbe::new();
        probe.expect_probe().returning(|url, _| {
            if url == "http://a.example/" {
                Ok(redirect_to("http://b.example/"))
            } else {
                Ok(redirect_to("http://a.example/"))
            }
        });

        let outcome = resolver(probe).resolve_redirects("http://a.example/").await;

        assert!(outcome.redirect_count < MAX_REDIRECTS);
        assert_eq!(outcome.redirect_count, 2);
        assert_eq!(outcome.final_url, "http://a.example/");
    }

    #[tokio::test]
    async fn test_head_failure_falls_back_to_ranged_get() {
        let mut probe = MockRedirectProbe::new();
        probe
            .expect_probe()
            .with(eq("http://bit.ly/x"), eq(ProbeMethod::Head))
            .returning(|_, _| Err(ProbeError::Status(405)));
        probe
            .expect_probe()
            .with(eq("http://bit.ly/x"), eq(ProbeMethod::RangedGet))
            .times(1)
            .returning(|_, _| Ok(redirect_to("/landing")));
        probe
            .expect_probe()
            .with(eq("http://bit.ly/landing"), always())
            .returning(|_, _| Ok(ok()));

        let outcome = resolver(probe).resolve_redirects("http://bit.ly/x").await;

        assert_eq!(outcome.final_url, "http://bit.ly/landing");
        assert_eq!(outcome.redirect_count, 1);
    }

    #[tokio::test]
    async fn test_total_failure_returns_original() {
        let mut probe = MockRedirectProbe::new();
        probe
            .expect_probe()
            .times(2)
            .returning(|_, _| Err(ProbeError::Transport("connection refused".into())));

        let outcome = resolver(probe).resolve_redirects("bit.ly/x").await;

        assert_eq!(outcome, RedirectOutcome::unresolved("bit.ly/x"));
    }

    #[tokio::test]
    async fn test_redirect_without_location_returns_original() {
        let mut probe = MockRedirectProbe::new();
        probe
            .expect_probe()
            .with(eq("http://bit.ly/x"), eq(ProbeMethod::Head))
            .times(1)
            .returning(|_, _| {
                Ok(ProbeResponse {
                    status: 302,
                    location: None,
                })
            });

        let outcome = resolver(probe).resolve_redirects("http://bit.ly/x").await;

        assert_eq!(outcome, RedirectOutcome::unresolved("http://bit.ly/x"));
    }

    #[tokio::test]
    async fn test_redirect_without_location_mid_chain_stops_there() {
        let mut probe = MockRedirectProbe::new();
        probe
            .expect_probe()
            .with(eq("http://bit.ly/x"), always())
            .returning(|_, _| Ok(redirect_to("https://hop.example/")));
        probe
            .expect_probe()
            .with(eq("https://hop.example/"), always())
            .returning(|_, _| {
                Ok(ProbeResponse {
                    status: 307,
                    location: None,
                })
            });

        let outcome = resolver(probe).resolve_redirects("http://bit.ly/x").await;

        assert_eq!(outcome.final_url, "https://hop.example/");
        assert_eq!(outcome.redirect_count, 1);
    }

    #[tokio::test]
    async fn test_scheme_less_url_probed_over_http() {
        let mut probe = MockRedirectProbe::new();
        probe
            .expect_probe()
            .with(eq("http://bit.ly/x"), eq(ProbeMethod::Head))
            .returning(|_, _| Ok(redirect_to("https://dest.example/")));
        probe
            .expect_probe()
            .with(eq("https://dest.example/"), always())
            .returning(|_, _| Ok(ok()));

        let outcome = resolver(probe).resolve_redirects("bit.ly/x").await;

        assert_eq!(outcome.final_url, "https://dest.example/");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_probing() {
        let mut probe = MockRedirectProbe::new();
        probe.expect_probe().never();

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .with(eq(redirect_cache_key("http://bit.ly/x")))
            .returning(|_| Some(r#"{"final_url":"https://cached.example/","redirect_count":3}"#.into()));
        cache.expect_set().never();

        let resolver = RedirectResolver::new(Arc::new(probe), Arc::new(cache));
        let outcome = resolver.resolve_redirects("http://bit.ly/x").await;

        assert_eq!(outcome.final_url, "https://cached.example/");
        assert_eq!(outcome.redirect_count, 3);
    }

    #[tokio::test]
    async fn test_degraded_outcome_is_written_back() {
        let mut probe = MockRedirectProbe::new();
        probe
            .expect_probe()
            .returning(|_, _| Err(ProbeError::Timeout(2000)));

        let key = redirect_cache_key("http://down.example/");
        let mut cache = MockCacheService::new();
        cache.expect_get().returning(|_| None);
        cache
            .expect_set()
            .withf(move |k, v, ttl| {
                k == key && v.contains("\"redirect_count\":0") && *ttl == DEFAULT_REDIRECT_TTL_SECONDS
            })
            .times(1)
            .returning(|_, _, _| ());

        let resolver = RedirectResolver::new(Arc::new(probe), Arc::new(cache));
        let outcome = resolver.resolve_redirects("http://down.example/").await;

        assert_eq!(outcome.redirect_count, 0);
    }

    #[tokio::test]
    async fn test_lower_hop_bound() {
        let mut probe = MockRedirectProbe::new();
        probe.expect_probe().returning(|url, _| {
            Ok(redirect_to(&format!("{url}x")))
        });

        let outcome = resolver(probe)
            .with_max_hops(3)
            .resolve_redirects("http://chain.example/")
            .await;

        assert_eq!(outcome.redirect_count, 3);
        assert_eq!(outcome.final_url, "http://chain.example/xxx");
    }
}
