//! Telemetry metric name constants.
//!
//! The service emits metrics through the `metrics` facade. Operators install
//! their own recorder (prometheus, statsd); without one every call is a no-op.
//!
//! # Naming
//!
//! All metrics are prefixed with `intake_`. Counters end in `_total`,
//! histograms carry their unit (`_seconds`).

/// Analysis cache hits.
pub const ANALYSIS_CACHE_HITS_TOTAL: &str = "intake_analysis_cache_hits_total";

/// Analysis cache misses, including reads skipped because the cache is not ready.
pub const ANALYSIS_CACHE_MISSES_TOTAL: &str = "intake_analysis_cache_misses_total";

/// End-to-end analysis duration in seconds.
///
/// Labels: `cached` ("true" | "false").
pub const ANALYSIS_DURATION_SECONDS: &str = "intake_analysis_duration_seconds";

/// Redirect cache hits.
pub const REDIRECT_CACHE_HITS_TOTAL: &str = "intake_redirect_cache_hits_total";

/// Probes issued by the redirect resolver.
///
/// Labels: `method` ("head" | "ranged_get"), `outcome` ("ok" | "error").
pub const REDIRECT_PROBES_TOTAL: &str = "intake_redirect_probes_total";

/// Low-confidence detections replaced by the lexical fallback.
pub const LANGUAGE_OVERRIDES_TOTAL: &str = "intake_language_overrides_total";
