//! Analysis request and result entities.

use serde::{Deserialize, Serialize};

/// One inbound message to analyze.
///
/// The correlation identifiers are opaque to the core and only travel along
/// for logging and response echoing. `content` is the only field that takes
/// part in the cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub parent_id: Option<String>,
    pub customer_id: Option<String>,
    pub sender_id: Option<String>,
    pub message_id: Option<String>,
    pub content: String,
}

impl AnalysisRequest {
    /// Creates a request carrying only content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

/// Structured signal report for one message.
///
/// This is also the value stored in the analysis cache. On a cache hit the
/// stored value is returned verbatim except for `cached` and
/// `processing_time_ms`, which the orchestrator always overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub language: String,
    pub confidence: u8,
    pub cached: bool,
    pub processing_time_ms: u64,
    pub urls: Vec<String>,
    pub phones: Vec<String>,
    pub public_ips: Vec<String>,
    pub shorteners_used: Vec<String>,
}

impl AnalysisResult {
    /// Returns `true` if the semantic fields match, ignoring `cached` and timing.
    pub fn same_signals(&self, other: &Self) -> bool {
        self.language == other.language
            && self.confidence == other.confidence
            && self.urls == other.urls
            && self.phones == other.phones
            && self.public_ips == other.public_ips
            && self.shorteners_used == other.shorteners_used
    }
}
