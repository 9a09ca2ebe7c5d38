//! Port for the pattern-based signal extractors.

/// Raw extraction output for one message.
///
/// Every list is deduplicated, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSignals {
    pub urls: Vec<String>,
    pub phones: Vec<String>,
    pub public_ips: Vec<String>,
}

/// Extracts URLs, E.164 phone numbers and public IP addresses from text.
///
/// Malformed items are skipped individually; extraction never fails as a whole.
#[cfg_attr(test, mockall::automock)]
pub trait ContentExtractor: Send + Sync {
    fn extract(&self, content: &str) -> ExtractedSignals;
}
