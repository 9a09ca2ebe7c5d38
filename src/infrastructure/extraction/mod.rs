//! Pattern-based extraction of URLs, phone numbers and public IP addresses.

pub mod ips;
pub mod phones;
pub mod urls;

use crate::domain::ports::{ContentExtractor, ExtractedSignals};
use phonenumber::country;

pub use ips::extract_public_ips;
pub use phones::extract_phones;
pub use urls::extract_urls;

/// [`ContentExtractor`] running all three extractors.
#[derive(Debug, Clone, Copy)]
pub struct SignalExtractor {
    default_region: country::Id,
}

impl SignalExtractor {
    /// `default_region` applies to phone numbers written without a country prefix.
    pub fn new(default_region: country::Id) -> Self {
        Self { default_region }
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new(country::Id::US)
    }
}

impl ContentExtractor for SignalExtractor {
    fn extract(&self, content: &str) -> ExtractedSignals {
        ExtractedSignals {
            urls: extract_urls(content),
            phones: extract_phones(content, self.default_region),
            public_ips: extract_public_ips(content),
        }
    }
}
