//! Collaborator interfaces consumed by the application services.
//!
//! Implementations live in [`crate::infrastructure`]; mock implementations are
//! generated via `mockall` for unit tests.
//!
//! - [`LanguageDetector`] - statistical language identifier
//! - [`RedirectProbe`] - single-hop HTTP probe with redirects disabled
//! - [`ContentExtractor`] - URL / phone / public-IP extraction

pub mod extractor;
pub mod language_detector;
pub mod redirect_probe;

pub use extractor::{ContentExtractor, ExtractedSignals};
pub use language_detector::{DetectionError, LanguageDetector};
pub use redirect_probe::{ProbeError, ProbeMethod, ProbeResponse, RedirectProbe};

#[cfg(test)]
pub use extractor::MockContentExtractor;
#[cfg(test)]
pub use language_detector::MockLanguageDetector;
#[cfg(test)]
pub use redirect_probe::MockRedirectProbe;
