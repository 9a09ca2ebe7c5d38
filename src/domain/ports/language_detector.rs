//! Port for the statistical language identifier.

/// Errors raised by a [`LanguageDetector`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Language detector failed: {0}")]
    Detector(String),
}

/// Statistical language identifier.
///
/// Returns candidates best-first as `(iso_639_3_code, score)` where `score`
/// is normalized to `[0, 1]` and higher is better. Candidates may include
/// languages the service does not report; an empty list means the input is
/// undetectable.
///
/// # Implementations
///
/// - [`crate::infrastructure::detection::LinguaDetector`] - `lingua` backed
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LanguageDetector: Send + Sync {
    fn candidates(&self, text: &str) -> Result<Vec<(String, f64)>, DetectionError>;
}
