//! Statistical language identification backed by `lingua`.

use crate::domain::ports::{DetectionError, LanguageDetector};
use lingua::{Language, LanguageDetectorBuilder};

/// ISO 639-3 code for any `lingua` language.
fn iso_code(language: Language) -> String {
    language.iso_code_639_3().to_string()
}

/// [`LanguageDetector`] over every language `lingua` ships a model for.
///
/// Candidates are ranked across the full model set; narrowing to the
/// languages the service reports is left to the caller. Confidence values
/// are normalized to `[0, 1]` with higher meaning more likely. Models load
/// lazily on first use, so construct the detector once and share it.
pub struct LinguaDetector {
    detector: lingua::LanguageDetector,
}

impl LinguaDetector {
    pub fn new() -> Self {
        let detector = LanguageDetectorBuilder::from_all_languages().build();
        Self { detector }
    }
}

impl Default for LinguaDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for LinguaDetector {
    fn candidates(&self, text: &str) -> Result<Vec<(String, f64)>, DetectionError> {
        let values = self.detector.compute_language_confidence_values(text);

        Ok(values
            .into_iter()
            .filter(|(_, score)| score.is_finite() && *score > 0.0)
            .map(|(language, score)| (iso_code(language), score.min(1.0)))
            .collect())
    }
}
