//! Language guess entity and the supported-language set.

use serde::{Deserialize, Serialize};

/// Sentinel language code for "could not tell".
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// ISO 639-3 codes of the languages the resolver may report.
pub const SUPPORTED_LANGUAGES: [&str; 8] =
    ["eng", "spa", "fra", "deu", "ita", "por", "nld", "dan"];

/// Returns whether `code` is in [`SUPPORTED_LANGUAGES`].
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

/// Detected language with an integer confidence in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageGuess {
    pub language: String,
    pub confidence: u8,
}

impl LanguageGuess {
    pub fn new(language: impl Into<String>, confidence: u8) -> Self {
        Self {
            language: language.into(),
            confidence: confidence.min(100),
        }
    }

    /// `{unknown, 0}`.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LANGUAGE, 0)
    }

    pub fn is_unknown(&self) -> bool {
        self.language == UNKNOWN_LANGUAGE
    }
}
