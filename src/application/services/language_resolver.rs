//! Language resolution with a lexical fallback for low-confidence detections.

use std::sync::Arc;

use crate::domain::entities::{LanguageGuess, is_supported};
use crate::domain::lexicon::{match_ratio, tokenize};
use crate::domain::ports::LanguageDetector;
use crate::telemetry;

/// Detections below this confidence are cross-checked against the dictionaries.
pub const OVERRIDE_CONFIDENCE_THRESHOLD: u8 = 15;

/// A dictionary match ratio must exceed this to override the detector.
pub const OVERRIDE_MATCH_RATIO: f64 = 0.30;

/// Turns raw detector candidates into a single [`LanguageGuess`].
///
/// Never fails: detector errors and undetectable input both yield
/// [`LanguageGuess::unknown`].
pub struct LanguageResolver {
    detector: Arc<dyn LanguageDetector>,
}

impl LanguageResolver {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        Self { detector }
    }

    /// Detects the language of `content`.
    ///
    /// # Algorithm
    ///
    /// 1. Empty content is `{unknown, 0}`
    /// 2. Detector candidates are filtered to the supported set, order kept
    /// 3. The first remaining candidate wins with `round(score * 100)`
    /// 4. Below [`OVERRIDE_CONFIDENCE_THRESHOLD`], the candidate whose
    ///    dictionary matches more than [`OVERRIDE_MATCH_RATIO`] of the tokens
    ///    replaces it, keeping its own rescaled score. Ties go to the earlier
    ///    candidate.
    pub fn detect(&self, content: &str) -> LanguageGuess {
        if content.trim().is_empty() {
            return LanguageGuess::unknown();
        }

        let candidates: Vec<(String, u8)> = match self.detector.candidates(content) {
            Ok(raw) => raw
                .into_iter()
                .filter(|(code, _)| is_supported(code))
                .map(|(code, score)| (code, rescale(score)))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Language detector failed");
                return LanguageGuess::unknown();
            }
        };

        let Some((top_language, top_confidence)) = candidates.first().cloned() else {
            return LanguageGuess::unknown();
        };

        if top_confidence >= OVERRIDE_CONFIDENCE_THRESHOLD {
            return LanguageGuess::new(top_language, top_confidence);
        }

        match lexical_choice(content, &candidates) {
            Some((language, confidence)) if *language != top_language => {
                tracing::debug!(
                    detected = %top_language,
                    detected_confidence = top_confidence,
                    chosen = %language,
                    "Low-confidence detection overridden by dictionary match"
                );
                metrics::counter!(telemetry::LANGUAGE_OVERRIDES_TOTAL).increment(1);
                LanguageGuess::new(language.clone(), *confidence)
            }
            _ => LanguageGuess::new(top_language, top_confidence),
        }
    }
}

/// `round(score * 100)` clamped to `0..=100`. Non-finite scores become 0.
fn rescale(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Candidate with the highest dictionary match ratio above the threshold.
fn lexical_choice<'a>(content: &str, candidates: &'a [(String, u8)]) -> Option<&'a (String, u8)> {
    let tokens = tokenize(content);
    if tokens.is_empty() {
        return None;
    }

    let mut best: Option<(&(String, u8), f64)> = None;
    for candidate in candidates {
        let ratio = match_ratio(&tokens, &candidate.0);
        if ratio <= OVERRIDE_MATCH_RATIO {
            continue;
        }
        if best.is_none_or(|(_, best_ratio)| ratio > best_ratio) {
            best = Some((candidate, ratio));
        }
    }

    best.map(|(candidate, _)| candidate)
}
