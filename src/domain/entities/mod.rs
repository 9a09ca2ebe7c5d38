//! Core business entities.

mod analysis;
mod language;
mod redirect;

pub use analysis::{AnalysisRequest, AnalysisResult};
pub use language::{LanguageGuess, SUPPORTED_LANGUAGES, UNKNOWN_LANGUAGE, is_supported};
pub use redirect::{MAX_REDIRECTS, RedirectOutcome};
