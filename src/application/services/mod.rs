//! Services composing the domain ports into the analysis pipeline.

pub mod analysis_service;
pub mod language_resolver;
pub mod redirect_resolver;

pub use analysis_service::AnalysisService;
pub use language_resolver::LanguageResolver;
pub use redirect_resolver::RedirectResolver;
