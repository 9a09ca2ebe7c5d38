//! Application layer services.
//!
//! Services consume the collaborator traits from [`crate::domain::ports`] and
//! the [`crate::infrastructure::cache::CacheService`] and expose total
//! operations to the HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::language_resolver::LanguageResolver`] - Language guess with lexical fallback
//! - [`services::redirect_resolver::RedirectResolver`] - Cache-aside redirect chain resolution
//! - [`services::analysis_service::AnalysisService`] - End-to-end message analysis

pub mod services;
