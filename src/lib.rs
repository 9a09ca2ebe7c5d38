//! # Content Intake
//!
//! Signal extraction for short inbound messages, built with Axum and Redis.
//!
//! For each message the service reports its language with a confidence score,
//! the URLs it contains (with known link-shortener URLs replaced by their
//! final destination), E.164 phone numbers and publicly routable IP addresses.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, collaborator traits, word lists, shortener table
//! - **Application Layer** ([`application`]) - Language resolution, redirect resolution, orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Cache, detector, extractors, HTTP probes
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Cache-aside analysis results (60 s) and redirect outcomes (24 h)
//! - Redis direct or Sentinel topology with automatic reconnect
//! - Bounded redirect following: 10 hops, 2 s per probe, loop detection
//! - Every failure degrades to a partial result instead of an error
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! cargo run
//!
//! curl -s localhost:3000/api/analyze \
//!   -H 'content-type: application/json' \
//!   -d '{"content":"Hello, see bit.ly/x or call +1 650 253 0000"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod telemetry;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AnalysisService, LanguageResolver, RedirectResolver};
    pub use crate::domain::entities::{AnalysisRequest, AnalysisResult, LanguageGuess, RedirectOutcome};
    pub use crate::infrastructure::cache::CacheService;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
