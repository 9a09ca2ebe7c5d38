//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces defined by the domain layer and the
//! cache contract consumed by the application services.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`detection`] - Statistical language detector adapter
//! - [`extraction`] - URL, phone number and public IP extractors
//! - [`http`] - Outbound redirect probes

pub mod cache;
pub mod detection;
pub mod extraction;
pub mod http;
