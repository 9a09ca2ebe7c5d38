//! Domain layer containing business entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Requests, results and redirect outcomes
//! - [`ports`] - Traits for the language detector, redirect probe and extractors
//! - [`lexicon`] - Common-word dictionaries for the lexical language fallback
//! - [`shorteners`] - Known URL-shortener domains
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Port traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod lexicon;
pub mod ports;
pub mod shorteners;
