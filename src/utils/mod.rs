//! Utility functions shared across layers.
//!
//! - [`url_normalizer`] - Scheme handling, host extraction and `Location` resolution
//! - [`content_hash`] - Cache keys derived from message content
//! - [`dedup`] - Order-preserving deduplication of output lists

pub mod content_hash;
pub mod dedup;
pub mod url_normalizer;
