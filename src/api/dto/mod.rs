//! Request and response bodies for the HTTP API.

pub mod analyze;
pub mod health;
