//! Outbound HTTP integrations.

pub mod probe;

pub use probe::{DEFAULT_PROBE_TIMEOUT, DEFAULT_USER_AGENT, ReqwestProbe};
