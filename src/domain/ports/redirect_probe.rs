//! Port for single-hop redirect probes.

use async_trait::async_trait;
use std::fmt;

/// Which request shape a probe uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    /// `HEAD`, no body.
    Head,
    /// `GET` limited to the first byte via a `Range` header.
    RangedGet,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::RangedGet => "ranged_get",
        }
    }
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub location: Option<String>,
}

impl ProbeResponse {
    /// A `3xx` response carrying a `Location` header.
    pub fn redirect_target(&self) -> Option<&str> {
        if (300..400).contains(&self.status) {
            self.location.as_deref()
        } else {
            None
        }
    }
}

/// Errors from a single probe.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Probe transport error: {0}")]
    Transport(String),

    #[error("Probe timed out after {0} ms")]
    Timeout(u64),

    #[error("Unexpected probe status {0}")]
    Status(u16),

    #[error("Invalid probe target: {0}")]
    InvalidUrl(String),
}

/// Issues one request to a URL without following redirects.
///
/// Implementations must disable automatic redirect following, bound each
/// probe by a timeout and treat statuses outside `200..=399` as
/// [`ProbeError::Status`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectProbe: Send + Sync {
    async fn probe(&self, url: &str, method: ProbeMethod) -> Result<ProbeResponse, ProbeError>;
}
