//! HTTP redirect probe backed by `reqwest`.

use crate::domain::ports::{ProbeError, ProbeMethod, ProbeResponse, RedirectProbe};
use async_trait::async_trait;
use reqwest::header::{LOCATION, RANGE};
use reqwest::{Client, redirect};
use std::time::Duration;

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Default identifying client string sent with every probe.
pub const DEFAULT_USER_AGENT: &str =
    concat!("content-intake/", env!("CARGO_PKG_VERSION"), " (+redirect-probe)");

/// Probes one URL per call with redirects disabled at the transport level.
///
/// Statuses outside `200..=399` are reported as [`ProbeError::Status`], so
/// a `405` to `HEAD` makes the caller fall back to a ranged `GET`.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: Client,
    timeout: Duration,
}

impl ReqwestProbe {
    /// Builds a probe client with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProbeError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> ProbeError {
        if e.is_timeout() {
            ProbeError::Timeout(self.timeout.as_millis() as u64)
        } else if e.is_builder() {
            ProbeError::InvalidUrl(e.to_string())
        } else {
            ProbeError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl RedirectProbe for ReqwestProbe {
    async fn probe(&self, url: &str, method: ProbeMethod) -> Result<ProbeResponse, ProbeError> {
        let target = reqwest::Url::parse(url).map_err(|e| ProbeError::InvalidUrl(e.to_string()))?;

        let request = match method {
            ProbeMethod::Head => self.client.head(target),
            ProbeMethod::RangedGet => self.client.get(target).header(RANGE, "bytes=0-0"),
        };

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        if !(200..400).contains(&status) {
            return Err(ProbeError::Status(status));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(ProbeResponse { status, location })
    }
}
