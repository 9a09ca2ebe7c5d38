//! Redirect resolution outcome.

use serde::{Deserialize, Serialize};

/// Upper bound on followed redirect hops.
pub const MAX_REDIRECTS: u32 = 10;

/// Where a URL ends up after following its redirect chain.
///
/// `redirect_count` never exceeds [`MAX_REDIRECTS`]. When the bound is hit,
/// `final_url` is the last URL reached, which may itself still redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectOutcome {
    pub final_url: String,
    pub redirect_count: u32,
}

impl RedirectOutcome {
    /// The outcome for a URL that was not (or could not be) followed.
    pub fn unresolved(url: impl Into<String>) -> Self {
        Self {
            final_url: url.into(),
            redirect_count: 0,
        }
    }
}
