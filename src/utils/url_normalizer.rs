//! URL helpers shared by the shortener check and the redirect engine.

use url::Url;

/// Errors that can occur while interpreting a URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Prefixes `http://` to scheme-less URLs such as `www.example.com/x` or `bit.ly/x`.
///
/// URLs that already carry `http://` or `https://` (any case) are returned unchanged.
pub fn ensure_scheme(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Parses a URL (adding a scheme if missing) and checks it is HTTP(S).
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn parse_http_url(input: &str) -> Result<Url, UrlNormalizationError> {
    let url = Url::parse(&ensure_scheme(input))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(UrlNormalizationError::UnsupportedProtocol),
    }
}

/// Lowercase hostname of `input`, or `None` if it cannot be parsed.
pub fn host_of(input: &str) -> Option<String> {
    let url = parse_http_url(input).ok()?;
    url.host_str().map(|h| h.to_ascii_lowercase())
}

/// Resolves a `Location` header value against the URL that returned it.
///
/// Absolute locations are used verbatim. Root-relative (`/path`) and
/// path-relative (`next`, `../up`) forms are joined with standard URL
/// resolution, as are scheme-relative (`//host/path`) forms.
///
/// Returns `None` if the location cannot be resolved.
pub fn resolve_location(current: &str, location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    if let Ok(absolute) = Url::parse(location) {
        if absolute.has_host() {
            return Some(location.to_string());
        }
    }

    let base = Url::parse(current).ok()?;
    base.join(location).ok().map(String::from)
}
