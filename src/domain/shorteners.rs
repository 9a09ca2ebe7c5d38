//! Known URL-shortener domains.

use crate::utils::url_normalizer::host_of;

/// Domains known to issue short redirecting URLs.
pub const KNOWN_SHORTENERS: &[&str] = &[
    "bit.ly",
    "bitly.com",
    "bl.ink",
    "buff.ly",
    "cutt.ly",
    "goo.gl",
    "is.gd",
    "lnkd.in",
    "ow.ly",
    "rb.gy",
    "rebrand.ly",
    "s.id",
    "short.io",
    "shorturl.at",
    "t.co",
    "t.ly",
    "tiny.cc",
    "tinyurl.com",
    "trib.al",
    "v.gd",
];

/// Table of shortener domains matched by exact host or `.domain` suffix.
#[derive(Debug, Clone)]
pub struct ShortenerTable {
    domains: Vec<String>,
}

impl ShortenerTable {
    /// Builds a table from [`KNOWN_SHORTENERS`] plus `extra` domains.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domains: Vec<String> = KNOWN_SHORTENERS.iter().map(|d| d.to_string()).collect();
        for domain in extra {
            let domain = domain.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if !domain.is_empty() && !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        Self { domains }
    }

    /// Returns whether `host` is, or is a subdomain of, a known shortener.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Returns the lowercase hostname of `url` if it belongs to a shortener.
    pub fn shortener_host(&self, url: &str) -> Option<String> {
        let host = host_of(url)?;
        self.matches_host(&host).then_some(host)
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }
}

impl Default for ShortenerTable {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}
