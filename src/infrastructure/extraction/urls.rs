//! URL extraction.

use crate::utils::dedup::dedup_in_order;
use linkify::{LinkFinder, LinkKind};
use std::net::IpAddr;

/// Finds URLs with a scheme, `www.`-prefixed hosts and bare domains.
///
/// Parts of e-mail addresses are never reported: a match directly preceded
/// or followed by `@` is skipped. Bare IP literals without a scheme are left
/// to the IP extractor.
pub fn extract_urls(content: &str) -> Vec<String> {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]).url_must_have_scheme(false);

    let urls = finder.links(content).filter_map(|link| {
        let touches_at = content[..link.start()].ends_with('@')
            || content[link.end()..].starts_with('@');
        let text = link.as_str();
        (!touches_at && !is_bare_ip(text)).then(|| text.to_string())
    });

    dedup_in_order(urls)
}

fn is_bare_ip(text: &str) -> bool {
    if text.contains("://") {
        return false;
    }
    let host = text.split(['/', '?', '#']).next().unwrap_or(text);
    let host = host.rsplit_once(':').map_or(host, |(h, _)| h);
    host.parse::<IpAddr>().is_ok()
}
