//! Public IP address extraction.

use crate::utils::dedup::dedup_in_order;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

static IPV4_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap());

static IPV6_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9a-f:]*:[0-9a-f:]*:[0-9a-f:]*").unwrap());

/// Returns publicly routable IPv4 and IPv6 addresses found in `content`.
///
/// Unparseable literals are skipped. Output uses the canonical textual form.
pub fn extract_public_ips(content: &str) -> Vec<String> {
    let v4 = IPV4_CANDIDATE
        .find_iter(content)
        .filter_map(|m| m.as_str().parse::<Ipv4Addr>().ok())
        .map(IpAddr::V4);

    let v6 = IPV6_CANDIDATE
        .find_iter(content)
        .filter(|m| stands_alone(content, m.start(), m.end()))
        .filter_map(|m| trim_ipv6_candidate(m.as_str()).parse::<Ipv6Addr>().ok())
        .map(IpAddr::V6);

    dedup_in_order(v4.chain(v6).filter(is_public).map(|ip| ip.to_string()))
}

/// No letter or digit touches either end of `content[start..end]`.
fn stands_alone(content: &str, start: usize, end: usize) -> bool {
    let before = content[..start].chars().next_back();
    let after = content[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Drops a stray single colon glued to either end of a candidate.
fn trim_ipv6_candidate(raw: &str) -> &str {
    let mut s = raw;
    if s.starts_with(':') && !s.starts_with("::") {
        s = &s[1..];
    }
    if s.ends_with(':') && !s.ends_with("::") {
        s = &s[..s.len() - 1];
    }
    s
}

pub fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => is_public_v6(v6),
    }
}

/// Excludes private, loopback, link-local, carrier-grade NAT and reserved ranges.
fn is_public_v4(ip: &Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();

    let special = ip.is_unspecified()
        || ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        || a == 0
        || (a == 100 && (b & 0xc0) == 64)
        || (a == 192 && b == 0 && c == 0)
        || (a == 192 && b == 88 && c == 99)
        || (a == 198 && (b & 0xfe) == 18)
        || a >= 240;

    !special
}

/// Excludes loopback, link-local, unique-local, multicast and reserved ranges.
fn is_public_v6(ip: &Ipv6Addr) -> bool {
    let s = ip.segments();

    let special = ip.is_unspecified()
        || ip.is_loopback()
        || ip.is_multicast()
        || (s[0] & 0xfe00) == 0xfc00
        || (s[0] & 0xffc0) == 0xfe80
        || (s[0] & 0xffc0) == 0xfec0
        || (s[0] == 0x2001 && s[1] == 0x0db8)
        || (s[0] & 0xff00) == 0;

    !special
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_ipv4_kept() {
        assert_eq!(
            extract_public_ips("dns 8.8.8.8 and 1.1.1.1, again 8.8.8.8"),
            vec!["8.8.8.8", "1.1.1.1"]
        );
    }

    #[test]
    fn test_special_ipv4_ranges_excluded() {
        let text = "10.0.0.1 172.16.5.4 192.168.1.1 127.0.0.1 169.254.1.1 \
                    100.64.0.1 0.1.2.3 240.0.0.1 255.255.255.255 224.0.0.1 \
                    192.0.2.1 198.51.100.1 203.0.113.9 198.18.0.1 192.88.99.1";
        assert!(extract_public_ips(text).is_empty());
    }

    #[test]
    fn test_invalid_ipv4_literal_skipped() {
        assert_eq!(extract_public_ips("999.1.1.1 and 9.9.9.9"), vec!["9.9.9.9"]);
    }

    #[test]
    fn test_public_ipv6_kept() {
        assert_eq!(
            extract_public_ips("resolver 2001:4860:4860::8888: up"),
            vec!["2001:4860:4860::8888"]
        );
    }

    #[test]
    fn test_ipv6_glued_to_words_ignored() {
        assert!(extract_public_ips("xdead:beef::1 host2606:4700::1111 2606:4700::1111z").is_empty());
        assert_eq!(
            extract_public_ips("(2606:4700::1111)"),
            vec!["2606:4700::1111"]
        );
    }

    #[test]
    fn test_special_ipv6_ranges_excluded() {
        let text = "::1 fe80::1 fd00::1 ff02::1 2001:db8::1 ::ffff:0a00:0001";
        assert!(extract_public_ips(text).is_empty());
    }

    #[test]
    fn test_times_are_not_addresses() {
        assert!(extract_public_ips("meet at 10:30:00 tomorrow").is_empty());
    }
}
