//! Phone number extraction with E.164 normalisation.

use crate::utils::dedup::dedup_in_order;
use phonenumber::{Mode, country};
use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

/// Loose candidate pattern; `phonenumber` decides what is actually a number.
static PHONE_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d ().\-]{5,20}\d").unwrap());

/// Parses phone-number-like runs and returns valid numbers in E.164 form.
///
/// Numbers without a country prefix are interpreted in `region`.
pub fn extract_phones(content: &str, region: country::Id) -> Vec<String> {
    let phones = PHONE_CANDIDATE.find_iter(content).filter_map(|m| {
        let candidate = m.as_str().trim();
        if candidate.parse::<IpAddr>().is_ok() {
            return None;
        }

        let number = phonenumber::parse(Some(region), candidate).ok()?;
        phonenumber::is_valid(&number)
            .then(|| number.format().mode(Mode::E164).to_string())
    });

    dedup_in_order(phones)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_international_number() {
        assert_eq!(
            extract_phones("Call +44 20 7031 3000 today", country::Id::US),
            vec!["+442070313000"]
        );
    }

    #[test]
    fn test_national_number_uses_default_region() {
        assert_eq!(
            extract_phones("Call (650) 253-0000 now", country::Id::US),
            vec!["+16502530000"]
        );
    }

    #[test]
    fn test_same_number_in_two_formats_is_deduplicated() {
        let phones = extract_phones("+1 650 253 0000 or 650-253-0000", country::Id::US);
        assert_eq!(phones, vec!["+16502530000"]);
    }

    #[test]
    fn test_ip_addresses_are_not_phones() {
        assert!(extract_phones("server 203.0.113.45 is down", country::Id::US).is_empty());
    }

    #[test]
    fn test_short_digit_runs_ignored() {
        assert!(extract_phones("code 1234 expires", country::Id::US).is_empty());
    }
}
