//! Deterministic cache keys derived from message content.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `content`.
///
/// Identical content always yields the same key across calls and processes.
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(content_hash("hello"), content_hash("hello"));
        assert_eq!(content_hash("hello").len(), 64);
    }

    #[test]
    fn test_hash_known_vector() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_distinct_content_distinct_keys() {
        let corpus = ["a", "b", "hello", "hello ", "Hello", "héllo", ""];
        let keys: std::collections::HashSet<_> = corpus.iter().map(|c| content_hash(c)).collect();
        assert_eq!(keys.len(), corpus.len());
    }
}
