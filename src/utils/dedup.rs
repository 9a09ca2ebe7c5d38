//! Order-preserving deduplication.

use std::collections::HashSet;

/// Removes repeated strings, keeping the first occurrence of each.
pub fn dedup_in_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_occurrence() {
        let items = ["b", "a", "b", "c", "a"].map(String::from);
        assert_eq!(dedup_in_order(items), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_in_order(Vec::new()).is_empty());
    }
}
