//! Search filter
//!
//! Case-insensitive substring match over the roster identifiers themselves.
//! Runs before pagination, preserves the original order, no side effects.

/// Filter `items` down to identifiers containing `query` (case-insensitive).
///
/// An empty query returns the input unchanged.
pub fn filter_keys(items: &[String], query: &str) -> Vec<String> {
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|key| key.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        ["MagnusCarlsen", "hikaru", "FabianoCaruana", "anishgiri", "lachesisQ"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_empty_query_returns_input_in_order() {
        let items = roster();
        assert_eq!(filter_keys(&items, ""), items);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let items = roster();
        assert_eq!(filter_keys(&items, "CAR"), vec!["MagnusCarlsen", "FabianoCaruana"]);
        assert_eq!(filter_keys(&items, "hika"), vec!["hikaru"]);
        assert_eq!(filter_keys(&items, "q"), vec!["lachesisQ"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_keys(&roster(), "zzz").is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let items = roster();
        let filtered = filter_keys(&items, "a");
        let positions: Vec<usize> = filtered
            .iter()
            .map(|k| items.iter().position(|i| i == k).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
