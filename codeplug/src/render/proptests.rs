//! Property-based tests for name sanitization and range compression.

use super::{compress_ranges, sanitize_name};
use crate::model::MAX_NAME_LENGTH;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Expand a compressed range string back into its numbers.
fn expand(ranges: &str) -> BTreeSet<usize> {
    if ranges == "-" {
        return BTreeSet::new();
    }
    ranges
        .split(',')
        .flat_map(|part| match part.split_once('-') {
            Some((lo, hi)) => {
                let lo: usize = lo.parse().unwrap();
                let hi: usize = hi.parse().unwrap();
                (lo..=hi).collect::<Vec<_>>()
            }
            None => vec![part.parse().unwrap()],
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Sanitizing a sanitized name changes nothing
    #[test]
    fn sanitize_is_idempotent(name in "\\PC{0,40}") {
        let once = sanitize_name(&name, "UNNAMED");
        let twice = sanitize_name(&once, "UNNAMED");
        prop_assert_eq!(once, twice);
    }

    // Output is short and uses only the token alphabet
    #[test]
    fn sanitize_output_is_a_token(name in "\\PC{0,40}") {
        let token = sanitize_name(&name, "UNNAMED");
        prop_assert!(!token.is_empty());
        prop_assert!(token.chars().count() <= MAX_NAME_LENGTH);
        prop_assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        prop_assert!(!token.starts_with('_'));
        prop_assert!(!token.ends_with('_'));
        prop_assert!(!token.contains("__"));
    }

    // Compression is lossless over the set of numbers
    #[test]
    fn compress_ranges_preserves_set(numbers in prop::collection::vec(1usize..300, 0..60)) {
        let compressed = compress_ranges(&numbers);
        let expected: BTreeSet<usize> = numbers.iter().copied().collect();
        prop_assert_eq!(expand(&compressed), expected);
    }

    // Adjacent parts never touch, otherwise they would have been merged
    #[test]
    fn compress_ranges_is_minimal(numbers in prop::collection::vec(1usize..300, 1..60)) {
        let compressed = compress_ranges(&numbers);
        let bounds: Vec<(usize, usize)> = compressed
            .split(',')
            .map(|part| match part.split_once('-') {
                Some((lo, hi)) => (lo.parse().unwrap(), hi.parse().unwrap()),
                None => {
                    let n = part.parse().unwrap();
                    (n, n)
                }
            })
            .collect();
        for pair in bounds.windows(2) {
            prop_assert!(pair[1].0 > pair[0].1 + 1);
        }
    }
}
