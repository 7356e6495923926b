//! Exact matches are a subset of partial matches.

use proptest::prelude::*;
use std::collections::BTreeSet;

use crawldex::InvertedIndex;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_exact_locations_within_partial(
        docs in prop::collection::vec(("[a-e]", prop::collection::vec("[a-c]{1,3}", 1..10)), 1..6),
        query in prop::collection::vec("[a-c]{1,3}", 1..4),
    ) {
        let index = InvertedIndex::new();
        for (location, words) in &docs {
            index.add_all(words, 1, location);
        }

        let partial: BTreeSet<String> = index
            .search(&query, false)
            .into_iter()
            .map(|r| r.location)
            .collect();
        for result in index.search(&query, true) {
            prop_assert!(partial.contains(&result.location), "{} missing", result.location);
        }
    }

    #[test]
    fn prop_duplicate_insert_counts_once(term in "[a-z]{1,5}", position in 1usize..100, repeats in 1usize..5) {
        let index = InvertedIndex::new();
        for _ in 0..repeats {
            index.add_element(&term, "loc", position);
        }
        prop_assert!(index.contains_position(&term, "loc", position));
        prop_assert_eq!(index.count("loc"), 1);
    }
}
