// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Sort order:
//! 1. **Score** - descending
//! 2. **Count** - descending
//! 3. **Location** - ascending, ignoring case
//! 4. **Location** - ascending, exact bytes, so "A" and "a" still have a fixed order

use serde::Serialize;
use std::cmp::Ordering;

use super::frequency_score;

/// One location matching a query.
///
/// Built fresh for every search call and never stored in the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Document path or page URL.
    #[serde(rename = "where")]
    pub location: String,
    /// Occurrences of every matched term at this location.
    pub count: usize,
    /// `count` over the location's recorded term total.
    pub score: f64,
}

impl SearchResult {
    pub fn new(location: impl Into<String>, count: usize, total: usize) -> Self {
        Self {
            location: location.into(),
            count,
            score: frequency_score(count, total),
        }
    }

    /// Fold another matched term's occurrences into this result.
    pub fn absorb(&mut self, occurrences: usize, total: usize) {
        self.count += occurrences;
        self.score = frequency_score(self.count, total);
    }
}

/// Compare two search results for ranking. `Ordering::Less` ranks first.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| folded(&a.location).cmp(folded(&b.location)))
        .then_with(|| a.location.cmp(&b.location))
}

fn folded(location: &str) -> impl Iterator<Item = char> + '_ {
    location.chars().flat_map(char::to_lowercase)
}

/// Sort results into ranked order in place.
pub fn rank(results: &mut [SearchResult]) {
    results.sort_by(compare_results);
}
