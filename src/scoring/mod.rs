// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! One relevance model, frequency ratio: the occurrences of the matched terms
//! at a location divided by every term occurrence recorded there. Ties fall
//! through to the raw count, then to the location name, so any two runs over
//! the same index produce the same list.

pub mod ranking;

pub use ranking::*;

/// Frequency-ratio score for `count` matches among `total` recorded terms.
pub fn frequency_score(count: usize, total: usize) -> f64 {
    debug_assert!(
        count <= total,
        "{} matches cannot exceed {} recorded terms",
        count,
        total
    );
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}
