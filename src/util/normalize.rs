// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line normalization: raw text in, index terms out.
//!
//! # Algorithm
//!
//! 1. NFD normalize (decompose characters into base + combining marks)
//! 2. Drop every character that is neither alphabetic nor whitespace, which
//!    removes the combining marks along with digits and punctuation
//! 3. Lowercase
//! 4. Split on whitespace
//! 5. Stem each word with the English Snowball stemmer
//!
//! So "Café-Owners" becomes "cafeown" and "running 42 laps" becomes
//! ["run", "lap"].

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::BTreeSet;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Cleans, splits and stems lines of text.
///
/// Cheap to build. Builders make one per task instead of sharing one.
pub struct Normalizer {
    stemmer: Option<Stemmer>,
}

impl Normalizer {
    /// English Snowball stemming.
    pub fn new() -> Self {
        Self {
            stemmer: Some(Stemmer::create(Algorithm::English)),
        }
    }

    /// Clean and split only. Handy in tests that want to see raw words.
    pub fn without_stemming() -> Self {
        Self { stemmer: None }
    }

    /// Terms of `line` in order, duplicates kept.
    pub fn terms(&self, line: &str) -> Vec<String> {
        let cleaned = clean(line);
        cleaned
            .split_whitespace()
            .map(|word| match &self.stemmer {
                Some(stemmer) => stemmer.stem(word).into_owned(),
                None => word.to_string(),
            })
            .collect()
    }

    /// Distinct terms of `line`, sorted.
    pub fn unique_terms(&self, line: &str) -> BTreeSet<String> {
        self.terms(line).into_iter().collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("stemming", &self.stemmer.is_some())
            .finish()
    }
}

/// Steps 1-3: decompose, keep letters and whitespace, lowercase.
pub fn clean(text: &str) -> String {
    text.nfd()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
