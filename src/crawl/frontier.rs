// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexSet;
use url::Url;

/// The set of pages admitted to one crawl, capped at `max`.
///
/// Admission order is kept. The frontier only grows, and never past `max`.
#[derive(Debug, Clone)]
pub struct Frontier {
    admitted: IndexSet<Url>,
    max: usize,
}

impl Frontier {
    /// A frontier admitting at most `max` pages. Zero is raised to one so the
    /// seed always fits.
    pub fn new(max: usize) -> Self {
        Self {
            admitted: IndexSet::new(),
            max: max.max(1),
        }
    }

    /// Admit `url` if it is new and there is room. Returns whether it was admitted.
    pub fn admit(&mut self, url: &Url) -> bool {
        if self.is_full() || self.admitted.contains(url) {
            return false;
        }
        self.admitted.insert(url.clone());
        debug_assert!(self.admitted.len() <= self.max);
        true
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.admitted.contains(url)
    }

    pub fn len(&self) -> usize {
        self.admitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.admitted.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Admitted pages in admission order.
    pub fn locations(&self) -> impl Iterator<Item = &Url> {
        self.admitted.iter()
    }
}
