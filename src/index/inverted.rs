// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index storage, merge and search.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **NON_EMPTY**: a (term, location) pair exists only while it has a position
//! 2. **POSITIONS_SORTED**: positions per (term, location) are a set, ascending
//! 3. **COUNT_ON_INSERT**: a location's count grows by one exactly when a new
//!    (term, location, position) triple lands, and never shrinks
//! 4. **TERMS_SORTED**: terms are kept in lexicographic order, which is what
//!    lets prefix search stop at the first non-matching key
//!
//! Merging is a set union of positions and a sum of counts, so concurrent
//! merges converge to the same index in any order.

use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;
use std::path::Path;

use super::IndexSnapshot;
use crate::error::Result;
use crate::scoring::{rank, SearchResult};
use crate::sync::{LockStrategy, NoLock, ReadWriteLock};
use crate::util::json;

type Positions = BTreeSet<usize>;

/// The unlocked maps. Every method here assumes the caller holds the lock.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Postings {
    terms: BTreeMap<String, BTreeMap<String, Positions>>,
    counts: BTreeMap<String, usize>,
}

impl Postings {
    fn insert(&mut self, term: &str, location: &str, position: usize) -> bool {
        let inserted = self
            .terms
            .entry(term.to_string())
            .or_default()
            .entry(location.to_string())
            .or_default()
            .insert(position);

        // INVARIANT: COUNT_ON_INSERT
        if inserted {
            *self.counts.entry(location.to_string()).or_insert(0) += 1;
        }
        inserted
    }

    fn absorb(&mut self, other: Postings) {
        // Cost is proportional to `other`, never to the shared maps.
        for (term, locations) in other.terms {
            // INVARIANT: NON_EMPTY
            let mut locations = locations
                .into_iter()
                .filter(|(_, positions)| !positions.is_empty())
                .peekable();
            if locations.peek().is_none() {
                continue;
            }
            let mine = self.terms.entry(term).or_default();
            for (location, positions) in locations {
                match mine.entry(location) {
                    Entry::Vacant(slot) => {
                        slot.insert(positions);
                    }
                    Entry::Occupied(mut slot) => slot.get_mut().extend(positions),
                }
            }
        }

        for (location, count) in other.counts {
            *self.counts.entry(location).or_insert(0) += count;
        }
    }

    fn positions(&self, term: &str, location: &str) -> Option<&Positions> {
        self.terms.get(term).and_then(|locations| locations.get(location))
    }

    /// Indexed terms starting with `prefix`, in order.
    fn prefix_matches<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        // INVARIANT: TERMS_SORTED - every match sits in one contiguous run
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(term, _)| term.as_str())
            .take_while(move |term| term.starts_with(prefix))
    }

    fn search<S: AsRef<str>>(&self, query: &[S], exact: bool) -> Vec<SearchResult> {
        // A term matched by several query terms still counts once.
        let matched: BTreeSet<&str> = if exact {
            query
                .iter()
                .map(AsRef::as_ref)
                .filter(|term| self.terms.contains_key(*term))
                .collect()
        } else {
            query
                .iter()
                .flat_map(|prefix| self.prefix_matches(prefix.as_ref()))
                .collect()
        };

        let mut by_location: HashMap<&str, SearchResult> = HashMap::new();
        for term in matched {
            let Some(locations) = self.terms.get(term) else {
                continue;
            };
            for (location, positions) in locations {
                let total = self.counts.get(location).copied().unwrap_or(0);
                by_location
                    .entry(location.as_str())
                    .and_modify(|result| result.absorb(positions.len(), total))
                    .or_insert_with(|| SearchResult::new(location.as_str(), positions.len(), total));
            }
        }

        let mut results: Vec<SearchResult> = by_location.into_values().collect();
        rank(&mut results);
        results
    }

    fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            terms: self
                .terms
                .iter()
                .map(|(term, locations)| {
                    let locations = locations
                        .iter()
                        .map(|(location, positions)| {
                            (location.clone(), positions.iter().copied().collect())
                        })
                        .collect();
                    (term.clone(), locations)
                })
                .collect(),
            counts: self.counts.clone(),
        }
    }
}

/// In-memory inverted index guarded by a pluggable [`LockStrategy`].
///
/// Every method takes `&self`, so an `Arc<InvertedIndex>` built with
/// [`InvertedIndex::concurrent`] can be shared by builders, crawlers and the
/// query engine at once. Mutations take the write lock, lookups the read lock.
#[derive(Debug)]
pub struct InvertedIndex {
    lock: Box<dyn LockStrategy>,
    postings: RwLock<Postings>,
}

impl InvertedIndex {
    /// An index without locking, for single-threaded builds and private
    /// per-task indexes.
    pub fn new() -> Self {
        Self::with_lock(Box::new(NoLock))
    }

    /// An index behind a writer-reentrant [`ReadWriteLock`].
    pub fn concurrent() -> Self {
        Self::with_lock(Box::new(ReadWriteLock::new()))
    }

    pub fn with_lock(lock: Box<dyn LockStrategy>) -> Self {
        Self {
            lock,
            postings: RwLock::new(Postings::default()),
        }
    }

    /// Record `term` at `position` in `location`.
    ///
    /// Returns `true` if the triple is new, in which case the location's count
    /// went up by one. Positions are stored as given; monotonicity is the
    /// caller's business.
    pub fn add_element(&self, term: &str, location: &str, position: usize) -> bool {
        let _guard = self.lock.write();
        self.postings.write().insert(term, location, position)
    }

    /// Record `terms` at consecutive positions starting from `start`.
    ///
    /// Holds the write lock for the whole batch and re-enters it per term.
    /// Returns how many triples were new.
    pub fn add_all<I>(&self, terms: I, start: usize, location: &str) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let _guard = self.lock.write();
        let mut added = 0;
        for (term, position) in terms.into_iter().zip(start..) {
            if self.add_element(term.as_ref(), location, position) {
                added += 1;
            }
        }
        added
    }

    /// Fold `other` into this index under a single write-lock acquisition.
    ///
    /// Union of positions per (term, location), sum of counts per location.
    pub fn merge(&self, other: InvertedIndex) {
        let other = other.postings.into_inner();
        let _guard = self.lock.write();
        self.postings.write().absorb(other);
    }

    pub fn contains(&self, term: &str) -> bool {
        let _guard = self.lock.read();
        self.postings.read().terms.contains_key(term)
    }

    pub fn contains_location(&self, term: &str, location: &str) -> bool {
        let _guard = self.lock.read();
        self.postings.read().positions(term, location).is_some()
    }

    pub fn contains_position(&self, term: &str, location: &str, position: usize) -> bool {
        let _guard = self.lock.read();
        self.postings
            .read()
            .positions(term, location)
            .is_some_and(|positions| positions.contains(&position))
    }

    /// Ranked results for already-normalized query terms.
    ///
    /// Exact mode matches only terms that are index keys. Partial mode matches
    /// every indexed term that starts with a query term.
    pub fn search<S: AsRef<str>>(&self, terms: &[S], exact: bool) -> Vec<SearchResult> {
        let _guard = self.lock.read();
        self.postings.read().search(terms, exact)
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        let _guard = self.lock.read();
        self.postings.read().terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0
    }

    /// Locations where `term` occurs, in order. Empty if the term is unknown.
    pub fn locations(&self, term: &str) -> Vec<String> {
        let _guard = self.lock.read();
        self.postings
            .read()
            .terms
            .get(term)
            .map(|locations| locations.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Ascending positions of `term` in `location`.
    pub fn positions(&self, term: &str, location: &str) -> Vec<usize> {
        let _guard = self.lock.read();
        self.postings
            .read()
            .positions(term, location)
            .map(|positions| positions.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Recorded term total for one location, 0 if never seen.
    pub fn count(&self, location: &str) -> usize {
        let _guard = self.lock.read();
        self.postings.read().counts.get(location).copied().unwrap_or(0)
    }

    /// Recorded term totals for every location.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let _guard = self.lock.read();
        self.postings.read().counts.clone()
    }

    /// A consistent copy of the whole index for export.
    pub fn snapshot(&self) -> IndexSnapshot {
        let _guard = self.lock.read();
        self.postings.read().snapshot()
    }

    /// Export `{term: {location: [positions...]}}` to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        json::write_json(path, &self.snapshot().terms)
    }

    /// Export `{location: count}` to `path`.
    pub fn write_counts_json(&self, path: &Path) -> Result<()> {
        json::write_json(path, &self.counts())
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}
