// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query processing with per-signature memoization.
//!
//! A query line is normalized to its distinct terms, sorted. Those terms
//! joined by a single space form the line's signature, and each signature is
//! searched once: later lines with the same signature are no-ops. Results are
//! kept in the order signatures were first recorded.
//!
//! The concurrent engine runs each line as its own work-queue task. The
//! signature map is locked only around the check and the insert; the search
//! in between runs under the index's read lock alone.

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use crate::scoring::SearchResult;
use crate::sync::WorkHandle;
use crate::util::{json, Normalizer};

type ResultMap = IndexMap<String, Vec<SearchResult>>;

/// Canonical key for a set of query terms.
pub fn signature(terms: &BTreeSet<String>) -> String {
    terms.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

/// Runs queries against an index and remembers their results.
pub struct QueryEngine {
    index: Arc<InvertedIndex>,
    results: Arc<Mutex<ResultMap>>,
    queue: Option<WorkHandle>,
}

impl QueryEngine {
    /// Engine that runs every query inline.
    pub fn new(index: Arc<InvertedIndex>) -> Self {
        Self {
            index,
            results: Arc::new(Mutex::new(IndexMap::new())),
            queue: None,
        }
    }

    /// Engine that runs every query as a work-queue task.
    pub fn concurrent(index: Arc<InvertedIndex>, queue: WorkHandle) -> Self {
        Self {
            queue: Some(queue),
            ..Self::new(index)
        }
    }

    /// Process one query line. Lines without terms are ignored.
    ///
    /// On a concurrent engine this only queues the work; call
    /// [`finish`](Self::finish) before reading results.
    pub fn parse_query(&self, line: &str, exact: bool) {
        match &self.queue {
            None => run_query(&self.index, &self.results, line, exact),
            Some(queue) => {
                let index = Arc::clone(&self.index);
                let results = Arc::clone(&self.results);
                let line = line.to_string();
                queue.submit(move || run_query(&index, &results, &line, exact));
            }
        }
    }

    /// Process every line of `path` and wait for the results.
    ///
    /// Returns the number of lines read.
    pub fn parse_queries_in_file(&self, path: &Path, exact: bool) -> Result<usize> {
        if path.is_dir() {
            return Err(Error::QueryPathIsDirectory(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut lines = 0;
        let read = BufReader::new(file).lines().try_for_each(|line| {
            let line = line.map_err(|e| Error::io(path, e))?;
            self.parse_query(&line, exact);
            lines += 1;
            Ok::<_, Error>(())
        });
        // Wait for whatever was queued, even if reading stopped early.
        self.finish();
        read?;

        info!(lines, signatures = self.len(), exact, "queries processed");
        Ok(lines)
    }

    /// Wait for queued queries. A no-op for inline engines.
    pub fn finish(&self) {
        if let Some(queue) = &self.queue {
            queue.finish();
        }
    }

    /// Results for one signature.
    pub fn get(&self, signature: &str) -> Option<Vec<SearchResult>> {
        self.results.lock().get(signature).cloned()
    }

    /// All results, keyed by signature in insertion order.
    pub fn results(&self) -> ResultMap {
        self.results.lock().clone()
    }

    /// Number of distinct signatures processed.
    pub fn len(&self) -> usize {
        self.results.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export results as `{signature: [{"where", "count", "score"}, ...]}`.
    ///
    /// Signatures appear in the order they were first recorded. With the
    /// concurrent engine that is task completion order, which can differ
    /// between runs; each signature's result list is ranked either way.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let results = self.results.lock();
        json::write_json(path, &*results)
    }
}

fn run_query(index: &InvertedIndex, results: &Mutex<ResultMap>, line: &str, exact: bool) {
    let terms = Normalizer::new().unique_terms(line);
    if terms.is_empty() {
        return;
    }

    let key = signature(&terms);
    if results.lock().contains_key(&key) {
        return;
    }

    let terms: Vec<String> = terms.into_iter().collect();
    let found = index.search(&terms, exact);
    debug!(signature = %key, results = found.len(), "query searched");
    results.lock().entry(key).or_insert(found);
}
