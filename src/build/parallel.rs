// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Work-queue backed index construction.
//!
//! One task per file. Each task reads its file into a private, lock-free
//! index and then merges that into the shared index, so the shared write
//! lock is taken once per file instead of once per term.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{find_text_files, index_file, BuildSummary};
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::sync::WorkHandle;
use crate::util::Normalizer;

/// Builder that fans files out over a [`WorkQueue`](crate::sync::WorkQueue).
#[derive(Clone)]
pub struct ConcurrentIndexBuilder {
    index: Arc<InvertedIndex>,
    queue: WorkHandle,
    failed: Arc<AtomicUsize>,
}

impl ConcurrentIndexBuilder {
    pub fn new(index: Arc<InvertedIndex>, queue: WorkHandle) -> Self {
        Self {
            index,
            queue,
            failed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Index every text file under `root` and wait for the tasks to finish.
    pub fn build(&self, root: &Path) -> Result<BuildSummary> {
        let files = find_text_files(root)?;
        let failed_before = self.failed.load(Ordering::SeqCst);

        for path in &files {
            self.submit_file(path.clone());
        }
        self.finish();

        let summary = BuildSummary {
            files: files.len(),
            failed: self.failed.load(Ordering::SeqCst) - failed_before,
        };
        info!(files = summary.files, failed = summary.failed, "parallel text build complete");
        Ok(summary)
    }

    /// Queue one file. Call [`finish`](Self::finish) before reading the index.
    pub fn submit_file(&self, path: PathBuf) {
        let index = Arc::clone(&self.index);
        let failed = Arc::clone(&self.failed);
        self.queue.submit(move || {
            let local = InvertedIndex::new();
            match index_file(&path, &local, &Normalizer::new()) {
                Ok(added) => {
                    index.merge(local);
                    debug!(path = %path.display(), added, "merged document");
                }
                Err(e) => {
                    warn!(error = %e, "skipping document");
                    failed.fetch_add(1, Ordering::SeqCst);
                }
            }
        });
    }

    /// Block until every queued file has been merged.
    pub fn finish(&self) {
        self.queue.finish();
    }

    /// Documents skipped so far across all builds.
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }
}
