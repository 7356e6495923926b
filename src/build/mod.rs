// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index building from local text files.
//!
//! Discovery walks a directory (following symlinks) and keeps files named
//! `*.txt` or `*.text`, ignoring case. A root that is itself a file is taken
//! as-is. Each file's lines are normalized and its terms get consecutive
//! positions from 1, continuing across lines. The file path is the location.
//!
//! A file that cannot be read is logged and skipped. Only a missing or
//! unreadable root is an error.

pub mod parallel;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use crate::util::Normalizer;

pub use parallel::*;

/// Outcome of one build over a root path.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Files discovered.
    pub files: usize,
    /// Files skipped because they could not be read.
    pub failed: usize,
}

impl BuildSummary {
    pub fn indexed(&self) -> usize {
        self.files - self.failed
    }
}

/// Whether `path` has a text-file name.
pub fn is_text_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| name.ends_with(".txt") || name.ends_with(".text"))
}

/// Text files under `root` in file-name order, or `root` itself if it is a file.
pub fn find_text_files(root: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root).map_err(|e| Error::io(root, e))?;
    if !metadata.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_text_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => warn!(error = %e, "skipping unreadable directory entry"),
        }
    }
    Ok(files)
}

/// Read `path` line by line into `index`. Returns the number of new entries.
pub fn index_file(path: &Path, index: &InvertedIndex, normalizer: &Normalizer) -> Result<usize> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut terms = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::io(path, e))?;
        terms.extend(normalizer.terms(&line));
    }
    Ok(index.add_all(terms, 1, &path.display().to_string()))
}

/// Single-threaded builder writing straight into an index.
#[derive(Debug)]
pub struct IndexBuilder<'a> {
    index: &'a InvertedIndex,
    normalizer: Normalizer,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self {
            index,
            normalizer: Normalizer::new(),
        }
    }

    /// Index every text file under `root`.
    pub fn build(&self, root: &Path) -> Result<BuildSummary> {
        let files = find_text_files(root)?;
        let mut summary = BuildSummary {
            files: files.len(),
            failed: 0,
        };

        for path in &files {
            if let Err(e) = self.add_file(path) {
                warn!(error = %e, "skipping document");
                summary.failed += 1;
            }
        }

        info!(files = summary.files, failed = summary.failed, "text build complete");
        Ok(summary)
    }

    pub fn add_file(&self, path: &Path) -> Result<usize> {
        let added = index_file(path, self.index, &self.normalizer)?;
        debug!(path = %path.display(), added, "indexed document");
        Ok(added)
    }
}
