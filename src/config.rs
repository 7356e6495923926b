// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Run settings resolved from command-line flags.
//!
//! Bad values never abort a run. An unusable thread count or crawl limit
//! falls back to a default, and a flag given without a path writes to the
//! default file name.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::sync::DEFAULT_THREADS;

/// Crawl limit when `--max` is absent.
pub const DEFAULT_MAX: usize = 3;

/// Crawl limit when `--max` is present but not a positive integer.
pub const FALLBACK_MAX: usize = 1;

pub const DEFAULT_INDEX_PATH: &str = "index.json";
pub const DEFAULT_COUNTS_PATH: &str = "counts.json";
pub const DEFAULT_RESULTS_PATH: &str = "results.json";

/// Per-request time budget for the HTTP fetcher.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirects followed before a fetch counts as failed.
pub const MAX_REDIRECTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// File or directory to index.
    pub text: Option<PathBuf>,
    /// Crawl seed URL.
    pub seed: Option<String>,
    /// Crawl frontier limit.
    pub max: usize,
    /// Worker count; `Some` selects the multithreaded pipeline.
    pub threads: Option<usize>,
    pub index: Option<PathBuf>,
    pub counts: Option<PathBuf>,
    pub query: Option<PathBuf>,
    pub exact: bool,
    pub results: Option<PathBuf>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        let threads = match (&cli.threads, &cli.html) {
            (Some(value), _) => Some(parse_threads(value.as_deref())),
            (None, Some(_)) => Some(DEFAULT_THREADS),
            (None, None) => None,
        };

        Self {
            text: cli.text.clone(),
            seed: cli.html.clone(),
            max: parse_max(cli.max.as_deref()),
            threads,
            index: output_path(&cli.index, DEFAULT_INDEX_PATH),
            counts: output_path(&cli.counts, DEFAULT_COUNTS_PATH),
            query: cli.query.clone(),
            exact: cli.exact,
            results: output_path(&cli.results, DEFAULT_RESULTS_PATH),
        }
    }

    pub fn is_multithreaded(&self) -> bool {
        self.threads.is_some()
    }
}

/// Worker count from a raw flag value. Missing, unparseable or non-positive
/// values give [`DEFAULT_THREADS`].
pub fn parse_threads(value: Option<&str>) -> usize {
    parse_positive(value).unwrap_or(DEFAULT_THREADS)
}

/// Crawl limit from a raw flag value.
pub fn parse_max(value: Option<&str>) -> usize {
    match value {
        None => DEFAULT_MAX,
        Some(raw) => parse_positive(Some(raw)).unwrap_or(FALLBACK_MAX),
    }
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

fn output_path(flag: &Option<Option<PathBuf>>, default: &str) -> Option<PathBuf> {
    flag.as_ref()
        .map(|path| path.clone().unwrap_or_else(|| PathBuf::from(default)))
}
