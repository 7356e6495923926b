// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the crawldex command-line interface.
//!
//! No subcommands. Every stage is switched on by its own flag and the stages
//! run in a fixed order: build from `--text`, crawl from `--html`, write the
//! index and counts, run `--query`, write results. Values are kept raw here
//! and resolved by [`Settings::from_cli`](crate::config::Settings::from_cli).

pub mod display;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "crawldex",
    about = "Build an inverted index from files or a web crawl, then query it",
    version,
    allow_negative_numbers = true
)]
pub struct Cli {
    /// File or directory of .txt/.text files to index
    #[arg(long, value_name = "PATH")]
    pub text: Option<PathBuf>,

    /// Seed URL to crawl and index
    #[arg(long, value_name = "URL")]
    pub html: Option<String>,

    /// Maximum number of pages to admit to the crawl (default 3)
    #[arg(long, value_name = "N")]
    pub max: Option<String>,

    /// Run multithreaded, optionally with N workers (default 5)
    #[arg(long, value_name = "N", num_args = 0..=1)]
    pub threads: Option<Option<String>>,

    /// Write the inverted index as JSON (default index.json)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub index: Option<Option<PathBuf>>,

    /// Write per-location term counts as JSON (default counts.json)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub counts: Option<Option<PathBuf>>,

    /// File of queries, one per line
    #[arg(long, value_name = "PATH")]
    pub query: Option<PathBuf>,

    /// Match query terms exactly instead of by prefix
    #[arg(long)]
    pub exact: bool,

    /// Write query results as JSON (default results.json)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub results: Option<Option<PathBuf>>,

    /// Log level when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}
