// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concurrent in-memory inverted index, fed from local text files or a
//! bounded web crawl, queried with ranked, memoized searches.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐
//! │    build/    │   │     crawl/     │
//! │ IndexBuilder │   │ Crawler        │
//! │ Concurrent.. │   │ Frontier       │
//! └──────┬───────┘   └───────┬────────┘
//!        │ merge             │ merge
//!        ▼                   ▼
//! ┌─────────────────────────────────────┐     ┌──────────────┐
//! │              index/                 │────▶│   query/     │
//! │ InvertedIndex<dyn LockStrategy>     │     │ QueryEngine  │
//! └─────────────────────────────────────┘     └──────────────┘
//!        ▲                                           │
//!        │                                           ▼
//! ┌─────────────────────────────────────┐     ┌──────────────┐
//! │ sync/  WorkQueue, ReadWriteLock     │     │ util/json    │
//! └─────────────────────────────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use crawldex::{InvertedIndex, QueryEngine};
//!
//! let index = InvertedIndex::new();
//! index.add_all(["a", "b", "a"], 1, "doc1");
//! index.add_all(["b", "c"], 1, "doc2");
//!
//! let results = index.search(&["a"], true);
//! assert_eq!(results[0].location, "doc1");
//! assert_eq!(results[0].count, 2);
//!
//! let engine = QueryEngine::new(Arc::new(index));
//! engine.parse_query("b", true);
//! assert_eq!(engine.get("b").map(|r| r.len()), Some(2));
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod index;
pub mod query;
pub mod scoring;
pub mod sync;
pub mod testing;
pub mod util;

pub use build::{find_text_files, BuildSummary, ConcurrentIndexBuilder, IndexBuilder};
pub use config::Settings;
pub use crawl::{AnchorLinks, CrawlSummary, Crawler, Fetcher, Frontier, HttpFetcher, LinkExtractor};
pub use error::{Error, Result};
pub use index::{IndexSnapshot, InvertedIndex};
pub use query::QueryEngine;
pub use scoring::{compare_results, rank, SearchResult};
pub use sync::{LockStrategy, NoLock, ReadWriteLock, WorkHandle, WorkQueue};
pub use util::Normalizer;
