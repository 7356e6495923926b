// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded, link-following web crawl feeding a shared index.
//!
//! # How a crawl runs
//!
//! The seed is admitted to a fresh [`Frontier`] and its task submitted. Each
//! task then:
//!
//! 1. fetches its page; a failure ends this task and nothing else
//! 2. strips comments and non-content elements
//! 3. extracts links, and under the frontier lock admits each new one that
//!    fits and submits its task, so admission and submission are one step
//! 4. strips the remaining markup, tokenizes the text into a private index
//!    with positions from 1, and merges it into the shared index
//!
//! The crawl is over when the work queue drains. `max` is per call; nothing
//! carries over between crawls.

mod fetch;
mod frontier;
mod links;

pub use fetch::*;
pub use frontier::*;
pub use links::*;

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use crate::sync::WorkHandle;
use crate::util::{html, Normalizer};

/// Outcome of one crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages admitted to the frontier, in admission order.
    pub admitted: Vec<Url>,
    /// Pages fetched and merged into the index.
    pub pages_indexed: usize,
    /// Admitted pages whose fetch failed.
    pub failed: usize,
}

/// Per-crawl state shared by every task of that crawl.
struct CrawlContext {
    index: Arc<InvertedIndex>,
    queue: WorkHandle,
    fetcher: Arc<dyn Fetcher>,
    links: Arc<dyn LinkExtractor>,
    frontier: Mutex<Frontier>,
    pages_indexed: AtomicUsize,
    failed: AtomicUsize,
}

/// Crawls from a seed into a shared index using a work queue.
#[derive(Clone)]
pub struct Crawler {
    index: Arc<InvertedIndex>,
    queue: WorkHandle,
    fetcher: Arc<dyn Fetcher>,
    links: Arc<dyn LinkExtractor>,
}

impl Crawler {
    /// A crawler over HTTP with the default time budget.
    pub fn new(index: Arc<InvertedIndex>, queue: WorkHandle) -> Result<Self> {
        Ok(Self::with_fetcher(index, queue, Arc::new(HttpFetcher::new()?)))
    }

    pub fn with_fetcher(
        index: Arc<InvertedIndex>,
        queue: WorkHandle,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            index,
            queue,
            fetcher,
            links: Arc::new(AnchorLinks),
        }
    }

    pub fn with_link_extractor(mut self, links: Arc<dyn LinkExtractor>) -> Self {
        self.links = links;
        self
    }

    /// Parse `seed` and crawl at most `max` pages from it.
    pub fn crawl(&self, seed: &str, max: usize) -> Result<CrawlSummary> {
        let url = Url::parse(seed).map_err(|source| Error::InvalidSeed {
            seed: seed.to_string(),
            source,
        })?;
        self.crawl_url(url, max)
    }

    /// Crawl at most `max` pages from `seed`, blocking until the crawl drains.
    pub fn crawl_url(&self, seed: Url, max: usize) -> Result<CrawlSummary> {
        let seed_text = seed.to_string();
        let seed = canonicalize(seed).ok_or(Error::UnsupportedSeed { seed: seed_text })?;

        let context = Arc::new(CrawlContext {
            index: Arc::clone(&self.index),
            queue: self.queue.clone(),
            fetcher: Arc::clone(&self.fetcher),
            links: Arc::clone(&self.links),
            frontier: Mutex::new(Frontier::new(max)),
            pages_indexed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        });

        info!(%seed, max, "crawl started");
        context.frontier.lock().admit(&seed);
        submit_page(&context, seed);
        self.queue.finish();

        let summary = CrawlSummary {
            admitted: context.frontier.lock().locations().cloned().collect(),
            pages_indexed: context.pages_indexed.load(Ordering::SeqCst),
            failed: context.failed.load(Ordering::SeqCst),
        };
        info!(
            admitted = summary.admitted.len(),
            indexed = summary.pages_indexed,
            failed = summary.failed,
            "crawl complete"
        );
        Ok(summary)
    }
}

fn submit_page(context: &Arc<CrawlContext>, url: Url) {
    let task_context = Arc::clone(context);
    context.queue.submit(move || crawl_page(&task_context, url));
}

fn crawl_page(context: &Arc<CrawlContext>, url: Url) {
    let Some(page) = context
        .fetcher
        .fetch(&url)
        .filter(|page| !page.trim().is_empty())
    else {
        debug!(%url, "skipping page");
        context.failed.fetch_add(1, Ordering::SeqCst);
        return;
    };

    let page = html::strip_block_elements(&page);
    let links = context.links.links(&url, &page);
    {
        let mut frontier = context.frontier.lock();
        for link in links {
            if frontier.admit(&link) {
                debug!(%link, from = %url, "admitted");
                submit_page(context, link);
            }
        }
    }

    let text = html::strip_entities(&html::strip_tags(&page));
    let local = InvertedIndex::new();
    let added = local.add_all(Normalizer::new().terms(&text), 1, url.as_str());
    context.index.merge(local);
    context.pages_indexed.fetch_add(1, Ordering::SeqCst);
    debug!(%url, added, "merged page");
}
