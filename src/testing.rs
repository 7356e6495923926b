// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use parking_lot::Mutex;
use std::collections::HashMap;
use url::Url;

use crate::crawl::Fetcher;
use crate::index::InvertedIndex;

/// In-memory fetcher: serves registered pages, fails everything else.
///
/// Keys are canonical URL strings such as `https://example.com/a`.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Every URL requested so far, in request order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }

    /// How many times `url` was requested.
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetched.lock().iter().filter(|u| *u == url).count()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &Url) -> Option<String> {
        self.fetched.lock().push(url.to_string());
        self.pages.get(url.as_str()).cloned()
    }
}

/// A lock-free index with each `(location, text)` split on whitespace,
/// positions from 1, no normalization.
pub fn index_from_docs(docs: &[(&str, &str)]) -> InvertedIndex {
    let index = InvertedIndex::new();
    for (location, text) in docs {
        index.add_all(text.split_whitespace(), 1, location);
    }
    index
}

/// A minimal HTML page with a title, a body paragraph and one anchor per link.
pub fn html_page(title: &str, body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<li><a href=\"{}\">{}</a></li>\n", href, href))
        .collect();
    format!(
        "<html>\n<head><title>{}</title></head>\n<body>\n<p>{}</p>\n<ul>\n{}</ul>\n</body>\n</html>\n",
        title, body, anchors
    )
}
