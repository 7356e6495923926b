// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Outbound link extraction.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Finds absolute, canonical outbound links in a page.
///
/// Malformed links are dropped, never reported.
pub trait LinkExtractor: Send + Sync {
    fn links(&self, base: &Url, html: &str) -> Vec<Url>;
}

/// Double-quoted `href` values of `<a>` tags, in document order.
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?si)<a[^>]*?href[^>]*?=[^>]*?"(.+?)".*?>"#).expect("anchor pattern is valid")
});

/// Regex-based extractor over `<a href="...">` tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorLinks;

impl LinkExtractor for AnchorLinks {
    fn links(&self, base: &Url, html: &str) -> Vec<Url> {
        ANCHOR
            .captures_iter(html)
            .filter_map(|caps| base.join(caps[1].trim()).ok())
            .filter_map(canonicalize)
            .collect()
    }
}

/// Canonical form used for frontier membership and as the index location:
/// http(s) only, fragment removed. Parsing has already normalized the scheme,
/// host case, default port, dot segments and percent-encoding.
pub fn canonicalize(mut url: Url) -> Option<Url> {
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
