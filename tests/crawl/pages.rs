//! What a crawled page contributes to the index.

use std::sync::Arc;

use url::Url;

use crate::common::{html_page, site, StaticFetcher, SEED};
use crawldex::{Crawler, InvertedIndex, LinkExtractor, WorkQueue};

fn crawl_with(fetcher: StaticFetcher, max: usize) -> Arc<InvertedIndex> {
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(3);
    Crawler::with_fetcher(Arc::clone(&index), queue.handle(), Arc::new(fetcher))
        .crawl(SEED, max)
        .unwrap();
    index
}

#[test]
fn test_page_text_indexed_from_position_one() {
    let index = crawl_with(site(), 50);

    // Body "bananas bananas", then the anchor text "/" and "/missing".
    assert_eq!(index.positions("banana", "https://example.com/b"), vec![1, 2]);
    assert_eq!(index.count("https://example.com/b"), 3);

    let results = index.search(&["banana"], true);
    let order: Vec<_> = results.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(order, vec!["https://example.com/b", "https://example.com/a"]);
}

#[test]
fn test_head_and_scripts_not_indexed() {
    let index = crawl_with(site(), 50);
    // Titles live in <head>.
    assert!(!index.contains("home"));
    assert!(index.contains("welcom"));
}

#[test]
fn test_failed_fetch_contributes_nothing() {
    let index = crawl_with(site(), 50);
    assert_eq!(index.count("https://example.com/missing"), 0);
    assert!(!index.counts().contains_key("https://example.com/missing"));
}

#[test]
fn test_links_in_comments_and_scripts_ignored() {
    let seed = "<html><body><!-- <a href=\"/hidden\">h</a> -->\
                <script>var s = '<a href=\"/scripted\">';</script>\
                <p>visible</p><a href=\"/shown\">shown</a></body></html>";
    let fetcher = StaticFetcher::new()
        .with_page(SEED, seed)
        .with_page("https://example.com/shown", html_page("S", "shown page", &[]))
        .with_page("https://example.com/hidden", html_page("H", "hidden page", &[]))
        .with_page("https://example.com/scripted", html_page("X", "script page", &[]));

    let index = crawl_with(fetcher, 10);
    let mut locations: Vec<_> = index.counts().into_keys().collect();
    locations.sort();
    assert_eq!(locations, vec![SEED.to_string(), "https://example.com/shown".to_string()]);
}

#[test]
fn test_entities_decoded_before_indexing() {
    let fetcher = StaticFetcher::new().with_page(SEED, "<p>fish &amp; chips &bogus; caf&eacute;</p>");
    let index = crawl_with(fetcher, 1);
    assert_eq!(index.positions("cafe", SEED), vec![3]);
}

struct NoLinks;

impl LinkExtractor for NoLinks {
    fn links(&self, _base: &Url, _html: &str) -> Vec<Url> {
        Vec::new()
    }
}

#[test]
fn test_custom_link_extractor() {
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(2);
    let summary = Crawler::with_fetcher(Arc::clone(&index), queue.handle(), Arc::new(site()))
        .with_link_extractor(Arc::new(NoLinks))
        .crawl(SEED, 50)
        .unwrap();
    assert_eq!(summary.admitted.len(), 1);
}

#[test]
fn test_blank_page_counts_as_failed_fetch() {
    let fetcher = StaticFetcher::new()
        .with_page(SEED, html_page("Home", "start here", &["/blank"]))
        .with_page("https://example.com/blank", " \n\t ");
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(2);

    let summary = Crawler::with_fetcher(Arc::clone(&index), queue.handle(), Arc::new(fetcher))
        .crawl(SEED, 10)
        .unwrap();

    assert_eq!(summary.admitted.len(), 2);
    assert_eq!(summary.pages_indexed, 1);
    assert_eq!(summary.failed, 1);
    assert!(!index.counts().contains_key("https://example.com/blank"));
}

#[test]
fn test_empty_seed_indexes_nothing() {
    let fetcher = StaticFetcher::new().with_page(SEED, "");
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(2);

    let summary = Crawler::with_fetcher(Arc::clone(&index), queue.handle(), Arc::new(fetcher))
        .crawl(SEED, 10)
        .unwrap();

    assert_eq!(summary.pages_indexed, 0);
    assert_eq!(summary.failed, 1);
    assert!(index.is_empty());
}
