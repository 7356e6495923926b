//! Frontier admission: the cap, duplicates and canonical forms.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::common::{site, SEED};
use crawldex::{Crawler, Error, InvertedIndex, WorkQueue};

fn crawl(max: usize) -> (crawldex::CrawlSummary, Arc<InvertedIndex>, Arc<crawldex::testing::StaticFetcher>) {
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(4);
    let fetcher = Arc::new(site());
    let crawler = Crawler::with_fetcher(Arc::clone(&index), queue.handle(), fetcher.clone());
    let summary = crawler.crawl(SEED, max).unwrap();
    (summary, index, fetcher)
}

fn paths(summary: &crawldex::CrawlSummary) -> BTreeSet<String> {
    summary.admitted.iter().map(|u| u.path().to_string()).collect()
}

#[test]
fn test_max_one_visits_only_seed() {
    let (summary, index, fetcher) = crawl(1);

    assert_eq!(summary.admitted.len(), 1);
    assert_eq!(summary.pages_indexed, 1);
    assert_eq!(fetcher.fetched(), vec![SEED.to_string()]);
    assert_eq!(index.counts().keys().cloned().collect::<Vec<_>>(), vec![SEED.to_string()]);
}

#[test]
fn test_seed_links_fill_small_frontier() {
    let (summary, _, fetcher) = crawl(3);

    // The seed links to /a, /b and /a#top; /c is found too late to fit.
    let admitted: Vec<_> = summary.admitted.iter().map(|u| u.path()).collect();
    assert_eq!(admitted, vec!["/", "/a", "/b"]);
    assert_eq!(fetcher.fetch_count("https://example.com/c"), 0);
}

#[test]
fn test_whole_site_each_page_fetched_once() {
    let (summary, _, fetcher) = crawl(50);

    let expected: BTreeSet<String> = ["/", "/a", "/b", "/c", "/missing"]
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(paths(&summary), expected);
    assert_eq!(summary.pages_indexed, 4);
    assert_eq!(summary.failed, 1);

    for url in fetcher.fetched() {
        assert_eq!(fetcher.fetch_count(&url), 1, "{} fetched twice", url);
    }
}

#[test]
fn test_seed_fragment_is_stripped() {
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(2);
    let fetcher = Arc::new(site());
    let crawler = Crawler::with_fetcher(Arc::clone(&index), queue.handle(), fetcher.clone());

    let summary = crawler.crawl("https://EXAMPLE.com/#intro", 1).unwrap();
    assert_eq!(summary.admitted[0].as_str(), SEED);
    assert_eq!(summary.pages_indexed, 1);
}

#[test]
fn test_bad_seeds_are_errors() {
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(1);
    let crawler = Crawler::with_fetcher(index, queue.handle(), Arc::new(site()));

    assert!(matches!(
        crawler.crawl("not a url", 3),
        Err(Error::InvalidSeed { .. })
    ));
    assert!(matches!(
        crawler.crawl("mailto:someone@example.com", 3),
        Err(Error::UnsupportedSeed { .. })
    ));
}

#[test]
fn test_max_is_per_crawl() {
    let index = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(2);
    let crawler = Crawler::with_fetcher(Arc::clone(&index), queue.handle(), Arc::new(site()));

    assert_eq!(crawler.crawl(SEED, 2).unwrap().admitted.len(), 2);
    assert_eq!(crawler.crawl(SEED, 1).unwrap().admitted.len(), 1);
}
