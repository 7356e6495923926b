//! The frontier never exceeds its cap, whatever the link graph.

use proptest::prelude::*;
use std::sync::Arc;

use crate::common::{html_page, StaticFetcher};
use crawldex::{Crawler, Frontier, InvertedIndex, WorkQueue};

const PAGES: usize = 8;

fn page_url(n: usize) -> String {
    format!("https://site.test/p{}", n)
}

fn graph_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..PAGES, 0..5), PAGES)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_crawl_respects_max(graph in graph_strategy(), max in 1usize..10) {
        let mut fetcher = StaticFetcher::new();
        for (n, links) in graph.iter().enumerate() {
            let hrefs: Vec<String> = links.iter().map(|l| format!("/p{}", l)).collect();
            let hrefs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
            fetcher = fetcher.with_page(&page_url(n), html_page("t", "body words", &hrefs));
        }

        let index = Arc::new(InvertedIndex::concurrent());
        let queue = WorkQueue::new(3);
        let fetcher = Arc::new(fetcher);
        let summary = Crawler::with_fetcher(Arc::clone(&index), queue.handle(), fetcher.clone())
            .crawl(&page_url(0), max)
            .unwrap();

        prop_assert!(summary.admitted.len() <= max);
        prop_assert_eq!(summary.pages_indexed, summary.admitted.len());
        prop_assert_eq!(fetcher.fetched().len(), summary.admitted.len());
        prop_assert!(index.counts().len() <= max);
    }

    #[test]
    fn prop_frontier_admits_at_most_max(paths in prop::collection::vec("[a-f]{1,2}", 0..30), max in 0usize..8) {
        let mut frontier = Frontier::new(max);
        let base = url::Url::parse("https://site.test/").unwrap();
        for path in paths {
            frontier.admit(&base.join(&path).unwrap());
            prop_assert!(frontier.len() <= max.max(1));
        }
    }
}
