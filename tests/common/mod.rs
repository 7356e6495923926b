//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crawldex::{compare_results, SearchResult};

// Re-export canonical test utilities from crawldex::testing
pub use crawldex::testing::{html_page, index_from_docs, StaticFetcher};

// ============================================================================
// CORPUS FIXTURES
// ============================================================================

/// Write `(relative path, contents)` pairs under `root`, creating directories.
pub fn write_corpus(root: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(relative, contents)| {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, contents).unwrap();
            path
        })
        .collect()
}

/// Location string the builders record for a file.
pub fn location(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// CRAWL FIXTURES
// ============================================================================

/// Seed used by every crawl fixture.
pub const SEED: &str = "https://example.com/";

/// A small linked site rooted at [`SEED`]:
///
/// ```text
/// /        -> /a, /b, /a#top, mailto
/// /a       -> /b, /c
/// /b       -> /, /missing
/// /c       -> (none)
/// /missing -> not served
/// ```
pub fn site() -> StaticFetcher {
    StaticFetcher::new()
        .with_page(
            "https://example.com/",
            html_page(
                "Home",
                "welcome visitors",
                &["/a", "b", "/a#top", "mailto:someone@example.com"],
            ),
        )
        .with_page(
            "https://example.com/a",
            html_page("Apples", "apples and bananas", &["/b", "/c"]),
        )
        .with_page(
            "https://example.com/b",
            html_page("Bananas", "bananas bananas", &["/", "/missing"]),
        )
        .with_page("https://example.com/c", html_page("Cherries", "cherries", &[]))
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Panic unless every adjacent pair of `results` is in ranked order.
pub fn assert_ranked(results: &[SearchResult]) {
    for pair in results.windows(2) {
        assert_ne!(
            compare_results(&pair[0], &pair[1]),
            Ordering::Greater,
            "out of order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                assert!(pair[0].location.to_lowercase() <= pair[1].location.to_lowercase());
            }
        }
    }
}
