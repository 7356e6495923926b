//! Shared-index behaviour under concurrent merges and queries.

use std::sync::Arc;
use std::thread;

use crawldex::{InvertedIndex, ReadWriteLock, WorkQueue};

fn local(location: &str, text: &str) -> InvertedIndex {
    let index = InvertedIndex::new();
    index.add_all(text.split_whitespace(), 1, location);
    index
}

#[test]
fn test_merge_order_does_not_matter() {
    let docs = [("a", "one two three"), ("b", "two three four"), ("a", "one five")];

    let forward = InvertedIndex::new();
    for (location, text) in docs {
        forward.merge(local(location, text));
    }
    let backward = InvertedIndex::new();
    for (location, text) in docs.iter().rev() {
        backward.merge(local(location, text));
    }

    assert_eq!(forward.snapshot(), backward.snapshot());
}

#[test]
fn test_queue_merges_match_sequential_build() {
    let docs: Vec<(String, String)> = (0..40)
        .map(|n| (format!("doc{:02}", n), format!("w{} w{} shared", n % 7, n % 3)))
        .collect();

    let sequential = InvertedIndex::new();
    for (location, text) in &docs {
        sequential.merge(local(location, text));
    }

    let shared = Arc::new(InvertedIndex::concurrent());
    let queue = WorkQueue::new(4);
    for (location, text) in docs {
        let shared = Arc::clone(&shared);
        queue.submit(move || shared.merge(local(&location, &text)));
    }
    queue.finish();

    assert_eq!(shared.snapshot(), sequential.snapshot());
}

#[test]
fn test_readers_see_whole_merges() {
    let shared = Arc::new(InvertedIndex::concurrent());
    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for n in 0..200 {
                shared.merge(local(&format!("doc{}", n), "left right"));
            }
        })
    };

    // Each merge adds "left" and "right" to one location together, so a
    // reader must never see one without the other.
    for _ in 0..200 {
        for result in shared.search(&["left", "right"], true) {
            assert_eq!(result.count, 2, "half-merged {}", result.location);
        }
    }
    writer.join().unwrap();
    assert_eq!(shared.locations("left").len(), 200);
}

#[test]
fn test_custom_lock_strategy() {
    let index = InvertedIndex::with_lock(Box::new(ReadWriteLock::new()));
    assert_eq!(index.add_all(["x", "y", "x"], 10, "loc"), 3);
    assert_eq!(index.positions("x", "loc"), vec![10, 12]);
}
