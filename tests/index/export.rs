//! Snapshot and JSON export format.

use crate::common::index_from_docs;
use crawldex::util::json;

#[test]
fn test_snapshot_keys_sorted() {
    let index = index_from_docs(&[("zeta", "b a"), ("alpha", "b")]);
    let snapshot = index.snapshot();

    let terms: Vec<_> = snapshot.terms.keys().cloned().collect();
    assert_eq!(terms, vec!["a", "b"]);
    let locations: Vec<_> = snapshot.terms["b"].keys().cloned().collect();
    assert_eq!(locations, vec!["alpha", "zeta"]);
    assert_eq!(snapshot.terms["b"]["zeta"], vec![1]);
}

#[test]
fn test_index_json_layout() {
    let index = index_from_docs(&[("doc", "x y x")]);
    let text = json::to_string_pretty(&index.snapshot().terms).unwrap();
    assert_eq!(
        text,
        "{\n\t\"x\": {\n\t\t\"doc\": [\n\t\t\t1,\n\t\t\t3\n\t\t]\n\t},\n\t\"y\": {\n\t\t\"doc\": [\n\t\t\t2\n\t\t]\n\t}\n}"
    );
}

#[test]
fn test_counts_json_is_flat() {
    let index = index_from_docs(&[("b", "x y"), ("a", "x")]);
    let text = json::to_string_pretty(&index.counts()).unwrap();
    assert_eq!(text, "{\n\t\"a\": 1,\n\t\"b\": 2\n}");
}

#[test]
fn test_result_json_fields_and_precision() {
    let index = index_from_docs(&[("doc1", "a b a")]);
    let results = index.search(&["a"], true);
    let text = json::to_string_pretty(&results).unwrap();
    assert_eq!(
        text,
        "[\n\t{\n\t\t\"where\": \"doc1\",\n\t\t\"count\": 2,\n\t\t\"score\": 0.66666667\n\t}\n]"
    );
}

#[test]
fn test_write_json_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counts.json");
    let index = index_from_docs(&[("doc", "one")]);

    json::write_json(&path, &index.counts()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "{\n\t\"doc\": 1\n}\n");
}

#[test]
fn test_index_export_is_terms_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    let index = index_from_docs(&[("doc1", "a b a")]);

    index.write_json(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "{\n\t\"a\": {\n\t\t\"doc1\": [\n\t\t\t1,\n\t\t\t3\n\t\t]\n\t},\n\t\"b\": {\n\t\t\"doc1\": [\n\t\t\t2\n\t\t]\n\t}\n}\n"
    );
    assert!(!written.contains("\"terms\""));
    assert!(!written.contains("\"counts\""));
}

#[test]
fn test_counts_export_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counts.json");
    let index = index_from_docs(&[("doc1", "a b a"), ("doc2", "c")]);

    index.write_counts_json(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "{\n\t\"doc1\": 3,\n\t\"doc2\": 1\n}\n");
}

#[test]
fn test_write_json_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("index.json");
    let err = json::write_json(&path, &Vec::<u8>::new()).unwrap_err();
    assert!(err.to_string().contains("index.json"));
}
