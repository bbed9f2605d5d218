//! Tests for reading corpus files from disk.

use std::fs;
use std::io::Write;

use kashmir_ingest::{CorpusReader, IngestError, read_corpus};

const CORPUS: &str = "Pedro, english, 23, Rio de Janeiro\n\
                      Brian, french, 30, New York\n\
                      Mark, english, , San Francisco";

#[test]
fn reads_corpus_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("knowledge_base.txt");
    fs::write(&path, CORPUS).expect("write corpus");

    let instances = read_corpus(&path).expect("read corpus");
    assert_eq!(
        instances,
        vec![
            "Pedro, english, 23, Rio de Janeiro",
            "Brian, french, 30, New York",
            "Mark, english, , San Francisco",
        ]
    );
}

#[test]
fn malformed_lines_are_skipped() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(b"Pedro, english, 23, Rio\n\xc3\x28, broken\nBrian, french, 30, NY\n")
        .expect("write corpus");

    let instances = read_corpus(file.path()).expect("read corpus");
    assert_eq!(
        instances,
        vec!["Pedro, english, 23, Rio", "Brian, french, 30, NY"]
    );
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent.txt");

    let error = CorpusReader::open(&path).expect_err("missing file");
    assert!(matches!(error, IngestError::Open { .. }));
    assert!(error.to_string().contains("absent.txt"));
    assert!(matches!(read_corpus(&path), Err(IngestError::Open { .. })));
}

#[test]
fn reader_counts_physical_lines() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("corpus.txt");
    fs::write(&path, "a\n\nb\n").expect("write corpus");

    let mut reader = CorpusReader::open(&path).expect("open corpus");
    let items: Vec<String> = reader.by_ref().map(|item| item.expect("line")).collect();
    assert_eq!(items, vec!["a", "b"]);
    assert_eq!(reader.line_number(), 3);
}
