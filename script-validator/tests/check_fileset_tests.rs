//! Integration tests for `script_validator::check_fileset_at`.

use std::fs;
use std::path::Path;

use script_validator::{
    ErrorLog, MemoryObjectStore, SourceConfig, SourceIssueKind, ValidationConfig,
    check_fileset_at, output,
};
use tempfile::TempDir;

const GREEK_TEXT: &str = "\u{0395}\u{03bd} \u{03b1}\u{03c1}\u{03c7}\u{03b7} \u{03b7}\u{03bd}";

fn header() -> String {
    (1..=10).map(|n| format!("<meta n=\"{n}\">Header</meta>\n")).collect()
}

fn usx_file(body: &str) -> String {
    format!("{}<usx version=\"3.0\">\n<verse number=\"1\"/>{body}\n</usx>\n", header())
}

fn write_fileset(root: &Path, fileset: &str, files: &[(&str, &str)]) {
    let dir = root.join(fileset);
    fs::create_dir_all(&dir).unwrap();
    for (name, body) in files {
        fs::write(dir.join(name), body).unwrap();
    }
}

fn check_local(
    root: &Path,
    fileset: &str,
    declared: Option<&str>,
    log: &mut ErrorLog,
) -> script_validator::FilesetReport {
    check_fileset_at(
        root.to_str().unwrap(),
        None,
        fileset,
        declared,
        &SourceConfig::default(),
        &ValidationConfig::default(),
        log,
    )
    .unwrap()
}

#[test]
fn test_local_fileset_matches() {
    let tmp = TempDir::new().unwrap();
    write_fileset(
        tmp.path(),
        "GRKWHN",
        &[
            ("MAT.usx", usx_file(GREEK_TEXT).as_str()),
            ("MRK.usx", usx_file(GREEK_TEXT).as_str()),
            ("Thumbs.db", "ignored"),
            (".hidden.usx", "In the beginning"),
        ],
    );
    let mut log = ErrorLog::new();

    let report = check_local(tmp.path(), "GRKWHN", Some("Greek"), &mut log);

    assert!(report.ok(), "issues: {:?}", report.source_issues);
    assert_eq!(report.files_checked(), 2);
    assert_eq!(report.result.script.as_deref(), Some("GREEK"));
    assert!(log.is_empty(), "unexpected: {:?}", log.messages());
}

#[test]
fn test_local_fileset_mismatch() {
    let tmp = TempDir::new().unwrap();
    write_fileset(tmp.path(), "GRKWHN", &[("MAT.usx", usx_file("In the beginning").as_str())]);
    let mut log = ErrorLog::new();

    let report = check_local(tmp.path(), "GRKWHN", Some("Greek"), &mut log);

    assert!(!report.matched);
    assert_eq!(log.len(), 1);
    assert!(log.messages()[0].contains("LPTS script is Greek, but text script is Latin"));
}

#[test]
fn test_local_missing_fileset_is_soft_failure() {
    let tmp = TempDir::new().unwrap();
    let mut log = ErrorLog::new();

    let report = check_local(tmp.path(), "NOPE", Some("Latin"), &mut log);

    assert_eq!(report.source_issues.len(), 1);
    assert_eq!(report.source_issues[0].kind, SourceIssueKind::InvalidDirectory);
    assert!(log.messages()[0].starts_with("ERROR: Invalid pathname"));
}

#[test]
fn test_local_fileset_without_text_files_is_ok() {
    let tmp = TempDir::new().unwrap();
    write_fileset(tmp.path(), "ENGESVN2DA", &[("B01___01_Matthew.mp3", "ID3")]);
    let mut log = ErrorLog::new();

    let report = check_local(tmp.path(), "ENGESVN2DA", Some("Latin"), &mut log);

    assert!(report.ok());
    assert_eq!(report.files_checked(), 0);
    assert!(log.is_empty());
}

#[test]
fn test_object_store_fileset() {
    let mut store = MemoryObjectStore::new();
    store.put_object("dbp-prod", "GRKWHN/MAT.usx", usx_file(GREEK_TEXT));
    store.put_object("dbp-prod", "GRKWHN/Thumbs.db", "ignored");
    let mut log = ErrorLog::new();

    let report = check_fileset_at(
        "s3://dbp-prod",
        Some(&store),
        "GRKWHN",
        Some("Greek"),
        &SourceConfig::default(),
        &ValidationConfig::default(),
        &mut log,
    )
    .unwrap();

    assert!(report.ok());
    assert_eq!(report.source, "s3://dbp-prod");
    assert_eq!(report.files[0].name, "MAT.usx");
}

#[test]
fn test_object_store_empty_prefix_is_soft_failure() {
    let mut store = MemoryObjectStore::new();
    store.create_bucket("dbp-prod");
    let mut log = ErrorLog::new();

    let report = check_fileset_at(
        "s3://dbp-prod",
        Some(&store),
        "GRKWHN",
        Some("Greek"),
        &SourceConfig::default(),
        &ValidationConfig::default(),
        &mut log,
    )
    .unwrap();

    assert_eq!(report.source_issues[0].kind, SourceIssueKind::EmptyListing);
    assert_eq!(
        log.messages(),
        ["ERROR: Invalid bucket dbp-prod or prefix GRKWHN/".to_owned()]
    );
}

#[test]
fn test_malformed_location_is_fatal() {
    let mut log = ErrorLog::new();
    let result = check_fileset_at(
        "s3://",
        None,
        "GRKWHN",
        None,
        &SourceConfig::default(),
        &ValidationConfig::default(),
        &mut log,
    );
    assert!(result.is_err());
    assert!(log.is_empty());
}

#[test]
fn test_fileset_json_output_contract() {
    let tmp = TempDir::new().unwrap();
    write_fileset(tmp.path(), "GRKWHN", &[("MAT.usx", usx_file(GREEK_TEXT).as_str())]);
    let mut log = ErrorLog::new();
    let report = check_local(tmp.path(), "GRKWHN", Some("Greek"), &mut log);

    let mut buf = Vec::new();
    output::write_json(&report, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(json["fileset"], "GRKWHN");
    assert_eq!(json["declared_script"], "Greek");
    assert_eq!(json["result"]["script"], "GREEK");
    assert_eq!(json["result"]["confidence"], 100);
    assert_eq!(json["matched"], true);
    assert_eq!(json["files"][0]["name"], "MAT.usx");
    assert_eq!(json["files"][0]["script"], "GREEK");
    assert!(json["source_issues"].as_array().unwrap().is_empty());
}
