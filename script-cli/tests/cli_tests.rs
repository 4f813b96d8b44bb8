#![allow(clippy::unwrap_used)]
//! Integration tests for the `script-check` commands.
//!
//! Commands are parsed with `Cli::try_parse_from` and executed against
//! temporary filesets, records files and SQLite databases.

use std::fs;
use std::path::Path;

use clap::Parser;
use rusqlite::{Connection, params};
use script_cli::cli::{Cli, execute};
use tempfile::TempDir;

const ARMENIAN_VERSE: &str = "\u{0535}\u{0582} \u{0561}\u{057d}\u{0561}\u{0581}";
const CYRILLIC_VERSE: &str = "\u{0418} \u{0441}\u{043a}\u{0430}\u{0437}\u{0430}\u{043b}";

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn run(args: &[&str]) -> (anyhow::Result<bool>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut buf = Vec::new();
    let result = execute(&cli, &mut buf);
    (result, String::from_utf8(buf).unwrap())
}

fn write_plain_fileset(root: &Path, fileset: &str, body: &str) {
    let dir = root.join(fileset);
    fs::create_dir_all(&dir).unwrap();
    let header: String = (1..=10).map(|n| format!("header line {n}\n")).collect();
    fs::write(dir.join("MAT.txt"), format!("{header}{body}\n")).unwrap();
}

fn write_database(path: &Path, rows: &[(&str, &str)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch("CREATE TABLE bible_verses (fileset_id TEXT NOT NULL, verse_text TEXT);")
        .unwrap();
    for (id, text) in rows {
        conn.execute("INSERT INTO bible_verses VALUES (?1, ?2)", params![id, text])
            .unwrap();
    }
}

const RECORDS_YAML: &str = r#"
- stock_number: "B01234"
  declared_scripts:
    1: "Armenian"
  content_ids:
    - index: 1
      id: "HYEARVN1ET"
"#;

// ─────────────────────────────────────────────────────────────────────────────
// fileset
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fileset_command_passes_on_match() {
    let tmp = TempDir::new().unwrap();
    write_plain_fileset(tmp.path(), "HYEARV", ARMENIAN_VERSE);
    let root = tmp.path().to_str().unwrap();

    let (result, out) = run(&[
        "script-check",
        "fileset",
        "--location",
        root,
        "HYEARV",
        "--script",
        "Armenian",
    ]);

    assert!(result.unwrap(), "output: {out}");
    assert!(out.contains("Fileset HYEARV: OK"), "output: {out}");
}

#[test]
fn test_fileset_command_fails_on_mismatch() {
    let tmp = TempDir::new().unwrap();
    write_plain_fileset(tmp.path(), "HYEARV", CYRILLIC_VERSE);
    let root = tmp.path().to_str().unwrap();

    let (result, out) = run(&[
        "script-check",
        "fileset",
        "--location",
        root,
        "HYEARV",
        "--script",
        "Armenian",
    ]);

    assert!(!result.unwrap());
    assert!(
        out.contains("LPTS script is Armenian, but text script is Cyrillic"),
        "output: {out}"
    );
}

#[test]
fn test_fileset_command_json_output() {
    let tmp = TempDir::new().unwrap();
    write_plain_fileset(tmp.path(), "HYEARV", ARMENIAN_VERSE);
    let root = tmp.path().to_str().unwrap();

    let (result, out) = run(&[
        "script-check",
        "fileset",
        "--location",
        root,
        "HYEARV",
        "--script",
        "Armenian",
        "--format",
        "json",
    ]);

    assert!(result.unwrap());
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["result"]["script"], "ARMENIAN");
    assert_eq!(json["matched"], true);
}

#[test]
fn test_fileset_command_missing_directory_fails_softly() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_str().unwrap();

    let (result, out) = run(&["script-check", "fileset", "--location", root, "NOPE"]);

    assert!(!result.unwrap());
    assert!(out.contains("Invalid pathname"), "output: {out}");
}

// ─────────────────────────────────────────────────────────────────────────────
// records
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_records_command_clean_run() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("verses.db");
    write_database(&db, &[("HYEARVN1ET", ARMENIAN_VERSE)]);
    let records = tmp.path().join("records.yaml");
    fs::write(&records, RECORDS_YAML).unwrap();

    let (result, out) = run(&[
        "script-check",
        "records",
        "--records",
        records.to_str().unwrap(),
        "--database",
        db.to_str().unwrap(),
    ]);

    assert!(result.unwrap(), "output: {out}");
    assert!(out.contains("Content checked: 1"), "output: {out}");
}

#[test]
fn test_records_command_json_reports_mismatch() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("verses.db");
    write_database(&db, &[("HYEARVN1ET", CYRILLIC_VERSE)]);
    let records = tmp.path().join("records.yaml");
    fs::write(&records, RECORDS_YAML).unwrap();

    let (result, out) = run(&[
        "script-check",
        "records",
        "--records",
        records.to_str().unwrap(),
        "--database",
        db.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert!(!result.unwrap());
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["records"], 1);
    assert_eq!(json["mismatched"], 1);
    let message = json["errors"][0].as_str().unwrap();
    assert!(message.contains("Stock number B01234"), "message: {message}");
}

#[test]
fn test_records_command_rejects_unknown_extension() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("verses.db");
    write_database(&db, &[]);
    let records = tmp.path().join("records.csv");
    fs::write(&records, "B01234,Armenian").unwrap();

    let (result, _) = run(&[
        "script-check",
        "records",
        "--records",
        records.to_str().unwrap(),
        "--database",
        db.to_str().unwrap(),
    ]);

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Unsupported records file"), "got: {err:#}");
}
