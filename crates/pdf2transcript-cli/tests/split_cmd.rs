//! Integration tests for the `split` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

#[test]
fn split_writes_numbered_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("outline.json");
    let out_dir = dir.path().join("parts");
    let data = json!([
        {"name": "Part One", "children": [1, 2]},
        {"name": "Part Two"},
    ]);
    std::fs::write(&input, serde_json::to_string(&data).unwrap()).unwrap();

    Command::cargo_bin("pdf2transcript")
        .unwrap()
        .arg("split")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 01.json (Part One)"))
        .stdout(predicate::str::contains("Wrote 02.json (Part Two)"))
        .stdout(predicate::str::contains("2 files written to"));

    let first: Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("01.json")).unwrap()).unwrap();
    assert_eq!(first, json!({"name": "Part One", "children": [1, 2]}));
    let second: Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("02.json")).unwrap()).unwrap();
    assert_eq!(second, json!({"name": "Part Two"}));
}

#[test]
fn split_output_is_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("outline.json");
    let out_dir = dir.path().join("parts");
    std::fs::write(&input, r#"[{"name":"x","n":1}]"#).unwrap();

    Command::cargo_bin("pdf2transcript")
        .unwrap()
        .arg("split")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success();

    let written = std::fs::read_to_string(out_dir.join("01.json")).unwrap();
    // Multi-line with 2-space indentation, not the compact input form.
    assert!(written.contains("\n  \"name\""));
}

#[test]
fn split_element_without_name_logs_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("items.json");
    let out_dir = dir.path().join("parts");
    std::fs::write(&input, r#"[{"title": "unnamed"}, 42]"#).unwrap();

    Command::cargo_bin("pdf2transcript")
        .unwrap()
        .arg("split")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 01.json (no name)"))
        .stdout(predicate::str::contains("Wrote 02.json (no name)"));
}

#[test]
fn split_rejects_non_array_root_before_creating_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("object.json");
    let out_dir = dir.path().join("parts");
    std::fs::write(&input, r#"{"name": "not an array"}"#).unwrap();

    Command::cargo_bin("pdf2transcript")
        .unwrap()
        .arg("split")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "expected a top-level JSON array, got an object",
        ));

    // Malformed input must leave no filesystem trace.
    assert!(!out_dir.exists());
}

#[test]
fn split_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(&input, "[1, 2,").unwrap();

    Command::cargo_bin("pdf2transcript")
        .unwrap()
        .arg("split")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("parts"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: invalid JSON"));
}

#[test]
fn split_missing_input_fails_with_message() {
    Command::cargo_bin("pdf2transcript")
        .unwrap()
        .arg("split")
        .arg("/nonexistent/outline.json")
        .arg("-o")
        .arg("/tmp/should-not-exist-pdf2transcript")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: file not found: /nonexistent/outline.json",
        ));
}

#[test]
fn split_empty_array_writes_nothing_but_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    let out_dir = dir.path().join("parts");
    std::fs::write(&input, "[]").unwrap();

    Command::cargo_bin("pdf2transcript")
        .unwrap()
        .arg("split")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 files written to"));

    assert!(out_dir.exists());
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 0);
}
