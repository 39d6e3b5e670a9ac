use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn tokoh() -> Command {
    cargo_bin_cmd!("tokoh").into()
}

/// Write `content` into a fresh tempdir. The tempdir guard must be kept alive.
fn write_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    (tmp, path)
}

fn mention(story: u32, sentence: u32, surface: &str) -> Value {
    serde_json::json!({
        "story_id": story,
        "sentence_id": sentence,
        "surface_form": surface,
    })
}

fn malin_kundang() -> String {
    let mentions = vec![
        mention(1, 0, "Malin Kundang"),
        mention(1, 1, "Mande Rubayah"),
        mention(1, 2, "Ibunya"),
        mention(1, 3, "Malin"),
        mention(1, 4, "Ibu Malin"),
        mention(1, 5, "Orang tuanya"),
        mention(1, 6, "Ayahnya"),
    ];
    Value::Array(mentions).to_string()
}

fn resolve_rows(path: &Path, extra: &[&str]) -> Vec<Value> {
    let output = tokoh()
        .arg("resolve")
        .arg(path)
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    rows.as_array().unwrap().clone()
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    tokoh()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tokoh"));
}

#[test]
fn missing_subcommand_fails() {
    tokoh().assert().failure();
}

// --- Normalize ---

#[test]
fn normalize_strips_clitics() {
    tokoh()
        .args(["normalize", "Ibunya", "Sang Putrilah", "Allah"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ibunya\tibu"))
        .stdout(predicate::str::contains("Sang Putrilah\tsang putri"))
        .stdout(predicate::str::contains("Allah\tallah"));
}

#[test]
fn normalize_requires_an_alias() {
    tokoh().arg("normalize").assert().failure();
}

// --- Role ---

#[test]
fn role_lookup() {
    tokoh()
        .args(["role", "Pak Tani", "Ibunya", "si Kancil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pak tani\tayah"))
        .stdout(predicate::str::contains("ibu\tibu"))
        .stdout(predicate::str::contains("si kancil\t-"));
}

// --- Config ---

#[test]
fn config_prints_builtin_tables() {
    tokoh()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pointers\""))
        .stdout(predicate::str::contains("\"orang tua\""));
}

#[test]
fn config_override_is_applied() {
    let (_tmp, config) = write_file(
        "tables.json",
        r#"{"normalizer": {"exceptions": ["ibunya"]}}"#,
    );
    tokoh()
        .arg("--config")
        .arg(&config)
        .args(["normalize", "Ibunya"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ibunya\tibunya"));
}

#[test]
fn invalid_config_is_rejected() {
    let (_tmp, config) = write_file("tables.json", r#"{"clustering": {"pointers": ["Ibu"]}}"#);
    tokoh()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lowercase"));
}

// --- Resolve ---

#[test]
fn resolve_story() {
    let (_tmp, input) = write_file("mentions.json", &malin_kundang());
    let rows = resolve_rows(&input, &[]);

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["person"], "Tokoh-1");
    assert_eq!(
        rows[0]["aliases"],
        serde_json::json!(["ibu", "ibu malin", "orang tuanya"])
    );
    assert_eq!(rows[0]["role"], "ibu");
    assert_eq!(rows[0]["sentence_ids"], serde_json::json!([2, 4, 5]));
    assert_eq!(rows[1]["role"], "ayah");
    assert_eq!(rows[2]["aliases"], serde_json::json!(["malin", "malin kundang"]));
    assert!(rows[2]["role"].is_null());
}

#[test]
fn resolve_orders_rows_by_story() {
    let mentions = Value::Array(vec![
        mention(7, 0, "Sang Kancil"),
        mention(3, 0, "Buaya"),
        mention(7, 1, "Kancil"),
    ]);
    let (_tmp, input) = write_file("mentions.json", &mentions.to_string());
    let rows = resolve_rows(&input, &["--pretty"]);

    let stories: Vec<u64> = rows.iter().map(|r| r["story_id"].as_u64().unwrap()).collect();
    assert_eq!(stories, vec![3, 7]);
    assert_eq!(rows[1]["aliases"], serde_json::json!(["kancil", "sang kancil"]));
    assert_eq!(rows[1]["person"], "Tokoh-1");
}

#[test]
fn resolve_reads_stdin() {
    tokoh()
        .args(["resolve", "-"])
        .write_stdin(malin_kundang())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Tokoh-4\""));
}

#[test]
fn resolve_prints_stats() {
    let (_tmp, input) = write_file("mentions.json", &malin_kundang());
    tokoh()
        .arg("resolve")
        .arg(&input)
        .arg("--stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("story 1: 7 mentions"))
        .stderr(predicate::str::contains("1 stories, 7 mentions, 4 persons"));
}

#[test]
fn resolve_empty_stream() {
    let (_tmp, input) = write_file("mentions.json", "[]");
    tokoh()
        .arg("resolve")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn resolve_rejects_malformed_input() {
    let (_tmp, input) = write_file("mentions.json", r#"[{"story_id": 1}]"#);
    tokoh()
        .arg("resolve")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mention stream"));
}

#[test]
fn resolve_missing_file() {
    tokoh()
        .args(["resolve", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
