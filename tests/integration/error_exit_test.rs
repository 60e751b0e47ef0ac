//! Failures must exit non-zero with a diagnostic and leave no partial output

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn mtgutil(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mtgutil"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run mtgutil")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_missing_input_file() {
    let output = mtgutil(&["tcg", "/no/such/deck.csv"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("IO error"));
    assert!(stderr(&output).contains("mtgutil tcg --help"));
}

#[test]
fn test_missing_column_reports_field() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.csv");
    fs::write(&input, "count,name,set_code\n1,Sol Ring,c21\n").unwrap();

    let output = mtgutil(&["tcg", path_arg(&input)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let message = stderr(&output);
    assert!(message.contains("Schema error"));
    assert!(message.contains("collector_number"));
}

#[test]
fn test_failed_run_leaves_existing_output_untouched() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.csv");
    let out = tmp.path().join("mass-entry.txt");
    fs::write(
        &input,
        "count,name,set_code,collector_number\n1,Sol Ring,c21,263\nx,Arcane Signet,c21,237\n",
    )
    .unwrap();
    fs::write(&out, "previous run").unwrap();

    let output = mtgutil(&["tcg", path_arg(&input), "--out", path_arg(&out)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Malformed record"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "previous run");
}

#[test]
fn test_failed_run_creates_no_output() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.json");
    let out = tmp.path().join("mass-entry.txt");
    fs::write(&input, r#"{"name": "no entries"}"#).unwrap();

    let output = mtgutil(&["tcg", path_arg(&input), "-o", path_arg(&out)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn test_export_over_memory_limit() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.csv");
    let mut csv = String::from("count,name,set_code,collector_number\n");
    for i in 0..200 {
        csv.push_str(&format!("1,Card {},abc,{}\n", i, i));
    }
    fs::write(&input, csv).unwrap();

    let output = mtgutil(&["tcg", path_arg(&input), "--memory-limit", "1KB"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("too large"));
    assert!(stderr(&output).contains("--memory-limit"));
}

#[test]
fn test_invalid_memory_limit() {
    let output = mtgutil(&["tcg", "deck.csv", "--memory-limit", "plenty"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid memory limit"));
}

#[test]
fn test_invalid_set_code_table() {
    let tmp = tempdir().unwrap();
    let codes = tmp.path().join("codes.json");
    fs::write(&codes, "[\"plst\"]").unwrap();

    let output = mtgutil(&["tcg", "deck.csv", "--set-codes", path_arg(&codes)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid set code table"));
}

#[test]
fn test_no_source() {
    let output = mtgutil(&["tcg"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No input provided"));
}

#[test]
fn test_unknown_section_is_usage_error() {
    let output = mtgutil(&["tcg", "deck.json", "--include", "tokens"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("tokens"));
}
