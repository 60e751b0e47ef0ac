//! End-to-end tests converting deck export files with the `mtgutil` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

const CSV_EXPORT: &str = "\
section,count,name,type_line,set,set_code,collector_number
commanders,1,\"Kurbis, Harvest Celebrant\",Legendary Creature,Bloomburrow Commander,blc,4
nonlands,1,Sol Ring,Artifact,Commander 2021,c21,263
lands,10,Forest,Basic Land,Bloomburrow,blb,278
";

const JSON_EXPORT: &str = r#"{
  "name": "Kenrith",
  "entries": {
    "commanders": [
      {"count": 1, "printing_specified": true,
       "card_digest": {"name": "Kenrith, the Returned King", "set": "eld", "collector_number": "303"}}
    ],
    "nonlands": [
      {"count": 1, "printing_specified": false,
       "card_digest": {"name": "Sol Ring", "set": "c21", "collector_number": "263"}}
    ],
    "sideboard": [
      {"count": 1, "printing_specified": true,
       "card_digest": {"name": "Arcane Signet", "set": "c21", "collector_number": "237"}}
    ]
  }
}"#;

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

#[test]
fn test_csv_file_to_stdout() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck-kurbis.csv");
    fs::write(&input, CSV_EXPORT).unwrap();

    let output = mtgutil(&["tcg", path_arg(&input)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("1 Kurbis, Harvest Celebrant [BLC] 4\n1 Sol Ring [C21] 263\n"));
    assert!(stdout.contains("| NOTE:"));
    assert!(stdout.ends_with("Forest (278) - Bloomburrow (BLB)\n"));
}

#[test]
fn test_json_file_to_output_file() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck-kenrith.json");
    let out = tmp.path().join("out/mass-entry.txt");
    fs::write(&input, JSON_EXPORT).unwrap();

    let output = mtgutil(&["--quiet", "tcg", path_arg(&input), "--out", path_arg(&out)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "1 Kenrith, the Returned King [ELD] 303\n1 Sol Ring"
    );
}

#[test]
fn test_include_all_sections() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.json");
    fs::write(&input, JSON_EXPORT).unwrap();

    let output = mtgutil(&["tcg", path_arg(&input), "--include", "all"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "1 Kenrith, the Returned King [ELD] 303\n1 Sol Ring\n1 Arcane Signet [C21] 237\n"
    );
}

#[test]
fn test_format_detected_from_content() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.export");
    fs::write(&input, JSON_EXPORT).unwrap();

    let output = mtgutil(&["tcg", path_arg(&input)]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .starts_with("1 Kenrith"));
}

#[test]
fn test_set_code_file() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.csv");
    let codes = tmp.path().join("codes.json");
    fs::write(
        &input,
        "count,name,set_code,collector_number\n1,Path to Exile,plst,CON-15\n",
    )
    .unwrap();
    fs::write(&codes, r#"{"plst": "list"}"#).unwrap();

    let output = mtgutil(&["tcg", path_arg(&input), "--set-codes", path_arg(&codes)]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "1 Path to Exile [LIST] CON-15\n"
    );
}

#[test]
fn test_stats_go_to_stderr() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("deck.csv");
    fs::write(&input, CSV_EXPORT).unwrap();

    let output = mtgutil(&["tcg", path_arg(&input), "--stats"]);
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Conversion Statistics:"));
    assert!(stderr.contains("Split names repaired: 1"));
    assert!(!String::from_utf8(output.stdout)
        .unwrap()
        .contains("Conversion Statistics:"));
}

#[test]
fn test_help_lists_known_limitations() {
    let output = mtgutil(&["tcg", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Known limitations"));
    assert!(stdout.contains("--include"));
}
