//! End-to-end tests for the `anytwo` binary.
//!
//! Tests the full pipeline: coding sheets → compare → report + CSV export.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn anytwo_binary() -> String {
    env!("CARGO_BIN_EXE_anytwo").to_string()
}

/// Runs the binary with an isolated home so no user config is picked up.
fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(anytwo_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run anytwo")
}

fn write_sheet(dir: &Path, name: &str, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_compare_three_observers() {
    let temp = TempDir::new().unwrap();
    let sheets = temp.path().join("sheets");
    let results = temp.path().join("results");

    write_sheet(
        &sheets,
        "alice.csv",
        "Code,Start,End,Note\nACE,10:00:00,,\nACE/CON,10:05:00,10:05:10,two codes\n,10:06:00,,comment row\nDIS,08:00:00,,\n",
    );
    write_sheet(&sheets, "bob.csv", "Code,Start,End\nACE,10:00:02,\nACE,10:05:03,10:05:12\n");
    write_sheet(&sheets, "carol.csv", "Code,Start,End\nANT,10:00:01,\n");

    let output = run(
        temp.path(),
        &[
            "compare",
            "--input",
            path_arg(&sheets),
            "--output",
            path_arg(&results),
            "--json",
        ],
    );
    assert!(
        output.status.success(),
        "compare should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let pairs = value.as_array().unwrap();
    assert_eq!(pairs.len(), 3);

    // alice vs bob: ACE agrees, ACE/CON vs ACE gives one agreement and one
    // disagreement, DIS is unmatched.
    assert_eq!(pairs[0]["pair"], serde_json::json!(["alice", "bob"]));
    assert_eq!(pairs[0]["agreements"], 2);
    assert_eq!(pairs[0]["disagreements"], 1);
    assert_eq!(pairs[0]["single_points_by_owner"]["alice"], 1);
    assert_eq!(pairs[0]["single_points_by_owner"]["bob"], 0);
    assert_eq!(pairs[0]["total"], 4);
    assert_eq!(pairs[0]["any_two_ratio"], 0.5);

    assert_eq!(pairs[1]["pair"], serde_json::json!(["alice", "carol"]));
    assert_eq!(pairs[2]["pair"], serde_json::json!(["bob", "carol"]));

    assert!(results.join("summary.csv").is_file());
    let agreements =
        std::fs::read_to_string(results.join("alice_vs_bob").join("agreements.csv")).unwrap();
    assert_eq!(agreements.lines().count(), 3, "header plus two agreements");
    let singles =
        std::fs::read_to_string(results.join("alice_vs_bob").join("single_points_alice.csv"))
            .unwrap();
    assert!(singles.contains("DIS,DIS,07:59:56,08:00:04"));
}

#[test]
fn test_compare_threshold_flag_changes_matching() {
    let temp = TempDir::new().unwrap();
    let sheets = temp.path().join("sheets");
    write_sheet(&sheets, "a.csv", "Code,Start\nACE,10:00:00\n");
    write_sheet(&sheets, "b.csv", "Code,Start\nACE,10:00:06\n");

    let wide = run(
        temp.path(),
        &["compare", "-i", path_arg(&sheets), "--no-export", "--json"],
    );
    assert!(wide.status.success());
    let value: serde_json::Value = serde_json::from_slice(&wide.stdout).unwrap();
    assert_eq!(value[0]["agreements"], 1);

    let narrow = run(
        temp.path(),
        &[
            "compare",
            "-i",
            path_arg(&sheets),
            "--threshold",
            "1",
            "--no-export",
            "--json",
        ],
    );
    assert!(narrow.status.success());
    let value: serde_json::Value = serde_json::from_slice(&narrow.stdout).unwrap();
    assert_eq!(value[0]["agreements"], 0);
    assert_eq!(value[0]["single_points"], 2);
}

#[test]
fn test_compare_text_report() {
    let temp = TempDir::new().unwrap();
    let sheets = temp.path().join("sheets");
    write_sheet(&sheets, "a.csv", "Code,Start\nACE,10:00:00\n");
    write_sheet(&sheets, "b.csv", "Code,Start\nACE,10:00:02\n");

    let output = run(temp.path(), &["compare", "-i", path_arg(&sheets), "--no-export"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("a vs b\n"));
    assert!(stdout.contains("any-two agreement: 100.0%"));
}

#[test]
fn test_invalid_code_aborts_unless_skipped() {
    let temp = TempDir::new().unwrap();
    let sheets = temp.path().join("sheets");
    write_sheet(&sheets, "a.csv", "Code,Start\nACE,10:00:00\nBOGUS,10:01:00\n");
    write_sheet(&sheets, "b.csv", "Code,Start\nACE,10:00:00\n");

    let aborted = run(temp.path(), &["compare", "-i", path_arg(&sheets), "--no-export"]);
    assert!(!aborted.status.success());
    let stderr = String::from_utf8_lossy(&aborted.stderr);
    assert!(stderr.contains("invalid code"), "stderr: {stderr}");

    let skipped = run(
        temp.path(),
        &[
            "compare",
            "-i",
            path_arg(&sheets),
            "--no-export",
            "--skip-invalid",
            "--json",
        ],
    );
    assert!(skipped.status.success());
    let value: serde_json::Value = serde_json::from_slice(&skipped.stdout).unwrap();
    assert_eq!(value[0]["any_two_ratio"], 1.0);
}

#[test]
fn test_check_exit_status() {
    let temp = TempDir::new().unwrap();
    let sheets = temp.path().join("sheets");
    write_sheet(&sheets, "a.csv", "Code,Start\nACE,10:00:00\nACE,25:00:00\n");

    let failed = run(temp.path(), &["check", "-i", path_arg(&sheets)]);
    assert!(!failed.status.success());
    let stdout = String::from_utf8(failed.stdout).unwrap();
    assert!(stdout.contains("a: 1 breakdowns, 1 rejected rows"));
    assert!(stdout.contains("row 2: malformed time"));

    let tolerated = run(temp.path(), &["check", "-i", path_arg(&sheets), "--skip-invalid"]);
    assert!(tolerated.status.success());
}

#[test]
fn test_config_file_sets_columns_and_threshold() {
    let temp = TempDir::new().unwrap();
    let sheets = temp.path().join("sheets");
    write_sheet(&sheets, "a.csv", "Tags,From\nACE,10:00:00\n");
    write_sheet(&sheets, "b.csv", "Tags,From\nACE,10:00:15\n");

    let config_path = temp.path().join("anytwo.toml");
    std::fs::write(
        &config_path,
        format!(
            "input_dir = {:?}\nthreshold_secs = 10\n\n[columns]\ncodes = \"Tags\"\nstart = \"From\"\n",
            path_arg(&sheets)
        ),
    )
    .unwrap();

    let output = run(
        temp.path(),
        &[
            "--config",
            path_arg(&config_path),
            "compare",
            "--no-export",
            "--json",
        ],
    );
    assert!(
        output.status.success(),
        "compare should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["agreements"], 1);
}
