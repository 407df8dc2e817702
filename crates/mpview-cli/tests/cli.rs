use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mpview"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_input(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("input.msgpack")
}

#[test]
fn help_supports_inspect_and_view() {
    cmd().arg("inspect").arg("--help").assert().success();
    cmd().arg("view").arg("--help").assert().success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.msgpack");
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json() {
    let assert = cmd()
        .arg("inspect")
        .arg(sample_input("map"))
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["complete"], Value::Bool(true));
    assert_eq!(value["tree"]["nodes"][0]["label"], "fixmap: count 2");
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(sample_input("nested"))
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["summary"]["nodes_total"], 3);
}

#[test]
fn tree_prints_two_column_headers() {
    cmd()
        .arg("inspect")
        .arg(sample_input("map"))
        .arg("--tree")
        .assert()
        .success()
        .stdout(
            contains("Data (Type/Value/...)")
                .and(contains("Offset in HEX (Byte)"))
                .and(contains("fixmap: count 2"))
                .and(contains("0x00000000"))
                .and(contains("0x0000000C")),
        );
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(sample_input("map"))
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(sample_input("map"))
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(sample_input("map"))
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn truncated_input_warns_but_succeeds() {
    cmd()
        .arg("inspect")
        .arg(sample_input("truncated"))
        .arg("--stdout")
        .assert()
        .success()
        .stderr(contains("warning:").and(contains("truncated input")));
}

#[test]
fn strict_fails_on_truncated_input() {
    cmd()
        .arg("inspect")
        .arg(sample_input("truncated"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("decode errors detected"));
}

#[test]
fn strict_fails_on_incomplete_structure() {
    cmd()
        .arg("inspect")
        .arg(sample_input("incomplete"))
        .arg("--tree")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("decode errors detected"));
}

#[test]
fn max_depth_limit_is_exposed() {
    cmd()
        .arg("inspect")
        .arg(sample_input("nested"))
        .arg("--stdout")
        .arg("--max-depth")
        .arg("1")
        .assert()
        .success()
        .stderr(contains("nesting depth exceeded"));
}
