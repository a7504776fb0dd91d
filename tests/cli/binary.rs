//! Runs the `ringq` executable and inspects its output and exit status

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn ringq() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ringq"));
    // Keep a real user config out of the picture
    command.env("XDG_CONFIG_HOME", "/nonexistent/ringq-test-config");
    command.args(["--no-color", "-q"]);
    command
}

#[test]
fn test_json_report_for_small_run() {
    let output = ringq()
        .args(["-n", "8", "-i", "2000", "-g", "0", "--no-work", "--record", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let run = &value["runs"][0];
    assert_eq!(run["stats"]["consumed"], 4000);
    assert_eq!(run["stats"]["dropped"], 0);
    assert_eq!(run["correct"], true);
    assert_eq!(run["lossless"], true);
    assert_eq!(run["verification"]["duplicates"], 0);
    assert_eq!(run["verification"]["missing"], 0);
}

#[test]
fn test_csv_with_several_runs() {
    let output = ringq()
        .args(["-n", "4", "-i", "500", "-g", "0", "--no-work", "--runs", "3", "-o", "csv"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("run,capacity,"));
    assert!(lines[3].starts_with("3,4,"));
}

#[test]
fn test_text_report_uses_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "capacity = 2\nitems = 300\ngrace-ms = 0\nwork-every = 0").unwrap();

    let output = ringq()
        .arg("--config-file")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("capacity 2"), "got: {}", stdout);
    assert!(stdout.contains("Correctness: CORRECT"), "got: {}", stdout);
}

#[test]
fn test_errors_exit_with_status_one() {
    let missing = ringq()
        .args(["--config-file", "/definitely/not/here/ringq.toml"])
        .output()
        .unwrap();
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("does not exist"));

    let zero_consumers = ringq().args(["-C", "0"]).output().unwrap();
    assert_eq!(zero_consumers.status.code(), Some(1));
}

#[test]
fn test_long_version_includes_build_metadata() {
    let output = Command::new(env!("CARGO_BIN_EXE_ringq"))
        .arg("--version")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
