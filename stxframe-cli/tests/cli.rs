//! Tests running the `stxframe` binary end to end

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stxframe-cli-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

fn stxframe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stxframe"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run stxframe")
}

#[test]
fn test_failure_is_written_to_log_file() {
    let dir = scratch_dir("log-file");
    let log = dir.join("run.log");
    let missing = dir.join("missing.json");

    let output = stxframe(&[
        "--log-file",
        log.to_str().unwrap(),
        "inspect",
        missing.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));

    let contents = fs::read_to_string(&log).expect("Log file must exist");
    assert!(contents.contains("ERROR"), "log file missing the failure: {:?}", contents);
    assert!(contents.contains("Failed to load"), "got {:?}", contents);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_io_cause_reported_once() {
    let dir = scratch_dir("io-cause");
    let missing = dir.join("missing.json");

    let output = stxframe(&["inspect", missing.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let error_line = stderr
        .lines()
        .find(|line| line.contains("Failed to load"))
        .expect("error line on stderr");
    assert!(error_line.contains("I/O error: "), "got {:?}", error_line);

    let cause = error_line.rsplit("I/O error: ").next().unwrap();
    assert_eq!(error_line.matches(cause).count(), 1, "cause repeated: {:?}", error_line);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_validate_rejects_corrupted_wire_bytes() {
    let good = concat!(
        "020e",
        "48656c6c6f2041726475696e6f21",
        "000000000000000000000000000000000000",
        "1a",
        "03",
        "00"
    );
    let output = stxframe(&["validate", good]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("VALID - valid packet"));

    let bad = format!("ff{}", &good[2..]);
    let output = stxframe(&["validate", &bad]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("INVALID - invalid start byte"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Packet rejected: invalid start byte"));
}
