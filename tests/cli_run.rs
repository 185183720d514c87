#![cfg(unix)]

use std::process::Command;

fn reporter_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reporter"))
}

#[test]
fn malformed_config_reports_on_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("config.json");
    std::fs::write(&cfg, "{ not json").unwrap();

    let out = reporter_bin()
        .arg("--config")
        .arg(&cfg)
        .arg("total")
        .output()
        .expect("run reporter");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("parsing config JSON"), "stderr: {stderr}");
}

#[test]
fn failing_child_still_exits_zero_and_records_failure() {
    let dir = tempfile::tempdir().expect("tempdir");

    let out = reporter_bin()
        .args(["--config", "reporter.example.json", "run", "--path"])
        .arg(dir.path())
        .args(["--", "sh", "-c", "exit 7"])
        .output()
        .expect("run reporter");

    // The reporter's own exit code stays 0; only the record says Failure.
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .expect("list report dir")
        .collect::<Result<_, _>>()
        .expect("read entries");
    assert_eq!(entries.len(), 1);

    let record = reporter::report::read_report(&entries[0].path()).expect("read report");
    assert!(!record.success);
    assert_eq!(record.message, "Failure");
    assert_eq!(record.program, "sh");
}
