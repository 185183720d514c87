#![cfg(unix)]

use reporter::{config::Config, runner};

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

#[test]
fn captures_output_and_exit_status() {
    let cfg = Config::default();
    let out = runner::execute(&cfg, &sh("echo out; echo err 1>&2; exit 3")).expect("execute");

    assert!(out.stdout.contains("out"));
    assert!(out.stderr.contains("err"));
    assert_eq!(out.exit_code, Some(3));
    assert!(!out.success);
}

#[test]
fn zero_exit_is_success() {
    let cfg = Config::default();
    let out = runner::execute(&cfg, &sh("exit 0")).expect("execute");

    assert!(out.success);
    assert_eq!(out.exit_code, Some(0));
}

#[test]
fn timeout_kills_the_child() {
    let mut cfg = Config::default();
    cfg.run.timeout_seconds = 1;

    let err = runner::execute(&cfg, &sh("sleep 30")).expect_err("should time out");
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn empty_program_is_rejected() {
    let cfg = Config::default();
    assert!(runner::execute(&cfg, &[]).is_err());
}
