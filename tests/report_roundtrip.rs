use reporter::report::{self, Report};

fn mk_report(save_output: bool) -> Report {
    Report {
        success: false,
        message: "Failure".into(),
        program: "make".into(),
        timestamp: "2026-08-23_14-03-12".into(),
        owner: "ci".into(),
        stdout: save_output.then(|| "build output\n".to_string()),
        stderr: save_output.then(|| "warning: x\n".to_string()),
    }
}

#[test]
fn write_then_read_yields_identical_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let r = mk_report(true);

    let path = report::report_path(dir.path(), &r.program, &r.timestamp);
    report::write_report(&r, &path).expect("write report");
    let back = report::read_report(&path).expect("read report");

    assert_eq!(back, r);
}

#[test]
fn output_fields_are_omitted_when_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let r = mk_report(false);

    let path = report::report_path(dir.path(), &r.program, &r.timestamp);
    report::write_report(&r, &path).expect("write report");

    let raw = std::fs::read_to_string(&path).expect("read raw");
    assert!(!raw.contains("stdout"));
    assert!(!raw.contains("stderr"));
}

#[test]
fn program_names_are_stripped_to_alphanumerics() {
    assert_eq!(report::sanitize_program_name("make"), "make");
    assert_eq!(report::sanitize_program_name("./bin/my-tool2"), "binmytool2");
    assert_eq!(report::sanitize_program_name("---"), "program");

    let path = report::report_path(
        std::path::Path::new("reports"),
        "./run.sh",
        "2026-08-23_14-03-12",
    );
    assert_eq!(
        path,
        std::path::PathBuf::from("reports/runsh_2026-08-23_14-03-12.report")
    );
}
