use reporter::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../reporter.example.json");
    let cfg: Config = serde_json::from_str(raw).expect("parse config JSON");
    assert!(!cfg.paths.default_directory_path.is_empty());
    assert!(cfg.run.print_report);
    assert!(!cfg.aggregate.delete_malformed);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = serde_json::from_str("{}").expect("parse empty config");
    assert_eq!(cfg.paths.default_directory_path, "reports");
    assert_eq!(cfg.run.timeout_seconds, 0);
    assert_eq!(cfg.logging.level, "info");
}
