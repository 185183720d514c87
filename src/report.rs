use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One JSON record describing a single program execution's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub success: bool,
    pub message: String,
    pub program: String,
    pub timestamp: String,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

pub const REPORT_EXTENSION: &str = "report";
pub const LOG_EXTENSION: &str = "log";

/// Program names are reduced to ASCII alphanumerics before they land in a
/// filename; anything else (paths, dashes, unicode) is stripped.
pub fn sanitize_program_name(program: &str) -> String {
    let cleaned: String = program.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.is_empty() {
        "program".to_string()
    } else {
        cleaned
    }
}

pub fn report_path(dir: &Path, program: &str, timestamp: &str) -> PathBuf {
    stamped_path(dir, program, timestamp, REPORT_EXTENSION)
}

pub fn log_path(dir: &Path, program: &str, timestamp: &str) -> PathBuf {
    stamped_path(dir, program, timestamp, LOG_EXTENSION)
}

fn stamped_path(dir: &Path, program: &str, timestamp: &str, ext: &str) -> PathBuf {
    let name = format!("{}_{}.{}", sanitize_program_name(program), timestamp, ext);
    dir.join(name)
}

pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let raw = serde_json::to_string_pretty(report)?;
    std::fs::write(path, raw).with_context(|| format!("writing report: {}", path.display()))
}

pub fn read_report(path: &Path) -> Result<Report> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading report: {}", path.display()))?;
    let report: Report = serde_json::from_str(&raw)
        .with_context(|| format!("parsing report JSON: {}", path.display()))?;
    Ok(report)
}
