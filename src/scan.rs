use crate::{report, report::Report, util};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use time::Duration;
use tracing::{debug, warn};

pub struct ScanOptions {
    /// Keep only reports stamped within this much of now.
    pub newer_than: Option<Duration>,
    /// Delete files that fail to parse instead of just skipping them.
    pub sanitize_errored: bool,
}

/// A parsed report plus the file it came from.
#[derive(Debug)]
pub struct LoadedReport {
    pub report: Report,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub reports: Vec<LoadedReport>,
    pub skipped_malformed: u32,
    pub removed: u32,
    pub outside_window: u32,
}

/// Scan a report directory: list entries, keep filenames shaped like
/// `<program>_<timestamp>.report`, parse each one, and apply the recency
/// window. Malformed files are skipped with a warning, or deleted when
/// sanitizing is requested.
pub fn scan_directory(dir: &Path, opts: &ScanOptions) -> Result<ScanOutcome> {
    let pattern = Regex::new(
        r"^[A-Za-z0-9]+_\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.report$",
    )?;
    // A window reaching past the representable time range filters nothing.
    let cutoff = opts
        .newer_than
        .and_then(|window| util::now_local().checked_sub(window));

    let mut outcome = ScanOutcome::default();

    let entries =
        std::fs::read_dir(dir).with_context(|| format!("listing directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !pattern.is_match(&name) {
            debug!("not a report file, skipping: {name}");
            continue;
        }

        let path = entry.path();
        let loaded = report::read_report(&path)
            .and_then(|r| util::parse_timestamp(&r.timestamp).map(|ts| (r, ts)));
        let (parsed, stamp) = match loaded {
            Ok(pair) => pair,
            Err(err) => {
                warn!("malformed report {}: {:#}", path.display(), err);
                outcome.skipped_malformed += 1;
                if opts.sanitize_errored {
                    std::fs::remove_file(&path)
                        .with_context(|| format!("removing malformed report: {}", path.display()))?;
                    outcome.removed += 1;
                }
                continue;
            }
        };

        if let Some(cutoff) = cutoff {
            if stamp < cutoff {
                outcome.outside_window += 1;
                continue;
            }
        }

        outcome.reports.push(LoadedReport {
            report: parsed,
            path,
        });
    }

    Ok(outcome)
}
