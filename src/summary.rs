use crate::scan::{LoadedReport, ScanOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total: u32,
    pub success: u32,
    pub failed: u32,
    pub skipped_malformed: u32,
    pub removed: u32,
    pub unsuccessful: Vec<Unsuccessful>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unsuccessful {
    pub program: String,
    pub message: String,
    pub path: String,
}

impl Summary {
    pub fn from_scan(outcome: &ScanOutcome) -> Self {
        let success = outcome
            .reports
            .iter()
            .filter(|r| r.report.success)
            .count() as u32;
        let total = outcome.reports.len() as u32;

        let unsuccessful = outcome
            .reports
            .iter()
            .filter(|r| !r.report.success)
            .map(Unsuccessful::from_loaded)
            .collect();

        Self {
            total,
            success,
            failed: total - success,
            skipped_malformed: outcome.skipped_malformed,
            removed: outcome.removed,
            unsuccessful,
        }
    }
}

impl Unsuccessful {
    fn from_loaded(loaded: &LoadedReport) -> Self {
        Self {
            program: loaded.report.program.clone(),
            message: loaded.report.message.clone(),
            path: loaded.path.display().to_string(),
        }
    }
}
