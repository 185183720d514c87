use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub run: Run,
    #[serde(default)]
    pub aggregate: Aggregate,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&raw).with_context(|| "parsing config JSON")?;
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: Default::default(),
            run: Default::default(),
            aggregate: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    pub default_directory_path: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            default_directory_path: "reports".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// 0 means no timeout.
    pub timeout_seconds: u64,
    pub print_report: bool,
}
impl Default for Run {
    fn default() -> Self {
        Self {
            timeout_seconds: 0,
            print_report: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aggregate {
    pub delete_malformed: bool,
}
impl Default for Aggregate {
    fn default() -> Self {
        Self {
            delete_malformed: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
