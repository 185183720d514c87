use crate::{
    config::Config,
    report::{self, Report},
    runner, scan,
    summary::Summary,
    util::{current_owner, ensure_dir, format_timestamp, now_local},
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "reporter")]
#[command(about = "Run a program, persist a JSON report, summarize past runs")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config JSON. If omitted, uses ./reporter.json or
    /// /etc/reporter/config.json if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a program and write a report record for it.
    Run {
        /// Report directory. Defaults to the config's default_directory_path.
        #[arg(long)]
        path: Option<PathBuf>,
        /// Store the captured stdout/stderr inside the report record.
        #[arg(long)]
        save_output: bool,
        /// Write the captured stdout to a sibling .log file.
        #[arg(long)]
        save_log: bool,
        /// Program and its arguments, after `--`.
        #[arg(last = true, required = true)]
        program: Vec<String>,
    },
    /// Summarize the report records in a directory.
    Total {
        /// Report directory. Defaults to the config's default_directory_path.
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        last_days: Option<u64>,
        #[arg(long)]
        last_hours: Option<u64>,
        #[arg(long)]
        last_minutes: Option<u64>,
        /// Delete report files that fail to parse.
        #[arg(long)]
        sanitize_errored: bool,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;

    match &args.cmd {
        Command::Run {
            path,
            save_output,
            save_log,
            program,
        } => {
            let dir = resolve_report_dir(&cfg, path.as_deref())?;
            let _guard = init_logging(&args, &cfg, &dir)?;
            run(&cfg, &dir, *save_output, *save_log, program)
        }
        Command::Total {
            path,
            last_days,
            last_hours,
            last_minutes,
            sanitize_errored,
        } => {
            let dir = resolve_report_dir(&cfg, path.as_deref())?;
            let _guard = init_logging(&args, &cfg, &dir)?;
            let window = resolve_window(*last_days, *last_hours, *last_minutes)?;
            total(&cfg, &dir, window, *sanitize_errored)
        }
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    for candidate in ["reporter.json", "/etc/reporter/config.json"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Config::load(&p);
        }
    }
    Ok(Config::default())
}

fn resolve_report_dir(cfg: &Config, user: Option<&Path>) -> Result<PathBuf> {
    let dir = user
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.default_directory_path));
    ensure_dir(&dir)?;
    Ok(dir)
}

fn init_logging(args: &Args, cfg: &Config, report_dir: &Path) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = resolve_log_path(cfg, report_dir) {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config, report_dir: &Path) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(report_dir.join("reporter.log"))
}

fn run(cfg: &Config, dir: &Path, save_output: bool, save_log: bool, program: &[String]) -> Result<()> {
    let progname = program
        .first()
        .ok_or_else(|| anyhow!("no program given"))?
        .clone();

    info!("running {progname}, reports go to {}", dir.display());

    let outcome = runner::execute(cfg, program)?;
    if !outcome.success {
        warn!(
            "{progname} exited unsuccessfully (code {:?})",
            outcome.exit_code
        );
    }

    let timestamp = format_timestamp(now_local());
    let mut record = Report {
        success: outcome.success,
        message: if outcome.success { "Success" } else { "Failure" }.to_string(),
        program: progname.clone(),
        timestamp: timestamp.clone(),
        owner: current_owner(),
        stdout: None,
        stderr: None,
    };
    if save_output {
        record.stdout = Some(outcome.stdout.clone());
        record.stderr = Some(outcome.stderr.clone());
    }

    if cfg.run.print_report {
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    if save_log {
        let lpath = report::log_path(dir, &progname, &timestamp);
        info!("log path: {}", lpath.display());
        std::fs::write(&lpath, &outcome.stdout)
            .with_context(|| format!("writing log: {}", lpath.display()))?;
    }

    let rpath = report::report_path(dir, &progname, &timestamp);
    info!("report path: {}", rpath.display());
    report::write_report(&record, &rpath)?;

    Ok(())
}

fn total(
    cfg: &Config,
    dir: &Path,
    window: Option<Duration>,
    sanitize_errored: bool,
) -> Result<()> {
    let opts = scan::ScanOptions {
        newer_than: window,
        sanitize_errored: sanitize_errored || cfg.aggregate.delete_malformed,
    };

    let outcome = scan::scan_directory(dir, &opts)?;
    info!(
        "scanned {}: {} report(s), {} malformed, {} outside window",
        dir.display(),
        outcome.reports.len(),
        outcome.skipped_malformed,
        outcome.outside_window
    );

    let summary = Summary::from_scan(&outcome);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Sum the `--last-*` flags into one recency window. `None` when no flag was
/// given.
pub fn resolve_window(
    days: Option<u64>,
    hours: Option<u64>,
    minutes: Option<u64>,
) -> Result<Option<Duration>> {
    if days.is_none() && hours.is_none() && minutes.is_none() {
        return Ok(None);
    }
    let seconds = days
        .unwrap_or(0)
        .checked_mul(86_400)
        .zip(hours.unwrap_or(0).checked_mul(3_600))
        .and_then(|(d, h)| d.checked_add(h))
        .zip(minutes.unwrap_or(0).checked_mul(60))
        .and_then(|(s, m)| s.checked_add(m))
        .and_then(|s| i64::try_from(s).ok())
        .ok_or_else(|| anyhow!("--last-days/--last-hours/--last-minutes overflow"))?;
    Ok(Some(Duration::seconds(seconds)))
}
