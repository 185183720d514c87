use anyhow::{Context, Result};
use std::path::Path;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime,
    PrimitiveDateTime,
};

/// Wall-clock stamp used in report filenames and the `timestamp` field.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");

pub fn ensure_dir(p: &Path) -> Result<()> {
    std::fs::create_dir_all(p).with_context(|| format!("create_dir_all {}", p.display()))
}

/// Current local wall-clock time, without offset. Falls back to UTC when the
/// local offset cannot be determined.
pub fn now_local() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}

pub fn format_timestamp(dt: PrimitiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| "1970-01-01_00-00-00".to_string())
}

pub fn parse_timestamp(s: &str) -> Result<PrimitiveDateTime> {
    PrimitiveDateTime::parse(s, TIMESTAMP_FORMAT)
        .with_context(|| format!("parsing timestamp: {s}"))
}

pub fn current_owner() -> String {
    std::env::var("USER").unwrap_or_else(|_| "unknown".to_string())
}
