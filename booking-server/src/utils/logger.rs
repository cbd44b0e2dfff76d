//! Logging Infrastructure
//!
//! `tracing-subscriber` with an `EnvFilter`, human or JSON lines, and an
//! optional daily rolling file from `tracing-appender`.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// `level` is an EnvFilter directive string; invalid input falls back to `info`
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logger on stdout
pub fn init_logger(level: &str, json: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json, None)
}

/// Initialize the logger, writing to a daily rolling file when `log_dir` is set
pub fn init_logger_with_file(
    level: &str,
    json: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = match (log_dir, json) {
        (Some(dir), json) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "booking-server");
            let builder = builder.with_ansi(false).with_writer(appender);
            if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}
