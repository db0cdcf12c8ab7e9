//! Tracing subscriber setup

use crate::config::{LogFormat, LoggingConfig};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, replaces the configured level entirely.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(&logging.level, rust_log.as_deref())?;

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

/// Filter from `RUST_LOG` if non-empty, otherwise the configured level for
/// this crate's targets.
pub fn build_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid RUST_LOG directives: {}", directives)),
        None => EnvFilter::try_new(format!(
            "burn_rate_predictor={level},burn_rate_server={level}"
        ))
        .with_context(|| format!("Invalid logging.level: {}", level)),
    }
}
