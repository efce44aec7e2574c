// src/logging.rs

//! `tracing` setup for the gateway.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied to every target;
//! 2. `PDFGATE_LOG`, read as `EnvFilter` directives, so
//!    `PDFGATE_LOG=pdfgate=debug,tower_http=info` works;
//! 3. [`DEFAULT_DIRECTIVES`].
//!
//! Events go to stderr.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "PDFGATE_LOG";

pub const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber. Call once, before serving.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    Ok(())
}

/// Resolve the filter from the CLI flag and the raw `PDFGATE_LOG` value.
///
/// A blank env value counts as unset; malformed directives are an error
/// rather than being silently ignored.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return Ok(EnvFilter::new(directive_for(level)));
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} value {directives:?}")),
        None => Ok(EnvFilter::new(DEFAULT_DIRECTIVES)),
    }
}

pub fn directive_for(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
