// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File logging for a single CLI invocation

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE: &str = "ap.log";

/// Build the filter from `AP_LOG`, defaulting to `info`.
///
/// An unparsable directive falls back to the default rather than failing
/// the command.
pub fn filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `<state_dir>/ap.log`.
///
/// The returned guard flushes pending lines on drop and must outlive the
/// command.
pub fn setup_logging(state_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(state_dir)
        .with_context(|| format!("failed to create {}", state_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(state_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter(crate::env::log_filter().as_deref()))
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_defaults_to_info() {
        assert_eq!(filter(None).to_string(), "info");
    }

    #[test]
    fn filter_honors_directive() {
        assert_eq!(filter(Some("ap_engine=debug")).to_string(), "ap_engine=debug");
    }
}
