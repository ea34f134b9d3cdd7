// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "agent-panel";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot locate {0}: HOME is not set")]
    NoHome(&'static str),
}

// --- Config file ---

/// Resolve config file: AP_CONFIG > XDG_CONFIG_HOME/agent-panel/config.toml > ~/.config/agent-panel/config.toml
pub fn config_path() -> Result<PathBuf, EnvError> {
    if let Some(path) = non_empty("AP_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR).join("config.toml"));
    }
    let home = non_empty("HOME").ok_or(EnvError::NoHome("config file"))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join(APP_DIR)
        .join("config.toml"))
}

// --- State directory ---

/// Resolve state directory: AP_STATE_DIR > XDG_STATE_HOME/agent-panel > ~/.local/state/agent-panel
pub fn state_dir() -> Result<PathBuf, EnvError> {
    if let Some(dir) = non_empty("AP_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }
    let home = non_empty("HOME").ok_or(EnvError::NoHome("state directory"))?;
    Ok(PathBuf::from(home).join(".local/state").join(APP_DIR))
}

// --- Logging ---

/// Filter directive for the log file (AP_LOG)
pub fn log_filter() -> Option<String> {
    non_empty("AP_LOG")
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
