// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestration errors and warnings

use ap_adapters::{LaunchError, ScreenError, WmError};
use ap_core::{ConfigError, Role};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Every way an activation, close or focus restore can fail
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivationError {
    #[error("AeroSpace is missing required CLI features: {}", missing.join(", "))]
    AeroSpaceIncompatible { missing: Vec<String> },
    #[error("configuration error: {message}")]
    ConfigFailed { message: String },
    #[error("project not found: {project}")]
    ProjectNotFound { project: String },
    #[error("workspace {expected} could not be focused (focused: {actual})")]
    WorkspaceNotFocused { expected: String, actual: String },
    #[error("workspace {expected} lost focus after moving windows (focused: {actual})")]
    WorkspaceNotFocusedAfterMove { expected: String, actual: String },
    #[error("no {role} window found for project {project}")]
    RequiredWindowMissing { role: Role, project: String },
    #[error("failed to move window {window_id} to {workspace}: {message}")]
    MoveFailed {
        window_id: u64,
        workspace: String,
        message: String,
    },
    #[error("layout failed: {message}")]
    LayoutFailed { message: String },
    #[error("failed to resize window {window_id}: {message}")]
    ResizeFailed { window_id: u64, message: String },
    #[error("screen metrics unavailable: {message}")]
    ScreenMetricsUnavailable { message: String },
    #[error("`{command}` failed{}: {stderr}", exit_suffix(*exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("failed to load state: {message}")]
    StateLoadFailed { message: String },
    #[error("failed to save state: {message}")]
    StateSaveFailed { message: String },
    #[error("cancelled")]
    Cancelled,
}

fn exit_suffix(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

impl From<WmError> for ActivationError {
    fn from(err: WmError) -> Self {
        let stderr = err.to_string();
        match err {
            WmError::Incompatible { missing } => ActivationError::AeroSpaceIncompatible { missing },
            WmError::CommandFailed {
                command,
                exit_code,
                stderr,
            } => ActivationError::CommandFailed {
                command,
                exit_code: Some(exit_code),
                stderr,
            },
            WmError::NotInstalled { binary } => ActivationError::CommandFailed {
                command: binary,
                exit_code: None,
                stderr,
            },
            WmError::CircuitOpen { command, .. }
            | WmError::Timeout { command, .. }
            | WmError::Spawn { command, .. }
            | WmError::Parse { command, .. } => ActivationError::CommandFailed {
                command,
                exit_code: None,
                stderr,
            },
        }
    }
}

impl From<LaunchError> for ActivationError {
    fn from(err: LaunchError) -> Self {
        let message = err.to_string();
        match err {
            LaunchError::CommandFailed {
                command,
                exit_code,
                stderr,
            } => ActivationError::CommandFailed {
                command,
                exit_code: Some(exit_code),
                stderr,
            },
            LaunchError::Unavailable { command, .. } => ActivationError::CommandFailed {
                command,
                exit_code: None,
                stderr: message,
            },
            LaunchError::WorkspaceFile { path, .. } => ActivationError::CommandFailed {
                command: format!("write {}", path.display()),
                exit_code: None,
                stderr: message,
            },
        }
    }
}

impl From<ConfigError> for ActivationError {
    fn from(err: ConfigError) -> Self {
        ActivationError::ConfigFailed {
            message: err.to_string(),
        }
    }
}

impl ActivationError {
    pub(crate) fn screen(err: ScreenError) -> Self {
        ActivationError::ScreenMetricsUnavailable {
            message: err.to_string(),
        }
    }

    pub(crate) fn resize(window_id: u64, err: ScreenError) -> Self {
        ActivationError::ResizeFailed {
            window_id,
            message: err.to_string(),
        }
    }
}

/// Non-fatal conditions reported alongside a successful result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Several windows carried the tag; the lowest id was bound
    AmbiguousWindows {
        role: Role,
        candidates: Vec<u64>,
        chosen: u64,
    },
    /// Windows were bound but could not be laid out
    LayoutNotApplied { error: ActivationError },
    /// A window in the workspace refused to close
    CloseFailed { window_id: u64, message: String },
    /// A focus history entry no longer exists and was discarded
    StaleFocusEntry { target: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::AmbiguousWindows {
                role,
                candidates,
                chosen,
            } => write!(
                f,
                "{} {} windows share the tag {:?}; using {}",
                candidates.len(),
                role,
                candidates,
                chosen
            ),
            Warning::LayoutNotApplied { error } => write!(f, "layout not applied: {}", error),
            Warning::CloseFailed { window_id, message } => {
                write!(f, "window {} did not close: {}", window_id, message)
            }
            Warning::StaleFocusEntry { target } => {
                write!(f, "skipped stale focus entry: {}", target)
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
