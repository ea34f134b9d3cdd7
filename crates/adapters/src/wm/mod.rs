// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Window manager adapters

mod aerospace;
pub mod parse;

pub use aerospace::{AeroSpaceClient, REQUIRED_FEATURES};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWindowManager, WmCall, WmOp};

use ap_core::WindowRecord;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from window manager operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmError {
    #[error("`{command}` skipped: circuit breaker open, retry in {}ms", remaining.as_millis())]
    CircuitOpen { command: String, remaining: Duration },
    #[error("`{command}` timed out after {}ms", timeout.as_millis())]
    Timeout { command: String, timeout: Duration },
    #[error("{binary} not found; is AeroSpace installed?")]
    NotInstalled { binary: String },
    #[error("failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },
    #[error("`{command}` exited with code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    #[error("unexpected output from `{command}` (line {line}): {reason}")]
    Parse {
        command: String,
        line: usize,
        reason: String,
    },
    #[error("AeroSpace CLI is missing required features: {}", missing.join(", "))]
    Incompatible { missing: Vec<String> },
}

impl WmError {
    /// The command line this error refers to, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            WmError::CircuitOpen { command, .. }
            | WmError::Timeout { command, .. }
            | WmError::Spawn { command, .. }
            | WmError::CommandFailed { command, .. }
            | WmError::Parse { command, .. } => Some(command),
            WmError::NotInstalled { .. } | WmError::Incompatible { .. } => None,
        }
    }

    /// Exit code when the command ran to completion
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            WmError::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Which windows a listing covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowScope {
    Workspace(String),
    Monitor(String),
    All,
}

/// Window listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowQuery {
    pub scope: WindowScope,
    pub app_bundle_id: Option<String>,
}

impl WindowQuery {
    pub fn workspace(name: impl Into<String>) -> Self {
        Self {
            scope: WindowScope::Workspace(name.into()),
            app_bundle_id: None,
        }
    }

    pub fn monitor(name: impl Into<String>) -> Self {
        Self {
            scope: WindowScope::Monitor(name.into()),
            app_bundle_id: None,
        }
    }

    pub fn all() -> Self {
        Self {
            scope: WindowScope::All,
            app_bundle_id: None,
        }
    }

    pub fn with_app(mut self, bundle_id: impl Into<String>) -> Self {
        self.app_bundle_id = Some(bundle_id.into());
        self
    }

    /// Whether a window falls inside this query
    pub fn matches(&self, window: &WindowRecord) -> bool {
        let in_scope = match &self.scope {
            WindowScope::Workspace(ws) => window.workspace == *ws,
            WindowScope::Monitor(_) | WindowScope::All => true,
        };
        let app_matches = match &self.app_bundle_id {
            Some(bundle_id) => window.app_bundle_id == *bundle_id,
            None => true,
        };
        in_scope && app_matches
    }
}

/// Adapter for a tiling window manager (AeroSpace).
///
/// Every call reflects live state; nothing is cached between calls.
#[async_trait]
pub trait WindowManager: Clone + Send + Sync + 'static {
    /// Names of all workspaces
    async fn list_workspaces(&self) -> Result<Vec<String>, WmError>;

    /// Name of the focused workspace
    async fn focused_workspace(&self) -> Result<String, WmError>;

    async fn list_windows(&self, query: &WindowQuery) -> Result<Vec<WindowRecord>, WmError>;

    /// The focused window, or `None` when nothing has focus
    async fn focused_window(&self) -> Result<Option<WindowRecord>, WmError>;

    async fn move_window(&self, window_id: u64, workspace: &str) -> Result<(), WmError>;

    async fn focus_window(&self, window_id: u64) -> Result<(), WmError>;

    async fn close_window(&self, window_id: u64) -> Result<(), WmError>;

    /// Bring a workspace to the current monitor and focus it
    async fn summon_workspace(&self, workspace: &str) -> Result<(), WmError>;

    /// Switch to a workspace wherever it lives
    async fn focus_workspace(&self, workspace: &str) -> Result<(), WmError>;

    async fn reload_config(&self) -> Result<(), WmError>;

    /// Verify the CLI supports every subcommand and flag in use
    async fn check_compatibility(&self) -> Result<(), WmError>;
}
