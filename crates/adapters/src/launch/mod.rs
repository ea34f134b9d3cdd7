// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application launch adapters

mod system;

pub use system::{browser_args, workspace_file_contents, SystemLauncher};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{launched_title, FakeLauncher, LaunchBehavior, LaunchCall};

use ap_core::{Project, Role};
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from launching applications
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("failed to write {}: {message}", path.display())]
    WorkspaceFile { path: PathBuf, message: String },
    #[error("`{command}` exited with code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    #[error("`{command}` could not run: {message}")]
    Unavailable { command: String, message: String },
}

impl LaunchError {
    pub fn command(&self) -> Option<&str> {
        match self {
            LaunchError::CommandFailed { command, .. }
            | LaunchError::Unavailable { command, .. } => Some(command),
            LaunchError::WorkspaceFile { .. } => None,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            LaunchError::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Starts project windows and activates applications
#[async_trait]
pub trait AppLauncher: Clone + Send + Sync + 'static {
    /// Open a new window for `role`, titled with the project's tag.
    ///
    /// Returns once the launch command has been handed off; the window
    /// appears asynchronously.
    async fn launch(&self, role: Role, project: &Project) -> Result<(), LaunchError>;

    /// Bring an application to the front
    async fn activate_app(&self, bundle_id: &str) -> Result<(), LaunchError>;

    /// Bundle id of the frontmost application, if any
    async fn frontmost_app(&self) -> Result<Option<String>, LaunchError>;
}
