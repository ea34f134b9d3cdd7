// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AeroSpace CLI client

use super::parse::{
    parse_focused_window, parse_focused_workspace, parse_windows, parse_workspaces,
    WINDOW_FORMAT,
};
use super::{WindowManager, WindowQuery, WindowScope, WmError};
use crate::breaker::{BreakerError, CircuitBreaker};
use crate::runner::{describe, CommandOutput, CommandRunner, RunError};
use ap_core::{Clock, WindowRecord};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Subcommands and the flags each must advertise in its `--help`
pub const REQUIRED_FEATURES: &[(&str, &[&str])] = &[
    ("list-workspaces", &["--all", "--focused"]),
    (
        "list-windows",
        &[
            "--workspace",
            "--monitor",
            "--all",
            "--focused",
            "--app-bundle-id",
            "--format",
        ],
    ),
    ("move-node-to-workspace", &["--window-id"]),
    ("focus", &["--window-id"]),
    ("close", &["--window-id"]),
    ("summon-workspace", &[]),
    ("workspace", &[]),
    ("reload-config", &[]),
];

/// Window manager backed by the `aerospace` binary.
///
/// Every invocation goes through the shared circuit breaker.
pub struct AeroSpaceClient<R, C: Clock> {
    binary: String,
    runner: R,
    breaker: Arc<CircuitBreaker<C>>,
    timeout: Duration,
}

impl<R: Clone, C: Clock> Clone for AeroSpaceClient<R, C> {
    fn clone(&self) -> Self {
        Self {
            binary: self.binary.clone(),
            runner: self.runner.clone(),
            breaker: Arc::clone(&self.breaker),
            timeout: self.timeout,
        }
    }
}

impl<R: CommandRunner, C: Clock> AeroSpaceClient<R, C> {
    pub fn new(
        binary: impl Into<String>,
        runner: R,
        breaker: Arc<CircuitBreaker<C>>,
        timeout: Duration,
    ) -> Self {
        Self {
            binary: binary.into(),
            runner,
            breaker,
            timeout,
        }
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker<C>> {
        &self.breaker
    }

    /// Run a subcommand through the breaker; any exit code is returned.
    async fn exec(&self, args: Vec<String>) -> Result<CommandOutput, WmError> {
        let command = describe(&self.binary, &args);
        tracing::trace!(%command, "aerospace");
        self.breaker
            .call(|| self.runner.run(&self.binary, &args, self.timeout))
            .await
            .map_err(|e| match e {
                BreakerError::Open { remaining, .. } => WmError::CircuitOpen { command, remaining },
                BreakerError::Inner(RunError::Timeout { timeout, .. }) => {
                    WmError::Timeout { command, timeout }
                }
                BreakerError::Inner(RunError::NotFound { .. }) => WmError::NotInstalled {
                    binary: self.binary.clone(),
                },
                BreakerError::Inner(RunError::Spawn { source, .. }) => WmError::Spawn {
                    command,
                    message: source.to_string(),
                },
            })
    }

    /// Run a subcommand that must exit zero; returns `(command, stdout)`.
    async fn exec_ok(&self, args: Vec<String>) -> Result<(String, String), WmError> {
        let command = describe(&self.binary, &args);
        let output = self.exec(args).await?;
        if !output.success() {
            return Err(WmError::CommandFailed {
                command,
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok((command, output.stdout))
    }

    async fn missing_features(&self, subcommand: &str, flags: &[&str]) -> Result<Vec<String>, WmError> {
        let output = self.exec(args(&[subcommand, "--help"])).await?;
        if !output.success() {
            return Ok(vec![subcommand.to_string()]);
        }
        let help = format!("{}\n{}", output.stdout, output.stderr);
        Ok(flags
            .iter()
            .filter(|flag| !mentions_flag(&help, flag))
            .map(|flag| format!("{} {}", subcommand, flag))
            .collect())
    }
}

/// Whether `flag` appears as a whole token in usage text like `[--all|--focused]`
pub(crate) fn mentions_flag(help: &str, flag: &str) -> bool {
    help.split(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']' | '|' | '(' | ')' | '='))
        .any(|token| token == flag)
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Arguments for a window listing
pub(crate) fn list_windows_args(query: &WindowQuery) -> Vec<String> {
    let mut out = vec!["list-windows".to_string()];
    match &query.scope {
        WindowScope::Workspace(ws) => {
            out.push("--workspace".to_string());
            out.push(ws.clone());
        }
        WindowScope::Monitor(monitor) => {
            out.push("--monitor".to_string());
            out.push(monitor.clone());
        }
        WindowScope::All => out.push("--all".to_string()),
    }
    if let Some(bundle_id) = &query.app_bundle_id {
        out.push("--app-bundle-id".to_string());
        out.push(bundle_id.clone());
    }
    out.push("--format".to_string());
    out.push(WINDOW_FORMAT.to_string());
    out
}

#[async_trait]
impl<R: CommandRunner, C: Clock> WindowManager for AeroSpaceClient<R, C> {
    async fn list_workspaces(&self) -> Result<Vec<String>, WmError> {
        let (command, stdout) = self.exec_ok(args(&["list-workspaces", "--all"])).await?;
        parse_workspaces(&command, &stdout)
    }

    async fn focused_workspace(&self) -> Result<String, WmError> {
        let (command, stdout) = self
            .exec_ok(args(&["list-workspaces", "--focused"]))
            .await?;
        parse_focused_workspace(&command, &stdout)
    }

    async fn list_windows(&self, query: &WindowQuery) -> Result<Vec<WindowRecord>, WmError> {
        let (command, stdout) = self.exec_ok(list_windows_args(query)).await?;
        parse_windows(&command, &stdout)
    }

    async fn focused_window(&self) -> Result<Option<WindowRecord>, WmError> {
        let list = args(&["list-windows", "--focused", "--format", WINDOW_FORMAT]);
        let (command, stdout) = self.exec_ok(list).await?;
        parse_focused_window(&command, &stdout)
    }

    async fn move_window(&self, window_id: u64, workspace: &str) -> Result<(), WmError> {
        let id = window_id.to_string();
        self.exec_ok(args(&["move-node-to-workspace", "--window-id", &id, workspace]))
            .await
            .map(|_| ())
    }

    async fn focus_window(&self, window_id: u64) -> Result<(), WmError> {
        let id = window_id.to_string();
        self.exec_ok(args(&["focus", "--window-id", &id]))
            .await
            .map(|_| ())
    }

    async fn close_window(&self, window_id: u64) -> Result<(), WmError> {
        let id = window_id.to_string();
        self.exec_ok(args(&["close", "--window-id", &id]))
            .await
            .map(|_| ())
    }

    async fn summon_workspace(&self, workspace: &str) -> Result<(), WmError> {
        self.exec_ok(args(&["summon-workspace", workspace]))
            .await
            .map(|_| ())
    }

    async fn focus_workspace(&self, workspace: &str) -> Result<(), WmError> {
        self.exec_ok(args(&["workspace", workspace]))
            .await
            .map(|_| ())
    }

    async fn reload_config(&self) -> Result<(), WmError> {
        self.exec_ok(args(&["reload-config"])).await.map(|_| ())
    }

    async fn check_compatibility(&self) -> Result<(), WmError> {
        let mut missing = Vec::new();
        for (subcommand, flags) in REQUIRED_FEATURES {
            missing.extend(self.missing_features(subcommand, flags).await?);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WmError::Incompatible { missing })
        }
    }
}

#[cfg(test)]
#[path = "aerospace_tests.rs"]
mod tests;
