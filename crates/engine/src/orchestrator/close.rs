// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Close: empty a project's workspace and restore prior focus

use super::Orchestrator;
use crate::error::{ActivationError, Warning};
use crate::locator::WindowLocator;
use ap_adapters::{
    AppLauncher, ScreenMetrics, WindowManager, WindowPositioner, WindowQuery, WmError,
};
use ap_core::{Clock, FocusTarget, IdGen};
use ap_storage::StateStore;
use serde::Serialize;
use tracing::Instrument;

/// Context focus was returned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RestoredFocus {
    Window { window_id: u64 },
    App { bundle_id: String },
    Workspace { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloseResult {
    pub project: String,
    /// Ids of windows that closed
    pub closed: Vec<u64>,
    pub restored: RestoredFocus,
    pub warnings: Vec<Warning>,
}

/// Outcome of returning to the previous context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnResult {
    pub restored: RestoredFocus,
    pub warnings: Vec<Warning>,
}

impl<W, Loc, L, Scr, S, C, I> Orchestrator<W, Loc, L, Scr, S, C, I>
where
    W: WindowManager,
    Loc: WindowLocator,
    L: AppLauncher,
    Scr: ScreenMetrics + WindowPositioner,
    S: StateStore,
    C: Clock,
    I: IdGen,
{
    /// Close every window in the project's workspace, then return focus to
    /// where the user was before.
    pub async fn close(&self, project_id: &str) -> Result<CloseResult, ActivationError> {
        let span = tracing::info_span!("close", project = project_id);
        async {
            let project = self.resolve(project_id)?;
            let workspace = project.workspace();
            let mut windows = self
                .wm
                .list_windows(&WindowQuery::workspace(workspace.as_str()))
                .await?;
            windows.sort_by_key(|w| w.window_id);

            let mut closed = Vec::new();
            let mut warnings = Vec::new();
            for window in windows {
                match self.wm.close_window(window.window_id).await {
                    Ok(()) => closed.push(window.window_id),
                    Err(e) => warnings.push(Warning::CloseFailed {
                        window_id: window.window_id,
                        message: e.to_string(),
                    }),
                }
            }

            let restored = self.restore_previous(&mut warnings).await?;
            tracing::info!(closed = closed.len(), warnings = warnings.len(), "closed");
            Ok(CloseResult {
                project: project.id.to_string(),
                closed,
                restored,
                warnings,
            })
        }
        .instrument(span)
        .await
    }

    /// Pop the focus stack and restore that context
    pub async fn return_to_previous(&self) -> Result<ReturnResult, ActivationError> {
        let mut warnings = Vec::new();
        let restored = self
            .restore_previous(&mut warnings)
            .instrument(tracing::info_span!("return"))
            .await?;
        Ok(ReturnResult { restored, warnings })
    }

    /// Restore the most recent entry that still exists; fall back to the
    /// reserved workspace when none does.
    async fn restore_previous(
        &self,
        warnings: &mut Vec<Warning>,
    ) -> Result<RestoredFocus, ActivationError> {
        while let Some(entry) = self.focus.peek_and_pop()? {
            match &entry.target {
                FocusTarget::Window { window_id, .. } => {
                    match self.wm.focus_window(*window_id).await {
                        Ok(()) => {
                            tracing::info!(window_id, "restored focus");
                            return Ok(RestoredFocus::Window {
                                window_id: *window_id,
                            });
                        }
                        Err(WmError::CommandFailed { .. }) => {
                            tracing::debug!(window_id, "focus entry is stale");
                            warnings.push(Warning::StaleFocusEntry {
                                target: entry.target.to_string(),
                            });
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                FocusTarget::App { bundle_id } => match self.launcher.activate_app(bundle_id).await {
                    Ok(()) => {
                        tracing::info!(bundle_id = bundle_id.as_str(), "restored app");
                        return Ok(RestoredFocus::App {
                            bundle_id: bundle_id.clone(),
                        });
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "app entry is stale");
                        warnings.push(Warning::StaleFocusEntry {
                            target: entry.target.to_string(),
                        });
                    }
                },
            }
        }

        let fallback = &self.config.focus.fallback_workspace;
        self.wm.focus_workspace(fallback).await?;
        tracing::info!(workspace = fallback.as_str(), "no prior focus; using fallback workspace");
        Ok(RestoredFocus::Workspace {
            name: fallback.clone(),
        })
    }
}
