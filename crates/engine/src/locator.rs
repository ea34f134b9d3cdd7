// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staged window locator.
//!
//! Finds the window carrying a project's tag for one role, launching the
//! application when nothing is bound yet:
//!
//! 1. Scoped query of the project workspace.
//! 2. Launch.
//! 3. Short poll of the project workspace.
//! 4. Focused-window recovery until the deadline, moving the window home.
//! 5. Global scan (configured roles only), ignoring windows that predate
//!    the launch.
//!
//! Each stage that sees several tagged windows binds the lowest id and
//! reports the ambiguity as a warning.

use crate::cancel::CancelFlag;
use crate::error::{ActivationError, Warning};
use ap_adapters::{AppLauncher, LaunchError, WindowManager, WindowQuery, WmError};
use ap_core::{LocatorConfig, Project, Role, WindowRecord, WindowTag};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::Instrument;

/// Where a window was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Scoped,
    ShortPoll,
    FocusedRecovery,
    GlobalScan,
}

impl Stage {
    /// Whether the window was already bound before this activation
    pub fn was_bound(self) -> bool {
        matches!(self, Stage::Scoped)
    }
}

/// A bound window. `window.workspace` reflects any move performed.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub window: WindowRecord,
    pub stage: Stage,
    pub launched: bool,
    pub moved: bool,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    #[error("no {role} window tagged {tag} appeared within {}ms", deadline.as_millis())]
    NotFound {
        role: Role,
        tag: WindowTag,
        deadline: Duration,
    },
    #[error("cancelled")]
    Cancelled,
    #[error(transparent)]
    Wm(#[from] WmError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error("failed to move window {window_id} to {workspace}: {source}")]
    Move {
        window_id: u64,
        workspace: String,
        source: WmError,
    },
}

impl LocateError {
    pub fn into_activation(self, project: &Project) -> ActivationError {
        match self {
            LocateError::NotFound { role, .. } => ActivationError::RequiredWindowMissing {
                role,
                project: project.id.to_string(),
            },
            LocateError::Cancelled => ActivationError::Cancelled,
            LocateError::Wm(e) => e.into(),
            LocateError::Launch(e) => e.into(),
            LocateError::Move {
                window_id,
                workspace,
                source,
            } => ActivationError::MoveFailed {
                window_id,
                workspace,
                message: source.to_string(),
            },
        }
    }
}

/// Finds or creates the window bound to `role` for a project
#[async_trait]
pub trait WindowLocator: Clone + Send + Sync + 'static {
    async fn locate(
        &self,
        role: Role,
        project: &Project,
        cancel: &CancelFlag,
    ) -> Result<Located, LocateError>;
}

/// Poll cadence and budgets
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorTiming {
    pub short_poll: Duration,
    pub short_interval: Duration,
    pub deadline: Duration,
    pub fast_interval: Duration,
    pub fast_phase: Duration,
    pub slow_interval: Duration,
    pub global_scan_roles: Vec<Role>,
}

impl Default for LocatorTiming {
    fn default() -> Self {
        Self::from(&LocatorConfig::default())
    }
}

impl From<&LocatorConfig> for LocatorTiming {
    fn from(config: &LocatorConfig) -> Self {
        Self {
            short_poll: Duration::from_millis(config.short_poll_ms),
            short_interval: Duration::from_millis(100),
            deadline: Duration::from_millis(config.deadline_ms),
            fast_interval: Duration::from_millis(100),
            fast_phase: Duration::from_secs(2),
            slow_interval: Duration::from_millis(250),
            global_scan_roles: config.global_scan_roles.clone(),
        }
    }
}

#[derive(Clone)]
pub struct StagedLocator<W, L> {
    wm: W,
    launcher: L,
    timing: LocatorTiming,
}

impl<W, L> StagedLocator<W, L>
where
    W: WindowManager,
    L: AppLauncher,
{
    pub fn new(wm: W, launcher: L, timing: LocatorTiming) -> Self {
        Self {
            wm,
            launcher,
            timing,
        }
    }

    async fn scoped(
        &self,
        role: Role,
        project: &Project,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<WindowRecord>, LocateError> {
        let tag = project.tag();
        let query = WindowQuery::workspace(project.workspace().as_str()).with_app(role.bundle_id());
        let candidates = self
            .wm
            .list_windows(&query)
            .await?
            .into_iter()
            .filter(|w| w.is_claimed_by(role.bundle_id(), &tag))
            .collect();
        Ok(pick_lowest(role, candidates, warnings))
    }

    async fn focused_candidate(
        &self,
        role: Role,
        tag: &WindowTag,
    ) -> Result<Option<WindowRecord>, LocateError> {
        Ok(self
            .wm
            .focused_window()
            .await?
            .filter(|w| w.is_claimed_by(role.bundle_id(), tag)))
    }

    async fn global_scan(
        &self,
        role: Role,
        tag: &WindowTag,
        preexisting: &BTreeSet<u64>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<WindowRecord>, LocateError> {
        let candidates = self
            .wm
            .list_windows(&WindowQuery::all())
            .await?
            .into_iter()
            .filter(|w| w.is_claimed_by(role.bundle_id(), tag))
            .filter(|w| !preexisting.contains(&w.window_id))
            .collect();
        Ok(pick_lowest(role, candidates, warnings))
    }

    /// Move `window` into the project workspace when it lives elsewhere
    async fn bring_home(
        &self,
        mut window: WindowRecord,
        project: &Project,
    ) -> Result<(WindowRecord, bool), LocateError> {
        let workspace = project.workspace();
        if window.workspace == workspace.as_str() {
            return Ok((window, false));
        }
        self.wm
            .move_window(window.window_id, workspace.as_str())
            .await
            .map_err(|source| LocateError::Move {
                window_id: window.window_id,
                workspace: workspace.to_string(),
                source,
            })?;
        window.workspace = workspace.to_string();
        Ok((window, true))
    }

    async fn run_stages(
        &self,
        role: Role,
        project: &Project,
        cancel: &CancelFlag,
    ) -> Result<Located, LocateError> {
        let mut warnings = Vec::new();
        let tag = project.tag();

        if let Some(window) = self.scoped(role, project, &mut warnings).await? {
            tracing::debug!(window_id = window.window_id, "already bound");
            return Ok(Located {
                window,
                stage: Stage::Scoped,
                launched: false,
                moved: false,
                warnings,
            });
        }

        check(cancel)?;
        let global_scan = self.timing.global_scan_roles.contains(&role);
        let preexisting: BTreeSet<u64> = if global_scan {
            self.wm
                .list_windows(&WindowQuery::all().with_app(role.bundle_id()))
                .await?
                .into_iter()
                .map(|w| w.window_id)
                .collect()
        } else {
            BTreeSet::new()
        };

        self.launcher.launch(role, project).await?;
        let started = Instant::now();
        let deadline = started + self.timing.deadline;
        let short_until = started + self.timing.short_poll;

        let found = |window: WindowRecord, stage: Stage, moved: bool, warnings: Vec<Warning>| {
            tracing::info!(
                window_id = window.window_id,
                stage = ?stage,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "window located"
            );
            Located {
                window,
                stage,
                launched: true,
                moved,
                warnings,
            }
        };

        loop {
            check(cancel)?;
            if let Some(window) = self.scoped(role, project, &mut warnings).await? {
                return Ok(found(window, Stage::ShortPoll, false, warnings));
            }
            if Instant::now() + self.timing.short_interval > short_until {
                break;
            }
            sleep(self.timing.short_interval).await;
        }

        let recovery_started = Instant::now();
        loop {
            check(cancel)?;
            if let Some(window) = self.focused_candidate(role, &tag).await? {
                let (window, moved) = self.bring_home(window, project).await?;
                return Ok(found(window, Stage::FocusedRecovery, moved, warnings));
            }
            let interval = if recovery_started.elapsed() < self.timing.fast_phase {
                self.timing.fast_interval
            } else {
                self.timing.slow_interval
            };
            if Instant::now() + interval > deadline {
                break;
            }
            sleep(interval).await;
        }

        if global_scan {
            check(cancel)?;
            if let Some(window) = self
                .global_scan(role, &tag, &preexisting, &mut warnings)
                .await?
            {
                let (window, moved) = self.bring_home(window, project).await?;
                return Ok(found(window, Stage::GlobalScan, moved, warnings));
            }
        }

        tracing::warn!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "no tagged window appeared"
        );
        Err(LocateError::NotFound {
            role,
            tag,
            deadline: self.timing.deadline,
        })
    }
}

#[async_trait]
impl<W, L> WindowLocator for StagedLocator<W, L>
where
    W: WindowManager,
    L: AppLauncher,
{
    async fn locate(
        &self,
        role: Role,
        project: &Project,
        cancel: &CancelFlag,
    ) -> Result<Located, LocateError> {
        let span = tracing::info_span!("locate", %role, project = %project.id);
        self.run_stages(role, project, cancel).instrument(span).await
    }
}

fn check(cancel: &CancelFlag) -> Result<(), LocateError> {
    if cancel.is_cancelled() {
        Err(LocateError::Cancelled)
    } else {
        Ok(())
    }
}

/// Bind the lowest window id among `candidates`, warning when there are several
pub(crate) fn pick_lowest(
    role: Role,
    mut candidates: Vec<WindowRecord>,
    warnings: &mut Vec<Warning>,
) -> Option<WindowRecord> {
    candidates.sort_by_key(|w| w.window_id);
    candidates.dedup_by_key(|w| w.window_id);
    if candidates.len() > 1 {
        let ids: Vec<u64> = candidates.iter().map(|w| w.window_id).collect();
        let warning = Warning::AmbiguousWindows {
            role,
            candidates: ids,
            chosen: candidates[0].window_id,
        };
        tracing::warn!(%warning, "ambiguous windows");
        warnings.push(warning);
    }
    candidates.into_iter().next()
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
