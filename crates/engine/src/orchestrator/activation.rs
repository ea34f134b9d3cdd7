// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activation: bring a project's editor and browser into its workspace

use super::Orchestrator;
use crate::cancel::CancelFlag;
use crate::error::{ActivationError, Warning};
use crate::layout::{compute_layout, DisplayMode};
use crate::locator::{Located, WindowLocator};
use ap_adapters::{AppLauncher, ScreenMetrics, WindowManager, WindowPositioner};
use ap_core::{Clock, FocusTarget, IdGen, Project, Role, WindowRecord, WorkspaceName};
use ap_storage::StateStore;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::Instrument;

/// Focused-workspace polls after a summon
const FOCUS_ATTEMPTS: u32 = 5;
const FOCUS_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Progress of one activation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationState {
    Idle,
    ResolvingConfig,
    ConfirmingWorkspaceFocus,
    LocatingEditor,
    LocatingBrowser,
    ApplyingLayout,
    FocusingEditor,
    Done,
    Failed,
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivationState::Idle => "idle",
            ActivationState::ResolvingConfig => "resolving_config",
            ActivationState::ConfirmingWorkspaceFocus => "confirming_workspace_focus",
            ActivationState::LocatingEditor => "locating_editor",
            ActivationState::LocatingBrowser => "locating_browser",
            ActivationState::ApplyingLayout => "applying_layout",
            ActivationState::FocusingEditor => "focusing_editor",
            ActivationState::Done => "done",
            ActivationState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks the current state and logs each transition
struct Progress {
    state: ActivationState,
}

impl Progress {
    fn new() -> Self {
        Self {
            state: ActivationState::Idle,
        }
    }

    fn enter(&mut self, next: ActivationState) {
        tracing::debug!(from = %self.state, to = %next, "activation state");
        self.state = next;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationResult {
    pub request_id: String,
    pub project: String,
    pub workspace: String,
    pub editor_window_id: u64,
    pub browser_window_id: u64,
    /// Mode of the layout applied, `None` when windows were left as they were
    pub layout: Option<DisplayMode>,
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
    /// Activate a project: bind its editor and browser in its workspace,
    /// lay them out when freshly bound, and focus the editor.
    pub async fn activate(
        &self,
        project_id: &str,
        cancel: &CancelFlag,
    ) -> Result<ActivationResult, ActivationError> {
        let request_id = self.ids.next();
        let span = tracing::info_span!("activate", %request_id, project = project_id);
        async {
            let start = std::time::Instant::now();
            let mut progress = Progress::new();
            let result = self
                .run_activation(project_id, cancel, &request_id, &mut progress)
                .await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(done) => {
                    progress.enter(ActivationState::Done);
                    tracing::info!(
                        elapsed_ms,
                        editor = done.editor_window_id,
                        browser = done.browser_window_id,
                        warnings = done.warnings.len(),
                        "activated"
                    );
                }
                Err(e) => {
                    let failed_in = progress.state;
                    progress.enter(ActivationState::Failed);
                    tracing::error!(elapsed_ms, state = %failed_in, error = %e, "activation failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_activation(
        &self,
        project_id: &str,
        cancel: &CancelFlag,
        request_id: &str,
        progress: &mut Progress,
    ) -> Result<ActivationResult, ActivationError> {
        progress.enter(ActivationState::ResolvingConfig);
        let project = self.resolve(project_id)?;
        let workspace = project.workspace();

        self.capture_focus().await?;
        check(cancel)?;

        progress.enter(ActivationState::ConfirmingWorkspaceFocus);
        self.confirm_workspace(&workspace, cancel).await?;
        check(cancel)?;

        progress.enter(ActivationState::LocatingEditor);
        let (editor, browser) = self.locate_both(&project, cancel, progress).await?;
        let mut warnings: Vec<Warning> = editor
            .warnings
            .iter()
            .chain(browser.warnings.iter())
            .cloned()
            .collect();

        let fresh = !editor.stage.was_bound() && !browser.stage.was_bound();
        let mut moved = editor.moved || browser.moved;
        let editor_window = self.ensure_in_workspace(editor.window, &workspace, &mut moved).await?;
        let browser_window = self.ensure_in_workspace(browser.window, &workspace, &mut moved).await?;
        if moved {
            let actual = self.wm.focused_workspace().await?;
            if actual != workspace.as_str() {
                return Err(ActivationError::WorkspaceNotFocusedAfterMove {
                    expected: workspace.to_string(),
                    actual,
                });
            }
        }
        check(cancel)?;

        let layout = if fresh {
            progress.enter(ActivationState::ApplyingLayout);
            let windows = [(Role::Editor, &editor_window), (Role::Browser, &browser_window)];
            match self.apply_layout(&project, &windows).await {
                Ok(mode) => Some(mode),
                Err(error) => {
                    let warning = Warning::LayoutNotApplied { error };
                    tracing::warn!(%warning, "continuing without layout");
                    warnings.push(warning);
                    None
                }
            }
        } else {
            tracing::debug!("windows already bound; keeping their layout");
            None
        };

        progress.enter(ActivationState::FocusingEditor);
        self.wm.focus_window(editor_window.window_id).await?;

        Ok(ActivationResult {
            request_id: request_id.to_string(),
            project: project.id.to_string(),
            workspace: workspace.to_string(),
            editor_window_id: editor_window.window_id,
            browser_window_id: browser_window.window_id,
            layout,
            warnings,
        })
    }

    /// Remember where the user was, unless that is already a project workspace
    async fn capture_focus(&self) -> Result<(), ActivationError> {
        let target = match self.wm.focused_window().await? {
            Some(window) if WorkspaceName::is_project_workspace(&window.workspace) => {
                tracing::debug!(workspace = %window.workspace, "focus already in a project");
                return Ok(());
            }
            Some(window) => FocusTarget::Window {
                window_id: window.window_id,
                app_bundle_id: window.app_bundle_id,
                workspace: window.workspace,
            },
            None => match self.launcher.frontmost_app().await {
                Ok(Some(bundle_id)) => FocusTarget::App { bundle_id },
                Ok(None) => return Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "frontmost app unavailable; not recording focus");
                    return Ok(());
                }
            },
        };
        self.focus.push(target)
    }

    /// Make `workspace` the focused workspace, summoning it when needed
    async fn confirm_workspace(
        &self,
        workspace: &WorkspaceName,
        cancel: &CancelFlag,
    ) -> Result<(), ActivationError> {
        if self.wm.focused_workspace().await? == workspace.as_str() {
            return Ok(());
        }
        self.wm.summon_workspace(workspace.as_str()).await?;

        let mut actual = String::new();
        for attempt in 0..FOCUS_ATTEMPTS {
            if attempt > 0 {
                check(cancel)?;
                sleep(FOCUS_POLL_INTERVAL).await;
            }
            actual = self.wm.focused_workspace().await?;
            if actual == workspace.as_str() {
                return Ok(());
            }
        }
        Err(ActivationError::WorkspaceNotFocused {
            expected: workspace.to_string(),
            actual,
        })
    }

    /// Locate editor and browser concurrently, editor result first.
    ///
    /// An editor failure cancels the browser search.
    async fn locate_both(
        &self,
        project: &Project,
        cancel: &CancelFlag,
        progress: &mut Progress,
    ) -> Result<(Located, Located), ActivationError> {
        let browser_cancel = cancel.child();
        let editor = async {
            let result = self.locator.locate(Role::Editor, project, cancel).await;
            if result.is_err() {
                browser_cancel.cancel();
            }
            result
        };
        let browser = self
            .locator
            .locate(Role::Browser, project, &browser_cancel);
        let (editor, browser) = tokio::join!(editor, browser);

        let editor = editor.map_err(|e| e.into_activation(project))?;
        progress.enter(ActivationState::LocatingBrowser);
        let browser = browser.map_err(|e| e.into_activation(project))?;
        Ok((editor, browser))
    }

    async fn ensure_in_workspace(
        &self,
        mut window: WindowRecord,
        workspace: &WorkspaceName,
        moved: &mut bool,
    ) -> Result<WindowRecord, ActivationError> {
        if window.workspace == workspace.as_str() {
            return Ok(window);
        }
        self.wm
            .move_window(window.window_id, workspace.as_str())
            .await
            .map_err(|e| ActivationError::MoveFailed {
                window_id: window.window_id,
                workspace: workspace.to_string(),
                message: e.to_string(),
            })?;
        window.workspace = workspace.to_string();
        *moved = true;
        Ok(window)
    }

    async fn apply_layout(
        &self,
        project: &Project,
        windows: &[(Role, &WindowRecord)],
    ) -> Result<DisplayMode, ActivationError> {
        let layout = &self.config.layout;
        let screen = self
            .screen
            .main_screen()
            .await
            .map_err(ActivationError::screen)?;
        let mode = DisplayMode::for_width(screen.pixel_width, layout.small_screen_threshold_px);
        let roles: Vec<Role> = windows.iter().map(|(role, _)| *role).collect();
        let rects = compute_layout(mode, screen.visible_frame, &roles, layout).map_err(|e| {
            ActivationError::LayoutFailed {
                message: e.to_string(),
            }
        })?;

        let tag = project.tag();
        for (role, window) in windows {
            let Some(rect) = rects.get(role) else {
                continue;
            };
            let frame = rect.to_frame(screen.visible_frame);
            self.screen
                .set_frame(window, &tag, frame)
                .await
                .map_err(|e| ActivationError::resize(window.window_id, e))?;
        }
        tracing::info!(%mode, pixel_width = screen.pixel_width, "layout applied");
        Ok(mode)
    }
}

fn check(cancel: &CancelFlag) -> Result<(), ActivationError> {
    if cancel.is_cancelled() {
        Err(ActivationError::Cancelled)
    } else {
        Ok(())
    }
}
