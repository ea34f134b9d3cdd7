// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::launch::{AppLauncher, LaunchError};
use crate::wm::{WindowManager, WindowQuery, WindowScope, WmError};
use ap_core::{Project, Role, WindowRecord};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any WindowManager
#[derive(Clone)]
pub struct TracedWindowManager<W> {
    inner: W,
}

impl<W> TracedWindowManager<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

fn scope_label(scope: &WindowScope) -> String {
    match scope {
        WindowScope::Workspace(ws) => format!("workspace:{}", ws),
        WindowScope::Monitor(m) => format!("monitor:{}", m),
        WindowScope::All => "all".to_string(),
    }
}

#[async_trait]
impl<W: WindowManager> WindowManager for TracedWindowManager<W> {
    async fn list_workspaces(&self) -> Result<Vec<String>, WmError> {
        let result = self.inner.list_workspaces().await;
        tracing::trace!(count = ?result.as_ref().map(Vec::len).ok(), "listed workspaces");
        result
    }

    async fn focused_workspace(&self) -> Result<String, WmError> {
        let result = self.inner.focused_workspace().await;
        match &result {
            Ok(ws) => tracing::trace!(workspace = ws.as_str(), "focused workspace"),
            Err(e) => tracing::warn!(error = %e, "focused workspace query failed"),
        }
        result
    }

    async fn list_windows(&self, query: &WindowQuery) -> Result<Vec<WindowRecord>, WmError> {
        let span = tracing::debug_span!(
            "wm.list_windows",
            scope = %scope_label(&query.scope),
            app = query.app_bundle_id.as_deref().unwrap_or("*"),
        );
        async {
            let result = self.inner.list_windows(query).await;
            match &result {
                Ok(windows) => tracing::debug!(count = windows.len(), "listed"),
                Err(e) => tracing::warn!(error = %e, "listing failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn focused_window(&self) -> Result<Option<WindowRecord>, WmError> {
        let result = self.inner.focused_window().await;
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "focused window query failed");
        }
        result
    }

    async fn move_window(&self, window_id: u64, workspace: &str) -> Result<(), WmError> {
        let result = self.inner.move_window(window_id, workspace).await;
        tracing::info_span!("wm.move", window_id, workspace).in_scope(|| match &result {
            Ok(()) => tracing::info!("moved"),
            Err(e) => tracing::error!(error = %e, "move failed"),
        });
        result
    }

    async fn focus_window(&self, window_id: u64) -> Result<(), WmError> {
        let result = self.inner.focus_window(window_id).await;
        match &result {
            Ok(()) => tracing::debug!(window_id, "focused window"),
            Err(e) => tracing::warn!(window_id, error = %e, "focus failed"),
        }
        result
    }

    async fn close_window(&self, window_id: u64) -> Result<(), WmError> {
        let result = self.inner.close_window(window_id).await;
        tracing::info_span!("wm.close", window_id).in_scope(|| match &result {
            Ok(()) => tracing::info!("closed"),
            Err(e) => tracing::warn!(error = %e, "close failed"),
        });
        result
    }

    async fn summon_workspace(&self, workspace: &str) -> Result<(), WmError> {
        let result = self.inner.summon_workspace(workspace).await;
        match &result {
            Ok(()) => tracing::debug!(workspace, "summoned"),
            Err(e) => tracing::warn!(workspace, error = %e, "summon failed"),
        }
        result
    }

    async fn focus_workspace(&self, workspace: &str) -> Result<(), WmError> {
        let result = self.inner.focus_workspace(workspace).await;
        match &result {
            Ok(()) => tracing::debug!(workspace, "switched workspace"),
            Err(e) => tracing::warn!(workspace, error = %e, "workspace switch failed"),
        }
        result
    }

    async fn reload_config(&self) -> Result<(), WmError> {
        let result = self.inner.reload_config().await;
        match &result {
            Ok(()) => tracing::info!("reloaded window manager config"),
            Err(e) => tracing::error!(error = %e, "config reload failed"),
        }
        result
    }

    async fn check_compatibility(&self) -> Result<(), WmError> {
        let start = std::time::Instant::now();
        let result = self.inner.check_compatibility().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => tracing::debug!(elapsed_ms, "window manager compatible"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "compatibility check failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any AppLauncher
#[derive(Clone)]
pub struct TracedLauncher<L> {
    inner: L,
}

impl<L> TracedLauncher<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<L: AppLauncher> AppLauncher for TracedLauncher<L> {
    async fn launch(&self, role: Role, project: &Project) -> Result<(), LaunchError> {
        async {
            tracing::info!(remote = project.is_remote(), "starting");
            let start = std::time::Instant::now();
            let result = self.inner.launch(role, project).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "launch handed off"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "launch failed"),
            }
            result
        }
        .instrument(tracing::info_span!("app.launch", %role, project = %project.id))
        .await
    }

    async fn activate_app(&self, bundle_id: &str) -> Result<(), LaunchError> {
        let result = self.inner.activate_app(bundle_id).await;
        match &result {
            Ok(()) => tracing::debug!(bundle_id, "activated app"),
            Err(e) => tracing::warn!(bundle_id, error = %e, "activate failed"),
        }
        result
    }

    async fn frontmost_app(&self) -> Result<Option<String>, LaunchError> {
        let result = self.inner.frontmost_app().await;
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "frontmost app query failed");
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
